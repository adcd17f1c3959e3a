//! # Render Module - Correctness Highlighting
//!
//! Turns the typed buffer into a sequence of [`Token`]s. Everything before the first mismatch is
//! correct, everything from the first mismatch onward is incorrect, and a caret marks the end of
//! the input while typing is enabled.
//!
//! ```text
//! Reference: a b c d
//! Typed:     a b X d
//! Tokens:    ✓ ✓ ✗ ✗ |
//! ```
//!
//! The renderer never decides completion. It has no side effects.

/// A single rendered element of the typed overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Correct(char),
    Incorrect(char),
    /// Insertion point at the end of the typed text
    Caret,
}

/// Index of the first typed character that differs from the reference
///
/// A typed character past the end of the reference counts as a mismatch.
pub fn first_mismatch(typed: &[char], reference: &[char]) -> Option<usize> {
    typed
        .iter()
        .enumerate()
        .position(|(index, char)| reference.get(index) != Some(char))
}

/// Render the typed buffer against the reference text
///
/// ```rust
/// use copista::render::{render, Token};
///
/// let typed: Vec<char> = "abX".chars().collect();
/// let reference: Vec<char> = "abcd".chars().collect();
///
/// assert_eq!(
///     render(&typed, &reference, true),
///     vec![Token::Correct('a'), Token::Correct('b'), Token::Incorrect('X'), Token::Caret]
/// );
/// ```
pub fn render(typed: &[char], reference: &[char], typing_enabled: bool) -> Vec<Token> {
    let wrong_from = first_mismatch(typed, reference).unwrap_or(typed.len());

    let mut tokens = Vec::with_capacity(typed.len() + 1);
    tokens.extend(typed.iter().enumerate().map(|(index, char)| {
        if index < wrong_from {
            Token::Correct(*char)
        } else {
            Token::Incorrect(*char)
        }
    }));

    if typing_enabled && typed.len() < reference.len() {
        tokens.push(Token::Caret);
    }

    tokens
}

/// Escape a string for display inside markup
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    text.chars().for_each(|char| push_escaped(&mut escaped, char));
    escaped
}

fn push_escaped(out: &mut String, char: char) {
    match char {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        '"' => out.push_str("&quot;"),
        '\'' => out.push_str("&#039;"),
        _ => out.push(char),
    }
}

/// Render tokens as escaped markup
///
/// Incorrect characters are wrapped in `<span class="wrong">`, the caret becomes
/// `<span class="caret">&nbsp;</span>`.
pub fn to_markup(tokens: &[Token]) -> String {
    let mut markup = String::with_capacity(tokens.len());

    for token in tokens {
        match token {
            Token::Correct(char) => push_escaped(&mut markup, *char),
            Token::Incorrect(char) => {
                markup.push_str("<span class=\"wrong\">");
                push_escaped(&mut markup, *char);
                markup.push_str("</span>");
            }
            Token::Caret => markup.push_str("<span class=\"caret\">&nbsp;</span>"),
        }
    }

    markup
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(text: &str) -> Vec<char> {
        text.chars().collect()
    }

    #[test]
    fn test_first_mismatch() {
        assert_eq!(first_mismatch(&chars("abc"), &chars("abc")), None);
        assert_eq!(first_mismatch(&chars("ab"), &chars("abc")), None);
        assert_eq!(first_mismatch(&chars("abX"), &chars("abc")), Some(2));
        assert_eq!(first_mismatch(&chars("Xbc"), &chars("abc")), Some(0));
        // Past the end of the reference
        assert_eq!(first_mismatch(&chars("abcd"), &chars("abc")), Some(3));
        assert_eq!(first_mismatch(&[], &chars("abc")), None);
    }

    #[test]
    fn test_render_marks_suffix_after_mismatch() {
        let tokens = render(&chars("abX"), &chars("abc"), false);
        assert_eq!(
            tokens,
            vec![Token::Correct('a'), Token::Correct('b'), Token::Incorrect('X')]
        );
    }

    #[test]
    fn test_render_correct_characters_after_mismatch_stay_incorrect() {
        let tokens = render(&chars("aXc"), &chars("abcd"), false);
        assert_eq!(
            tokens,
            vec![
                Token::Correct('a'),
                Token::Incorrect('X'),
                Token::Incorrect('c')
            ]
        );
    }

    #[test]
    fn test_caret_only_while_typing_and_incomplete() {
        let reference = chars("abc");

        assert_eq!(render(&chars("ab"), &reference, true).last(), Some(&Token::Caret));
        assert_ne!(render(&chars("ab"), &reference, false).last(), Some(&Token::Caret));
        assert!(!render(&reference, &reference, true).contains(&Token::Caret));
        assert_eq!(render(&[], &reference, true), vec![Token::Caret]);
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#039;&amp;&#039;&lt;/a&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_to_markup() {
        let tokens = render(&chars("a<X"), &chars("a<bc"), true);
        assert_eq!(
            to_markup(&tokens),
            "a&lt;<span class=\"wrong\">X</span><span class=\"caret\">&nbsp;</span>"
        );
    }
}
