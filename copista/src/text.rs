//! # Text Module - Exercises and Reference Text
//!
//! An [`Exercise`] is one file the learner must transcribe verbatim. Its reference text is
//! normalized once on creation and never mutated afterwards.

/// Normalize every line ending to a single `\n`
///
/// Both `\r\n` and lone `\r` become `\n`.
///
/// ```rust
/// use copista::text::normalize_line_endings;
///
/// assert_eq!(normalize_line_endings("a\r\nb\rc\n"), "a\nb\nc\n");
/// ```
pub fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// A loaded exercise: an identifier and its immutable reference text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exercise {
    name: String,
    reference: Vec<char>,
}

impl Exercise {
    /// Create an exercise, normalizing the line endings of `text`
    pub fn new(name: impl Into<String>, text: &str) -> Self {
        Self {
            name: name.into(),
            reference: normalize_line_endings(text).chars().collect(),
        }
    }

    /// The identifier (file name) of the exercise
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The reference text as characters
    pub fn reference(&self) -> &[char] {
        &self.reference
    }

    /// The reference text as a string
    pub fn reference_string(&self) -> String {
        self.reference.iter().collect()
    }

    /// Number of characters in the reference text
    pub fn len(&self) -> usize {
        self.reference.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reference.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_crlf_and_cr() {
        assert_eq!(normalize_line_endings("one\r\ntwo"), "one\ntwo");
        assert_eq!(normalize_line_endings("one\rtwo"), "one\ntwo");
        assert_eq!(normalize_line_endings("one\r\r\ntwo"), "one\n\ntwo");
        assert_eq!(normalize_line_endings("plain"), "plain");
    }

    #[test]
    fn test_exercise_counts_characters_not_bytes() {
        let exercise = Exercise::new("cafe.txt", "café\r\n");
        assert_eq!(exercise.name(), "cafe.txt");
        assert_eq!(exercise.len(), 5);
        assert_eq!(exercise.reference_string(), "café\n");
        assert!(!exercise.is_empty());
    }

    #[test]
    fn test_empty_exercise() {
        let exercise = Exercise::new("empty.txt", "");
        assert!(exercise.is_empty());
        assert_eq!(exercise.len(), 0);
    }
}
