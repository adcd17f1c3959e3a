//! # Validator Module - Keystroke Acceptance
//!
//! Decides, per raw keystroke, whether the key is applied to the [`TypedBuffer`] or suppressed.
//! Validation always happens *before* the buffer is mutated, against the current buffer and the
//! reference text of the active exercise.
//!
//! ## Rules
//!
#![doc = simple_mermaid::mermaid!("../diagrams/keystroke_validation.mmd")]
//!
//! 1. Editing and movement keys are always accepted.
//! 2. Once the typed buffer contains a mismatch anywhere, every other key is suppressed. Only
//!    deleting gets the learner out of that state (prefix-lock).
//! 3. `Enter` is only accepted while the current line matches the reference.
//! 4. `Tab` is never typed literally. It inserts the indentation the reference expects at the
//!    caret (one tab, or four spaces), or nothing.
//! 5. Pasting is always suppressed.
//!
//! Rejections are not errors. A suppressed key simply never shows up in the buffer.
//!
//! ```rust
//! use copista::TypedBuffer;
//! use copista::validator::{validate, Key, Verdict};
//!
//! let reference: Vec<char> = "    foo".chars().collect();
//! let typed = TypedBuffer::new();
//!
//! assert_eq!(validate(Key::Tab, &typed, &reference), Verdict::Insert("    ".to_string()));
//! ```

use crate::buffer::TypedBuffer;
use crate::render::first_mismatch;

/// Number of spaces a `Tab` expands to when the reference is indented with spaces
pub const INDENT_WIDTH: usize = 4;

/// A raw keystroke, independent of the UI toolkit that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Tab,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    /// Any key without a meaning for the text area (function keys, media keys...)
    Other,
}

impl Key {
    /// Editing and movement keys bypass validation
    pub const fn is_editing(self) -> bool {
        matches!(
            self,
            Self::Backspace | Self::Delete | Self::Left | Self::Right | Self::Up | Self::Down
        )
    }
}

/// The outcome of validating a keystroke
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Apply the key as usual
    Accept,
    /// Drop the key, the buffer stays as it is
    Suppress,
    /// Drop the key and insert this text at the caret instead
    Insert(String),
}

/// Validate `key` against the typed buffer and the reference text
pub fn validate(key: Key, typed: &TypedBuffer, reference: &[char]) -> Verdict {
    if key.is_editing() {
        return Verdict::Accept;
    }

    // Prefix-lock
    if first_mismatch(typed.as_chars(), reference).is_some() {
        return Verdict::Suppress;
    }

    match key {
        Key::Char(_) => Verdict::Accept,
        Key::Enter if current_line_matches(typed, reference) => Verdict::Accept,
        Key::Enter => Verdict::Suppress,
        Key::Tab => {
            indentation_at(reference, typed.caret()).map_or(Verdict::Suppress, Verdict::Insert)
        }
        _ => Verdict::Suppress,
    }
}

/// Pasted text never reaches the buffer
pub const fn validate_paste() -> Verdict {
    Verdict::Suppress
}

/// Checks that the text typed since the last line break equals the reference at the same offset
fn current_line_matches(typed: &TypedBuffer, reference: &[char]) -> bool {
    let line = typed.current_line();
    let start = typed.len() - line.len();

    reference
        .get(start..start + line.len())
        .is_some_and(|expected| expected == line)
}

/// The indentation the reference expects at `caret`, if any
fn indentation_at(reference: &[char], caret: usize) -> Option<String> {
    if reference.get(caret) == Some(&'\t') {
        return Some("\t".to_string());
    }

    reference
        .get(caret..caret + INDENT_WIDTH)
        .filter(|expected| expected.iter().all(|char| *char == ' '))
        .map(|spaces| spaces.iter().collect())
}
