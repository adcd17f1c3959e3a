//! # Buffer Module - Typed Text and Caret
//!
//! The [`TypedBuffer`] holds what the learner has typed for the active exercise, together with
//! the caret position. It mirrors a plain text area: characters are inserted at the caret,
//! deletions happen on either side of it, and the arrow keys move it around.
//!
//! The buffer itself does not validate anything. Every mutation is expected to go through the
//! [`validator`](crate::validator) first.
//!
//! ```text
//! Chars: [a][b][\n][c][d]
//! Caret:                    ^ (5)
//! Lines: [-line 0-]  [line 1]
//! ```

use std::fmt::Display;

/// Typed characters plus caret position
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypedBuffer {
    chars: Vec<char>,
    /// Index the next insertion goes to. Always `<= chars.len()`
    caret: usize,
}

impl TypedBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer holding `text` with the caret at the end
    pub fn from_chars(text: &[char]) -> Self {
        Self {
            chars: text.to_vec(),
            caret: text.len(),
        }
    }

    pub fn as_chars(&self) -> &[char] {
        &self.chars
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    /// Returns true if the buffer is exactly `reference`
    pub fn matches(&self, reference: &[char]) -> bool {
        self.chars == reference
    }

    /// Insert `text` at the caret and move the caret past it
    pub fn insert(&mut self, text: &str) {
        for char in text.chars() {
            self.chars.insert(self.caret, char);
            self.caret += 1;
        }
    }

    /// Delete the character before the caret
    pub fn delete_backward(&mut self) -> Option<char> {
        if self.caret == 0 {
            return None;
        }

        self.caret -= 1;
        Some(self.chars.remove(self.caret))
    }

    /// Delete the character after the caret
    pub fn delete_forward(&mut self) -> Option<char> {
        (self.caret < self.chars.len()).then(|| self.chars.remove(self.caret))
    }

    pub fn move_left(&mut self) {
        self.caret = self.caret.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.caret = (self.caret + 1).min(self.chars.len());
    }

    /// Move the caret to the same column on the previous line
    ///
    /// On the first line the caret jumps to the start of the buffer.
    pub fn move_up(&mut self) {
        let line_start = self.line_start(self.caret);
        if line_start == 0 {
            self.caret = 0;
            return;
        }

        let column = self.caret - line_start;
        // `line_start - 1` is the newline ending the previous line
        let previous_start = self.line_start(line_start - 1);
        let previous_len = line_start - 1 - previous_start;
        self.caret = previous_start + column.min(previous_len);
    }

    /// Move the caret to the same column on the next line
    ///
    /// On the last line the caret jumps to the end of the buffer.
    pub fn move_down(&mut self) {
        let Some(line_end) = self.line_end(self.caret) else {
            self.caret = self.chars.len();
            return;
        };

        let column = self.caret - self.line_start(self.caret);
        let next_start = line_end + 1;
        let next_len = self
            .line_end(next_start)
            .unwrap_or(self.chars.len())
            .saturating_sub(next_start);
        self.caret = next_start + column.min(next_len);
    }

    /// Characters typed since the last line break
    pub fn current_line(&self) -> &[char] {
        let start = self.line_start(self.chars.len());
        &self.chars[start..]
    }

    /// Index of the first character of the line containing `index`
    fn line_start(&self, index: usize) -> usize {
        self.chars[..index]
            .iter()
            .rposition(|char| *char == '\n')
            .map_or(0, |newline| newline + 1)
    }

    /// Index of the newline ending the line containing `index`, if there is one
    fn line_end(&self, index: usize) -> Option<usize> {
        self.chars[index..]
            .iter()
            .position(|char| *char == '\n')
            .map(|offset| index + offset)
    }
}

impl Display for TypedBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.chars.iter().try_for_each(|char| write!(f, "{char}"))
    }
}
