use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block, BorderType, Padding},
};

/// A block with a rounded border
pub const ROUNDED_BLOCK: Block = Block::bordered().border_type(BorderType::Rounded);

pub fn center(area: Rect, horizontal: Constraint, vertical: Constraint) -> Rect {
    let [area_horizontal] = Layout::horizontal([horizontal])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([vertical])
        .flex(Flex::Center)
        .areas(area_horizontal);
    area
}

/// Padding that centers content of the given height/width inside `area`
pub fn centered_padding(area: Rect, height: Option<u16>, width: Option<u16>) -> Padding {
    let vertical = height.map_or(0, |height| area.height.saturating_sub(height) / 2);
    let horizontal = width.map_or(0, |width| area.width.saturating_sub(width) / 2);
    Padding::new(horizontal, horizontal, vertical, 0)
}

/// A trait defining helper methods for keyevents
pub trait KeyEventHelper {
    /// Returns true if the keyevent contains a pressed key
    fn is_press(&self) -> bool;

    /// Returns true if the keyevent contains the given modifiers
    fn has_mods(&self, mods: KeyModifiers) -> bool;

    /// Returns true if the keyevent contains a character that matches the input
    fn is_char(&self, character: char) -> bool;

    /// Returns true if the keyevent matches the given character, and is being pressed
    fn is_press_char(&self, character: char) -> bool {
        self.is_press() && self.is_char(character)
    }

    /// Returns true if the keyevent matches the given character, and is being pressed with CTRL as
    /// a modifier.
    fn is_ctrl_press_char(&self, character: char) -> bool {
        self.has_mods(KeyModifiers::CONTROL) && self.is_press_char(character)
    }

    /// Returns true if the key is a shortcut (CTRL or ALT held) rather than text input
    fn is_shortcut(&self) -> bool {
        self.has_mods(KeyModifiers::CONTROL) || self.has_mods(KeyModifiers::ALT)
    }
}

impl KeyEventHelper for KeyEvent {
    fn is_press(&self) -> bool {
        self.kind == KeyEventKind::Press
    }

    fn is_char(&self, character: char) -> bool {
        self.code == KeyCode::Char(character)
    }

    fn has_mods(&self, mods: KeyModifiers) -> bool {
        self.modifiers.contains(mods)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_padding() {
        let area = Rect::new(0, 0, 40, 20);
        let padding = centered_padding(area, Some(4), None);
        assert_eq!(padding.top, 8);
        assert_eq!(padding.left, 0);

        let padding = centered_padding(area, Some(30), Some(10));
        assert_eq!(padding.top, 0);
        assert_eq!(padding.left, 15);
        assert_eq!(padding.right, 15);
    }

    #[test]
    fn test_key_event_helper() {
        let key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(key.is_ctrl_press_char('q'));
        assert!(key.is_shortcut());

        let key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::SHIFT);
        assert!(key.is_press_char('q'));
        assert!(!key.is_shortcut());
    }
}
