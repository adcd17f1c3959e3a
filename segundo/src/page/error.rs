use std::fmt::Display;

use crossterm::event::{Event, KeyCode};
use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Style, Stylize},
    text::Line,
    widgets::{Block, Paragraph, Wrap},
};

use crate::{
    config::Config,
    utils::{center, centered_padding},
};

use super::Message;

/// Page: Error
///
/// Displays an error that stops the session, like a missing manifest
#[derive(Debug)]
pub struct Error(String);

impl<E: Display> From<E> for Error {
    fn from(value: E) -> Self {
        Self(value.to_string())
    }
}

/// Rendering logic
impl Error {
    pub fn render(&self, frame: &mut Frame, area: Rect, config: &Config) {
        let area = center(area, Constraint::Percentage(80), Constraint::Percentage(80));

        let mut lines = vec![
            Line::styled(
                "[Error]",
                Style::new()
                    .bold()
                    .fg(config.settings.theme.text.incorrect),
            )
            .centered(),
        ];
        lines.extend(self.0.lines().map(|line| Line::from(line).centered()));

        let height = lines.len() as u16;
        let text = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::new().padding(centered_padding(area, Some(height), None)));

        frame.render_widget(text, area);
    }

    pub fn render_top(&self, _config: &Config) -> Option<Line<'_>> {
        Some(Line::from("<Enter> to exit"))
    }

    pub fn handle_events(&self, event: &Event, _config: &Config) -> Option<Message> {
        if let Event::Key(key) = event
            && key.is_press()
            && key.code == KeyCode::Enter
        {
            return Some(Message::Quit);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEvent, KeyModifiers};
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;

    #[test]
    fn test_enter_quits() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::get(Some(dir.path().to_path_buf())).unwrap();
        let page = Error::from("Failed to read manifest");

        let enter = Event::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        assert!(matches!(
            page.handle_events(&enter, &config),
            Some(Message::Quit)
        ));

        let other = Event::Key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE));
        assert!(page.handle_events(&other, &config).is_none());
    }

    #[test]
    fn test_renders_every_line_of_the_message() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::get(Some(dir.path().to_path_buf())).unwrap();
        let page = Error::from("first line\nsecond line");

        let mut terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
        terminal
            .draw(|frame| page.render(frame, frame.area(), &config))
            .unwrap();

        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(screen.contains("[Error]"));
        assert!(screen.contains("first line"));
        assert!(screen.contains("second line"));
    }
}
