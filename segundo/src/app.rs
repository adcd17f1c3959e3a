use std::io::{Write, stdout};
use std::time::Duration;

use crossterm::cursor::SetCursorStyle;
use crossterm::event::{
    self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    Event, KeyEvent,
};
use crossterm::execute;
use ratatui::{Frame, style::Stylize, text::ToLine, widgets::Padding};
use tracing::{info, warn};

use crate::config::Config;
use crate::page;
use crate::utils::{KeyEventHelper, ROUNDED_BLOCK};

/// How long to wait for terminal events before polling the page again
const TICK: Duration = Duration::from_millis(50);

/// An app message
pub enum Message {
    /// Quit the application
    Quit,
}

/// Turn off mouse capture and bracketed paste. Failures are only logged, the terminal still has
/// to be restored afterwards
fn disable_capture(out: &mut impl Write) {
    if let Err(error) = execute!(out, DisableBracketedPaste, DisableMouseCapture) {
        warn!(%error, "failed to disable mouse capture and bracketed paste");
    }
}

/// The app itself
pub struct App {
    page: page::Page,
    config: Config,
}

impl App {
    /// Creates a new `App` showing `page`
    pub const fn new(config: Config, page: page::Page) -> Self {
        Self { page, config }
    }

    /// Runs the app
    pub fn run(&mut self) -> std::io::Result<()> {
        let mut terminal = ratatui::init();

        if let Err(error) = execute!(
            stdout(),
            SetCursorStyle::SteadyBar,
            EnableMouseCapture,
            EnableBracketedPaste
        ) {
            ratatui::restore();
            return Err(error);
        }

        info!("app started");

        let result = self.event_loop(&mut terminal);

        disable_capture(&mut stdout());
        ratatui::restore();

        info!("app stopped");

        result
    }

    fn event_loop(&mut self, terminal: &mut ratatui::DefaultTerminal) -> std::io::Result<()> {
        loop {
            let event = event::poll(TICK)?.then(event::read).transpose()?;
            if let Some(Message::Quit) = self.handle_events(event) {
                break;
            }
            terminal.draw(|frame| self.draw(frame))?;
        }

        Ok(())
    }

    /// Draws the next frame
    fn draw(&mut self, frame: &mut Frame) {
        let mut block = ROUNDED_BLOCK
            .padding(Padding::new(1, 1, 0, 0))
            .title_top("SEGUNDO".to_line().bold().centered())
            .title_top("<CTRL-Q> to exit".to_line().right_aligned());

        if let Some(top_msg) = self.page.render_top(&self.config) {
            block = block.title_top(top_msg);
        }

        let area = frame.area();
        let content = block.inner(area);

        frame.render_widget(block, area);

        self.page.render(frame, content, &self.config);
    }

    /// Global event handler
    fn handle_events(&mut self, event_opt: Option<Event>) -> Option<Message> {
        event_opt
            .and_then(|event| {
                // Global keys come before the page
                if let Event::Key(key) = &event
                    && let Some(message) = Self::handle_key_event(key)
                {
                    return Some(message);
                }
                self.page.handle_events(&event, &self.config)
            })
            .or_else(|| self.page.poll(&self.config))
    }

    /// Global key events
    fn handle_key_event(key: &KeyEvent) -> Option<Message> {
        key.is_ctrl_press_char('q').then_some(Message::Quit)
    }
}
