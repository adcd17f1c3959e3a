use std::io::stdout;

use copista::{
    Key, Notification, Session, Timestamp, Token, completion::format_rate,
    validator::INDENT_WIDTH,
};
use crossterm::event::{Event, KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Clear, Gauge, Paragraph},
};
use strum::Display;
use tracing::{debug, warn};

use crate::{
    config::{Config, theme::Theme},
    library::{Library, LibraryError, Loader},
    sound,
    utils::{KeyEventHelper, ROUNDED_BLOCK, center},
};

use super::Message;

/// Shown in place of a mistyped line break
const NEWLINE_MARKER: &str = "↵";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
enum Control {
    #[strum(to_string = "< Prev")]
    Previous,
    #[strum(to_string = "Next >")]
    Next,
}

/// Screen areas from the last frame, used for mouse hit tests
#[derive(Debug, Default)]
struct Areas {
    text: Rect,
    previous: Rect,
    next: Rect,
}

/// Page: Exercise
///
/// Drives a [`Session`] over every exercise in the manifest
#[derive(Debug)]
pub struct Exercise {
    session: Session,
    loader: Loader,
    popup: Option<Notification>,
    sound: bool,
    areas: Areas,
}

impl Exercise {
    /// Read the manifest and start loading the first exercise
    pub fn open(config: &Config) -> Result<Self, LibraryError> {
        let library = Library::new(config.exercises_dir());
        debug!(dir = %library.dir().display(), manifest = %config.settings.manifest, "opening exercises");
        let session = library.manifest(&config.settings.manifest)?.into_session()?;

        let mut page = Self {
            session,
            loader: Loader::new(library),
            popup: None,
            sound: config.settings.sound,
            areas: Areas::default(),
        };

        if let Some(ticket) = page.session.load_exercise(0) {
            page.loader.load(ticket);
        }

        Ok(page)
    }

    /// Apply an event to the session and carry out its effects
    fn apply(&mut self, event: copista::Event) {
        for effect in self.session.apply(event) {
            match effect {
                copista::Effect::Load(ticket) => self.loader.load(ticket),
                copista::Effect::PlaySound => {
                    if self.sound
                        && let Err(error) = sound::bell(&mut stdout())
                    {
                        warn!(%error, "failed to ring the bell");
                    }
                }
                copista::Effect::Notify(notification) => self.popup = Some(notification),
            }
        }
    }

    /// Close the popup, continuing after a per-exercise result
    fn dismiss_popup(&mut self) {
        if let Some(Notification::ExerciseComplete(_)) = self.popup.take() {
            self.apply(copista::Event::Continue);
        }
    }
}

/// Translate a terminal key into a typing key. Shortcuts never type
fn map_key(key: &KeyEvent) -> Option<Key> {
    if key.is_shortcut() {
        return None;
    }

    let key = match key.code {
        KeyCode::Char(char) => Key::Char(char),
        KeyCode::Enter => Key::Enter,
        KeyCode::Tab => Key::Tab,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        _ => Key::Other,
    };

    Some(key)
}

// Event handling
impl Exercise {
    pub fn poll(&mut self, _config: &Config) -> Option<Message> {
        while let Some(outcome) = self.loader.try_recv() {
            self.apply(outcome.into_event());
        }

        None
    }

    pub fn handle_events(&mut self, event: &Event, _config: &Config) -> Option<Message> {
        match event {
            Event::Paste(_) => self.apply(copista::Event::Paste),
            Event::Key(key) if key.is_press() => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            _ => (),
        }

        None
    }

    fn handle_key(&mut self, key: &KeyEvent) {
        if self.popup.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.dismiss_popup();
            }
            return;
        }

        if self.session.typing_enabled() {
            if key.code == KeyCode::Esc {
                self.apply(copista::Event::Blur);
            } else if let Some(typed) = map_key(key) {
                self.apply(copista::Event::Key {
                    key: typed,
                    at: Timestamp::now(),
                });
            }
            return;
        }

        match key.code {
            KeyCode::Left => self.apply(copista::Event::Retreat),
            KeyCode::Right => self.apply(copista::Event::Advance),
            KeyCode::Enter => self.apply(copista::Event::Focus),
            _ => (),
        }
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent) {
        if self.popup.is_some() || mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }

        let position = Position::new(mouse.column, mouse.row);
        let event = if self.areas.previous.contains(position) {
            copista::Event::Retreat
        } else if self.areas.next.contains(position) {
            copista::Event::Advance
        } else if self.areas.text.contains(position) {
            copista::Event::Focus
        } else {
            copista::Event::Blur
        };

        debug!(?event, column = mouse.column, row = mouse.row, "click");
        self.apply(event);
    }
}

/// The typed overlay laid out in lines
struct Overlay {
    lines: Vec<Line<'static>>,
    /// Caret column and row, only while typing
    caret: Option<(usize, usize)>,
    /// Where the typed text ends
    typed_end: (usize, usize),
}

impl Overlay {
    /// The position to keep in view
    fn focus(&self) -> (usize, usize) {
        self.caret.unwrap_or(self.typed_end)
    }
}

struct OverlayBuilder {
    lines: Vec<Line<'static>>,
    current: Vec<Span<'static>>,
    column: usize,
    caret: Option<(usize, usize)>,
    /// Set right after the caret, applied to the next cell
    caret_style: Option<Style>,
}

impl OverlayBuilder {
    const fn new() -> Self {
        Self {
            lines: Vec::new(),
            current: Vec::new(),
            column: 0,
            caret: None,
            caret_style: None,
        }
    }

    fn position(&self) -> (usize, usize) {
        (self.column, self.lines.len())
    }

    fn push_span(&mut self, text: String, style: Style) {
        let style = match self.caret_style.take() {
            Some(caret) => style.patch(caret),
            None => style,
        };
        let span = Span::styled(text, style);
        self.column += span.width();
        self.current.push(span);
    }

    fn break_line(&mut self) {
        if let Some(caret) = self.caret_style.take() {
            self.push_span(" ".to_string(), caret);
        }
        self.lines.push(Line::from(std::mem::take(&mut self.current)));
        self.column = 0;
    }

    fn push(&mut self, char: char, style: Style) {
        match char {
            '\n' => self.break_line(),
            '\t' => self.push_span(" ".repeat(INDENT_WIDTH), style),
            char => self.push_span(char.to_string(), style),
        }
    }

    /// A mistyped line break stays visible before the break itself
    fn push_marked_newline(&mut self, style: Style) {
        self.push_span(NEWLINE_MARKER.to_string(), style);
        self.break_line();
    }

    fn caret(&mut self, style: Style) {
        self.caret = Some(self.position());
        self.caret_style = Some(style);
    }

    fn finish(mut self) -> (Vec<Line<'static>>, Option<(usize, usize)>) {
        if let Some(caret) = self.caret_style.take() {
            self.push_span(" ".to_string(), caret);
        }
        self.lines.push(Line::from(self.current));
        (self.lines, self.caret)
    }
}

/// Scroll offsets `(vertical, horizontal)` keeping `focus` in a `width` x `height` view, and the
/// caret's position inside the view when it is visible
///
/// Offsets past `u16::MAX` saturate, the view then stops short of the focus.
fn viewport(
    focus: (usize, usize),
    caret: Option<(usize, usize)>,
    width: u16,
    height: u16,
) -> ((u16, u16), Option<(u16, u16)>) {
    let offset = |position: usize, size: u16| {
        let offset = position.saturating_sub(usize::from(size.saturating_sub(1)));
        u16::try_from(offset).unwrap_or(u16::MAX)
    };
    let inside = |position: usize, offset: u16, size: u16| {
        position
            .checked_sub(usize::from(offset))
            .and_then(|position| u16::try_from(position).ok())
            .filter(|position| *position < size)
    };

    let horizontal = offset(focus.0, width);
    let vertical = offset(focus.1, height);

    let cursor = caret.and_then(|(column, row)| {
        Some((
            inside(column, horizontal, width)?,
            inside(row, vertical, height)?,
        ))
    });

    ((vertical, horizontal), cursor)
}

/// Move the caret token from the end of the input to the caret position
fn place_caret(mut tokens: Vec<Token>, caret: usize) -> Vec<Token> {
    let Some(index) = tokens.iter().position(|token| *token == Token::Caret) else {
        return tokens;
    };

    tokens.remove(index);
    tokens.insert(caret.min(tokens.len()), Token::Caret);
    tokens
}

/// Lay out the typed tokens over the rest of the reference text
fn overlay(tokens: &[Token], pending: &[char], theme: &Theme) -> Overlay {
    let text = &theme.text;
    let correct = Style::new().fg(text.correct).add_modifier(Modifier::BOLD);
    let incorrect = Style::new().fg(text.incorrect).add_modifier(Modifier::BOLD);
    let pending_style = Style::new().fg(text.pending);

    let mut builder = OverlayBuilder::new();

    for token in tokens {
        match *token {
            Token::Correct(char) => builder.push(char, correct),
            Token::Incorrect('\n') => builder.push_marked_newline(incorrect),
            Token::Incorrect(' ') => builder.push(' ', Style::new().bg(text.incorrect)),
            Token::Incorrect(char) => builder.push(char, incorrect),
            Token::Caret => builder.caret(theme.cursor.style()),
        }
    }

    let typed_end = builder.position();

    for char in pending {
        builder.push(*char, pending_style);
    }

    let (lines, caret) = builder.finish();
    Overlay {
        lines,
        caret,
        typed_end,
    }
}

// Rendering logic
impl Exercise {
    pub fn render(&mut self, frame: &mut Frame, area: Rect, config: &Config) {
        let theme = &config.settings.theme;

        let [progress_area, text_area, controls_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .areas(area);

        self.render_progress(frame, progress_area, theme);
        self.render_text(frame, text_area, theme);
        self.render_controls(frame, controls_area, theme);

        if let Some(popup) = &self.popup {
            render_popup(frame, area, popup, theme);
        }
    }

    fn render_progress(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let label = format!(
            "{}/{}",
            self.session.completed_count(),
            self.session.exercise_count()
        );
        let gauge = Gauge::default()
            .gauge_style(Style::new().fg(theme.progress).bg(theme.term_bg))
            .ratio(self.session.progress().clamp(0.0, 1.0))
            .label(label);

        frame.render_widget(gauge, area);
    }

    fn render_text(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let border = if self.session.typing_enabled() {
            Style::new().fg(theme.text.highlight)
        } else {
            Style::new().fg(theme.term_fg)
        };
        let name = self
            .session
            .exercise_name(self.session.current_index())
            .unwrap_or_default()
            .to_string();

        let block = ROUNDED_BLOCK.border_style(border).title_top(name);
        let inner = block.inner(area);
        self.areas.text = area;
        frame.render_widget(block, area);

        let Some(exercise) = self.session.exercise() else {
            let message = match self.session.load_error() {
                Some(error) => Line::styled(error.to_string(), Style::new().fg(theme.text.incorrect)),
                None => Line::from("Loading..."),
            };
            frame.render_widget(Paragraph::new(message).centered(), inner);
            return;
        };

        let pending = exercise
            .reference()
            .get(self.session.typed().len()..)
            .unwrap_or_default();
        let tokens = place_caret(self.session.render(), self.session.typed().caret());
        let overlay = overlay(&tokens, pending, theme);

        let (scroll, cursor) =
            viewport(overlay.focus(), overlay.caret, inner.width, inner.height);

        frame.render_widget(Paragraph::new(overlay.lines).scroll(scroll), inner);

        if self.popup.is_none()
            && let Some((column, row)) = cursor
        {
            frame.set_cursor_position((inner.x + column, inner.y + row));
        }
    }

    fn render_controls(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let [previous, hint, next] = Layout::horizontal([
            Constraint::Length(8),
            Constraint::Fill(1),
            Constraint::Length(8),
        ])
        .areas(area);

        self.areas.previous = previous;
        self.areas.next = next;

        let controls = &theme.controls;
        frame.render_widget(
            Line::styled(
                Control::Previous.to_string(),
                controls.style(self.session.can_retreat()),
            ),
            previous,
        );
        frame.render_widget(
            Line::styled(
                Control::Next.to_string(),
                controls.style(self.session.can_advance()),
            )
            .right_aligned(),
            next,
        );
        frame.render_widget(Line::from(self.hint()).centered().dim(), hint);
    }

    fn hint(&self) -> &'static str {
        if self.session.is_loading() {
            ""
        } else if self.session.typing_enabled() {
            "<Esc> to stop typing"
        } else if self.session.is_completed(self.session.current_index()) {
            if self.session.can_advance() {
                "Completed! <Right> for the next exercise"
            } else {
                "Completed!"
            }
        } else {
            "<Enter> or click the text to start typing"
        }
    }

    pub fn render_top(&self, config: &Config) -> Option<Line<'_>> {
        let index = self.session.current_index();
        let name = self.session.exercise_name(index).unwrap_or_default();
        let position = format!("[{}/{}] {name}", index + 1, self.session.exercise_count());

        if self.session.load_error().is_some() {
            return Some(Line::styled(
                format!("{position}: failed to load"),
                Style::new().fg(config.settings.theme.text.incorrect),
            ));
        }

        let elapsed = self.session.elapsed(Timestamp::now()).as_secs();
        let minutes = elapsed / 60;
        let seconds = elapsed % 60;

        let state = self.session.progress_state();

        Some(Line::raw(format!(
            "{position} ({state}) {minutes}:{seconds:0>2}"
        )))
    }
}

fn render_popup(frame: &mut Frame, area: Rect, popup: &Notification, theme: &Theme) {
    let (title, lines) = match popup {
        Notification::ExerciseComplete(result) => (
            "Exercise complete",
            vec![
                Line::from("Speed:"),
                Line::from(format!(
                    "{} characters per second",
                    format_rate(result.throughput)
                ))
                .bold(),
                Line::default(),
                Line::from("<Enter> Continue").dim(),
            ],
        ),
        Notification::Summary(summary) => (
            "All done",
            vec![
                Line::from("You finished every exercise!"),
                Line::from("Average speed:"),
                Line::from(format!(
                    "{} characters per second",
                    format_rate(summary.mean_throughput)
                ))
                .bold(),
                Line::from("<Enter> Close").dim(),
            ],
        ),
    };

    let height = lines.len() as u16 + 2;
    let area = center(area, Constraint::Length(44), Constraint::Length(height));
    let block = ROUNDED_BLOCK
        .border_style(Style::new().fg(theme.text.highlight))
        .title_top(Line::from(title).bold().centered());

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(lines).centered().block(block), area);
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crossterm::event::KeyModifiers;

    use super::*;

    const TIMEOUT: Duration = Duration::from_secs(5);

    fn text_of(line: &Line) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn open(files: &[(&str, &str)]) -> (tempfile::TempDir, Config, Exercise) {
        let dir = tempfile::tempdir().unwrap();
        let exercises = dir.path().join("exercises");
        std::fs::create_dir_all(&exercises).unwrap();

        let names: Vec<&str> = files.iter().map(|(name, _)| *name).collect();
        std::fs::write(
            exercises.join("index.json"),
            serde_json::json!({ "files": names }).to_string(),
        )
        .unwrap();
        for (name, contents) in files {
            std::fs::write(exercises.join(name), contents).unwrap();
        }

        let mut config = Config::get(Some(dir.path().join("config"))).unwrap();
        config.settings.exercises_dir = Some(exercises);
        config.settings.sound = false;

        let page = Exercise::open(&config).unwrap();
        (dir, config, page)
    }

    fn wait_for_load(page: &mut Exercise) {
        let outcome = page.loader.recv_timeout(TIMEOUT).unwrap();
        page.apply(outcome.into_event());
        assert!(!page.session.is_loading());
    }

    fn type_text(page: &mut Exercise, config: &Config, text: &str) {
        for char in text.chars() {
            let code = match char {
                '\n' => KeyCode::Enter,
                '\t' => KeyCode::Tab,
                char => KeyCode::Char(char),
            };
            page.handle_events(&press(code), config);
        }
    }

    #[test]
    fn test_key_mapping() {
        let key = |code, modifiers| map_key(&KeyEvent::new(code, modifiers));

        assert_eq!(key(KeyCode::Char('a'), KeyModifiers::NONE), Some(Key::Char('a')));
        assert_eq!(key(KeyCode::Char('A'), KeyModifiers::SHIFT), Some(Key::Char('A')));
        assert_eq!(key(KeyCode::Enter, KeyModifiers::NONE), Some(Key::Enter));
        assert_eq!(key(KeyCode::Tab, KeyModifiers::NONE), Some(Key::Tab));
        assert_eq!(key(KeyCode::Home, KeyModifiers::NONE), Some(Key::Other));
        assert_eq!(key(KeyCode::Char('v'), KeyModifiers::CONTROL), None);
        assert_eq!(key(KeyCode::Char('x'), KeyModifiers::ALT), None);
    }

    #[test]
    fn test_overlay_marks_mistakes_and_caret() {
        let theme = Theme::default();
        let tokens = [
            Token::Correct('a'),
            Token::Correct('b'),
            Token::Incorrect('X'),
            Token::Caret,
        ];

        let overlay = overlay(&tokens, &['\n', 'd'], &theme);
        let lines: Vec<String> = overlay.lines.iter().map(text_of).collect();

        assert_eq!(lines, vec!["abX ", "d"]);
        assert_eq!(overlay.caret, Some((3, 0)));
        assert_eq!(overlay.typed_end, (3, 0));
    }

    #[test]
    fn test_overlay_handles_very_long_lines() {
        let theme = Theme::default();
        let long_line: Vec<char> = "x".repeat(70_000).chars().collect();

        let untyped = overlay(&[Token::Caret], &long_line, &theme);
        assert_eq!(untyped.caret, Some((0, 0)));
        assert_eq!(untyped.lines.len(), 1);
        assert_eq!(untyped.lines[0].width(), 70_000);

        let mut tokens = vec![Token::Correct('x'); 70_000];
        tokens.push(Token::Caret);
        let typed = overlay(&tokens, &['y'], &theme);
        assert_eq!(typed.caret, Some((70_000, 0)));
        assert_eq!(typed.typed_end, (70_000, 0));
    }

    #[test]
    fn test_viewport_keeps_the_caret_in_view() {
        assert_eq!(viewport((5, 2), Some((5, 2)), 80, 10), ((0, 0), Some((5, 2))));
        assert_eq!(
            viewport((100, 30), Some((100, 30)), 80, 10),
            ((21, 21), Some((79, 9)))
        );
        // Not typing, nothing to place
        assert_eq!(viewport((100, 0), None, 80, 10), ((0, 21), None));
    }

    #[test]
    fn test_viewport_saturates_past_u16() {
        let (scroll, cursor) = viewport((70_000, 70_000), Some((70_000, 70_000)), 80, 10);
        assert_eq!(scroll, (u16::MAX, u16::MAX));
        assert_eq!(cursor, None);
    }

    #[test]
    fn test_caret_follows_the_buffer_caret() {
        let tokens = vec![Token::Correct('a'), Token::Correct('b'), Token::Caret];

        assert_eq!(
            place_caret(tokens.clone(), 1),
            vec![Token::Correct('a'), Token::Caret, Token::Correct('b')]
        );
        assert_eq!(place_caret(tokens.clone(), 2), tokens);
        assert_eq!(
            place_caret(vec![Token::Correct('a')], 0),
            vec![Token::Correct('a')]
        );
    }

    #[test]
    fn test_overlay_tabs_and_newlines() {
        let theme = Theme::default();
        let tokens = [Token::Correct('\t'), Token::Correct('x'), Token::Incorrect('\n')];

        let overlay = overlay(&tokens, &['y'], &theme);
        let lines: Vec<String> = overlay.lines.iter().map(text_of).collect();

        let indent = " ".repeat(INDENT_WIDTH);
        assert_eq!(lines, vec![format!("{indent}x{NEWLINE_MARKER}"), "y".to_string()]);
        assert_eq!(overlay.caret, None);
        assert_eq!(overlay.typed_end, (0, 1));
    }

    #[test]
    fn test_keys_are_ignored_until_focused() {
        let (_dir, config, mut page) = open(&[("a.txt", "ab")]);
        wait_for_load(&mut page);

        type_text(&mut page, &config, "ab");
        assert!(page.session.typed().is_empty());

        page.handle_events(&press(KeyCode::Enter), &config);
        assert!(page.session.typing_enabled());

        page.handle_events(&press(KeyCode::Esc), &config);
        assert!(!page.session.typing_enabled());
    }

    #[test]
    fn test_paste_is_suppressed() {
        let (_dir, config, mut page) = open(&[("a.txt", "ab")]);
        wait_for_load(&mut page);
        page.handle_events(&press(KeyCode::Enter), &config);

        page.handle_events(&Event::Paste("ab".to_string()), &config);
        assert!(page.session.typed().is_empty());
        assert!(!page.session.is_completed(0));
    }

    #[test]
    fn test_full_run_through_popups() {
        let (_dir, config, mut page) = open(&[("a.txt", "ab"), ("b.txt", "c\n\td")]);
        wait_for_load(&mut page);

        // Forward navigation is locked until the exercise is done
        page.handle_events(&press(KeyCode::Right), &config);
        assert_eq!(page.session.current_index(), 0);

        page.handle_events(&press(KeyCode::Enter), &config);
        type_text(&mut page, &config, "a");
        std::thread::sleep(Duration::from_millis(5));
        type_text(&mut page, &config, "b");

        assert!(page.session.is_completed(0));
        assert!(matches!(page.popup, Some(Notification::ExerciseComplete(_))));

        // Keys other than the dismiss keys leave the popup alone
        page.handle_events(&press(KeyCode::Char('x')), &config);
        assert!(page.popup.is_some());

        page.handle_events(&press(KeyCode::Enter), &config);
        assert!(page.popup.is_none());
        assert_eq!(page.session.current_index(), 1);
        wait_for_load(&mut page);

        page.handle_events(&press(KeyCode::Enter), &config);
        type_text(&mut page, &config, "c");
        std::thread::sleep(Duration::from_millis(5));
        type_text(&mut page, &config, "\n\td");

        assert!(page.session.is_completed(1));
        assert!(matches!(
            &page.popup,
            Some(Notification::ExerciseComplete(result)) if result.is_last
        ));

        page.handle_events(&press(KeyCode::Enter), &config);
        assert!(matches!(page.popup, Some(Notification::Summary(_))));

        page.handle_events(&press(KeyCode::Enter), &config);
        assert!(page.popup.is_none());
        assert_eq!(page.session.completed_count(), 2);
    }

    #[test]
    fn test_navigating_back_shows_completed_exercise() {
        let (_dir, config, mut page) = open(&[("a.txt", "ab"), ("b.txt", "cd")]);
        wait_for_load(&mut page);

        page.handle_events(&press(KeyCode::Enter), &config);
        type_text(&mut page, &config, "ab");
        page.popup = None;

        page.handle_events(&press(KeyCode::Right), &config);
        assert_eq!(page.session.current_index(), 1);
        wait_for_load(&mut page);

        page.handle_events(&press(KeyCode::Left), &config);
        assert_eq!(page.session.current_index(), 0);
        wait_for_load(&mut page);

        assert_eq!(page.session.typed().to_string(), "ab");
        page.handle_events(&press(KeyCode::Enter), &config);
        assert!(!page.session.typing_enabled());
    }

    #[test]
    fn test_missing_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::get(Some(dir.path().to_path_buf())).unwrap();
        config.settings.exercises_dir = Some(dir.path().join("nowhere"));

        assert!(matches!(
            Exercise::open(&config),
            Err(LibraryError::ReadManifest { .. })
        ));
    }
}
