use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};
use terminal_colorsaurus::QueryOptions;

/// General theme
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct Theme {
    pub text: TextTheme,
    pub cursor: CursorTheme,
    pub controls: ControlsTheme,
    pub progress: Color,
    pub term_fg: Color,
    pub term_bg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        let terminal_palette = terminal_colorsaurus::color_palette(QueryOptions::default()).ok();

        let (term_fg, term_bg) = if let Some(palette) = terminal_palette {
            let fg = palette.foreground.scale_to_8bit();
            let bg = palette.background.scale_to_8bit();
            (Color::Rgb(fg.0, fg.1, fg.2), Color::Rgb(bg.0, bg.1, bg.2))
        } else {
            (Color::Rgb(255, 255, 255), Color::Rgb(0, 0, 0))
        };

        Self {
            text: TextTheme::default(),
            cursor: CursorTheme::default(),
            controls: ControlsTheme::default(),
            progress: Color::Green,
            term_fg,
            term_bg,
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct CursorTheme {
    pub color: Color,
    pub text: Color,
}

impl Default for CursorTheme {
    fn default() -> Self {
        Self {
            color: Color::White,
            text: Color::Black,
        }
    }
}

impl CursorTheme {
    pub fn style(&self) -> Style {
        Style::new().fg(self.text).bg(self.color)
    }
}

/// Text color theme
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct TextTheme {
    /// Correctly typed characters
    pub correct: Color,
    /// Everything from the first mistake onward
    pub incorrect: Color,
    /// Reference text that hasn't been typed yet
    pub pending: Color,
    pub highlight: Color,
}

impl Default for TextTheme {
    fn default() -> Self {
        Self {
            correct: Color::Green,
            incorrect: Color::Red,
            pending: Color::DarkGray,
            highlight: Color::Yellow,
        }
    }
}

/// Previous/next control colors
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct ControlsTheme {
    pub enabled: Color,
    pub disabled: Color,
}

impl Default for ControlsTheme {
    fn default() -> Self {
        Self {
            enabled: Color::Cyan,
            disabled: Color::DarkGray,
        }
    }
}

impl ControlsTheme {
    pub fn style(&self, enabled: bool) -> Style {
        if enabled {
            Style::new().fg(self.enabled).add_modifier(Modifier::BOLD)
        } else {
            Style::new().fg(self.disabled).add_modifier(Modifier::DIM)
        }
    }
}
