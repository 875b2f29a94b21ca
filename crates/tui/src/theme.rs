//! Theme system

use ratatui::style::{Color, Modifier, Style};

/// Available themes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeType {
    /// Default dark theme
    Dark,
    /// Light theme
    Light,
}

impl Default for ThemeType {
    fn default() -> Self {
        Self::Dark
    }
}

impl ThemeType {
    /// Returns the theme name
    pub fn name(&self) -> &str {
        match self {
            ThemeType::Dark => "Dark",
            ThemeType::Light => "Light",
        }
    }
}

/// Color theme
#[derive(Debug, Clone)]
pub struct Theme {
    /// Theme type
    pub theme_type: ThemeType,
    /// Primary text color
    pub text: Color,
    /// Secondary text color
    pub text_secondary: Color,
    /// Highlight/selection color
    pub highlight: Color,
    /// Accent color
    pub accent: Color,
    /// Success color
    pub success: Color,
    /// Error color
    pub error: Color,
    /// Border color
    pub border: Color,
    /// Playing indicator
    pub playing: Color,
    /// Paused indicator
    pub paused: Color,
}

impl Theme {
    /// Creates a new theme
    pub fn new(theme_type: ThemeType) -> Self {
        match theme_type {
            ThemeType::Dark => Self::dark(),
            ThemeType::Light => Self::light(),
        }
    }

    /// Dark theme (default)
    fn dark() -> Self {
        Self {
            theme_type: ThemeType::Dark,
            text: Color::White,
            text_secondary: Color::Gray,
            highlight: Color::Yellow,
            accent: Color::Cyan,
            success: Color::Green,
            error: Color::Red,
            border: Color::Gray,
            playing: Color::Green,
            paused: Color::Red,
        }
    }

    /// Light theme
    fn light() -> Self {
        Self {
            theme_type: ThemeType::Light,
            text: Color::Black,
            text_secondary: Color::DarkGray,
            highlight: Color::Blue,
            accent: Color::Magenta,
            success: Color::Green,
            error: Color::Red,
            border: Color::DarkGray,
            playing: Color::Green,
            paused: Color::Red,
        }
    }

    /// Returns base text style
    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text)
    }

    /// Returns secondary text style
    pub fn text_secondary_style(&self) -> Style {
        Style::default().fg(self.text_secondary)
    }

    /// Returns highlighted style
    pub fn highlight_style(&self) -> Style {
        Style::default()
            .fg(self.highlight)
            .add_modifier(Modifier::BOLD)
    }

    /// Returns accent style
    pub fn accent_style(&self) -> Style {
        Style::default().fg(self.accent)
    }

    /// Returns success style
    pub fn success_style(&self) -> Style {
        Style::default().fg(self.success)
    }

    /// Returns error style
    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    /// Style for transport controls that are currently unavailable
    pub fn disabled_style(&self) -> Style {
        Style::default()
            .fg(self.text_secondary)
            .add_modifier(Modifier::DIM)
    }

    /// Returns border color
    pub fn border_color(&self) -> Color {
        self.border
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
