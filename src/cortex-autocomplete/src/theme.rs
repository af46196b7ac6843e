//! Colors and styles for the autocomplete widget.
//!
//! Ocean/cyan Cortex palette. All renderers read colors from a
//! [`ColorScheme`] so callers can restyle the widget without touching the
//! render functions.

use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::border::Set as BorderSet;

/// Primary accent (#00FFA3).
pub const CYAN_PRIMARY: Color = Color::Rgb(0, 255, 163);
/// Deep void background (#0A1628).
pub const VOID: Color = Color::Rgb(10, 22, 40);
/// Mid surface (#1B2838).
pub const SURFACE_1: Color = Color::Rgb(27, 40, 56);
/// Light surface (#243B53).
pub const SURFACE_2: Color = Color::Rgb(36, 59, 83);
/// Primary text (#FFFFFF).
pub const TEXT: Color = Color::Rgb(255, 255, 255);
/// Secondary text (#829AB1).
pub const TEXT_DIM: Color = Color::Rgb(130, 154, 177);
/// Muted text (#486581).
pub const TEXT_MUTED: Color = Color::Rgb(72, 101, 129);
/// Error accent (#FF6B6B).
pub const ERROR: Color = Color::Rgb(255, 107, 107);

/// Rounded border character set used by the default menu.
pub const ROUNDED_BORDER: BorderSet = BorderSet {
    top_left: "╭",
    top_right: "╮",
    bottom_left: "╰",
    bottom_right: "╯",
    vertical_left: "│",
    vertical_right: "│",
    horizontal_top: "─",
    horizontal_bottom: "─",
};

/// Color configuration for the input, menu and items.
///
/// Use `Default::default()` for the standard Cortex theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorScheme {
    /// Accent for focus, highlight and borders
    pub accent: Color,
    /// Normal text
    pub text: Color,
    /// Secondary text
    pub text_dim: Color,
    /// Placeholder and disabled text
    pub text_muted: Color,
    /// Menu and input background
    pub surface: Color,
    /// Background of the highlighted row
    pub surface_highlight: Color,
    /// Text drawn on top of the accent color
    pub void: Color,
    /// Validation error color
    pub error: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            accent: CYAN_PRIMARY,
            text: TEXT,
            text_dim: TEXT_DIM,
            text_muted: TEXT_MUTED,
            surface: SURFACE_1,
            surface_highlight: SURFACE_2,
            void: VOID,
            error: ERROR,
        }
    }
}

impl ColorScheme {
    /// Builder: override the accent color.
    pub fn with_accent(mut self, color: Color) -> Self {
        self.accent = color;
        self
    }

    /// Builder: override the surface colors.
    pub fn with_surfaces(mut self, surface: Color, highlight: Color) -> Self {
        self.surface = surface;
        self.surface_highlight = highlight;
        self
    }

    /// Suggested style for a menu row.
    ///
    /// Passed to item renderers; non-selectable rows are dimmed.
    pub fn item_style(&self, highlighted: bool, selectable: bool) -> Style {
        if highlighted {
            Style::default()
                .fg(self.accent)
                .bg(self.surface_highlight)
                .add_modifier(Modifier::BOLD)
        } else if selectable {
            Style::default().fg(self.text).bg(self.surface)
        } else {
            Style::default().fg(self.text_muted).bg(self.surface)
        }
    }

    /// Default menu container style.
    pub fn menu_style(&self) -> Style {
        Style::default().fg(self.text).bg(self.surface)
    }

    /// Style of the menu border.
    pub fn menu_border_style(&self) -> Style {
        Style::default().fg(self.accent)
    }

    /// Style of the input text.
    pub fn input_style(&self, focused: bool, disabled: bool) -> Style {
        if disabled {
            Style::default().fg(self.text_muted)
        } else if focused {
            Style::default().fg(self.text).bg(self.surface)
        } else {
            Style::default().fg(self.text_dim)
        }
    }

    /// Style of the caret cell.
    pub fn cursor_style(&self) -> Style {
        Style::default().fg(self.void).bg(self.accent)
    }

    /// Style of selected text inside the input.
    pub fn selection_style(&self) -> Style {
        Style::default().fg(self.void).bg(self.text_dim)
    }
}
