use ratatui::{prelude::*, style::palette::tailwind};
use serde::{Deserialize, Serialize};

/// Which palette the UI is drawn with
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    /// Label of the toggle, naming the mode it switches to
    pub fn toggle_label(self) -> &'static str {
        match self {
            ThemeMode::Light => "☾ Dark Mode",
            ThemeMode::Dark => "☀ Light Mode",
        }
    }
}

/// Application theme - centralized color and style management
#[derive(Debug, Clone)]
pub struct Theme {
    // Background colors
    pub bg_primary: Color,
    pub bg_secondary: Color,
    pub bg_panel: Color,

    // Text colors
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,

    // Accent colors
    pub accent_primary: Color,
    pub accent_secondary: Color,

    // Status colors
    pub status_success: Color,
    pub status_error: Color,
    pub status_warning: Color,

    // Selection colors
    pub selected_bg: Color,
    pub selected_fg: Color,

    // Search input
    pub input_bg: Color,
    pub input_fg: Color,

    // Table colors
    pub table_header_bg: Color,
    pub table_header_fg: Color,
    pub table_row_fg: Color,
    pub table_row_bg_normal: Color,
    pub table_row_bg_alt: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

impl Theme {
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
        }
    }

    /// Light theme (default) - white rows under a green header
    pub fn light() -> Self {
        Self {
            bg_primary: Color::White,
            bg_secondary: tailwind::GRAY.c100,
            bg_panel: tailwind::GRAY.c50,

            text_primary: tailwind::GRAY.c900,
            text_secondary: tailwind::GRAY.c600,
            text_muted: tailwind::GRAY.c400,

            accent_primary: tailwind::BLUE.c500,
            accent_secondary: tailwind::GREEN.c600,

            status_success: tailwind::GREEN.c600,
            status_error: tailwind::RED.c700,
            status_warning: tailwind::AMBER.c600,

            selected_bg: tailwind::GRAY.c200,
            selected_fg: tailwind::GRAY.c900,

            input_bg: tailwind::GRAY.c800,
            input_fg: Color::White,

            table_header_bg: tailwind::GREEN.c700,
            table_header_fg: Color::White,
            table_row_fg: tailwind::GRAY.c500,
            table_row_bg_normal: Color::White,
            table_row_bg_alt: tailwind::GRAY.c50,
        }
    }

    /// Dark theme - slate background, same green header
    pub fn dark() -> Self {
        Self {
            bg_primary: tailwind::GRAY.c900,
            bg_secondary: tailwind::GRAY.c800,
            bg_panel: tailwind::GRAY.c800,

            text_primary: Color::White,
            text_secondary: tailwind::GRAY.c400,
            text_muted: tailwind::GRAY.c600,

            accent_primary: tailwind::BLUE.c400,
            accent_secondary: tailwind::GREEN.c500,

            status_success: tailwind::GREEN.c400,
            status_error: tailwind::RED.c400,
            status_warning: tailwind::AMBER.c400,

            selected_bg: tailwind::GRAY.c700,
            selected_fg: Color::White,

            input_bg: tailwind::GRAY.c700,
            input_fg: Color::White,

            table_header_bg: tailwind::GREEN.c800,
            table_header_fg: Color::White,
            table_row_fg: tailwind::GRAY.c400,
            table_row_bg_normal: tailwind::GRAY.c800,
            table_row_bg_alt: tailwind::GRAY.c900,
        }
    }

    // Prebuilt styles for common use cases

    /// Style for panel borders
    pub fn panel_border(&self) -> Style {
        Style::default()
            .fg(self.accent_primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for key hints (e.g., "r" in "Press r to retry")
    pub fn key_hint(&self) -> Style {
        Style::default()
            .fg(self.accent_primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn table_header(&self) -> Style {
        Style::default()
            .fg(self.table_header_fg)
            .bg(self.table_header_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn table_selected(&self) -> Style {
        Style::default()
            .fg(self.selected_fg)
            .bg(self.selected_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error(&self) -> Style {
        Style::default()
            .fg(self.status_error)
            .add_modifier(Modifier::BOLD)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.text_muted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_round_trips() {
        assert_eq!(ThemeMode::Light.toggled(), ThemeMode::Dark);
        assert_eq!(ThemeMode::Light.toggled().toggled(), ThemeMode::Light);
    }

    #[test]
    fn test_toggle_label_names_target_mode() {
        assert_eq!(ThemeMode::Light.toggle_label(), "☾ Dark Mode");
        assert_eq!(ThemeMode::Dark.toggle_label(), "☀ Light Mode");
    }

    #[test]
    fn test_palettes_differ_by_mode() {
        let light = Theme::for_mode(ThemeMode::Light);
        let dark = Theme::for_mode(ThemeMode::Dark);
        assert_ne!(light.bg_primary, dark.bg_primary);
        assert_ne!(light.text_primary, dark.text_primary);
    }
}
