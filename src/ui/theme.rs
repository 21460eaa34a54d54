//! Brand colors.

use ratatui::style::{Color, Modifier, Style};

pub const PRIMARY: Color = Color::Rgb(0x62, 0x00, 0xEE);
pub const PRIMARY_VARIANT: Color = Color::Rgb(0x37, 0x00, 0xB3);
pub const SECONDARY: Color = Color::Rgb(0x03, 0xDA, 0xC6);
pub const DARK_PRIMARY: Color = Color::Rgb(0xBB, 0x86, 0xFC);
pub const ERROR: Color = Color::Rgb(0xB0, 0x00, 0x20);
pub const BACKGROUND: Color = Color::Rgb(0xFF, 0xFB, 0xFE);
pub const ON_BACKGROUND: Color = Color::Rgb(0x1C, 0x1B, 0x1F);

/// Screen titles.
pub fn title() -> Style {
    Style::default().fg(DARK_PRIMARY).add_modifier(Modifier::BOLD)
}

/// Secondary text such as hints and key legends.
pub fn muted() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Inline validation errors.
pub fn error() -> Style {
    Style::default().fg(ERROR).add_modifier(Modifier::BOLD)
}

/// Highlighted list entry.
pub fn highlight() -> Style {
    Style::default()
        .fg(ON_BACKGROUND)
        .bg(SECONDARY)
        .add_modifier(Modifier::BOLD)
}

/// Filled portion of gauges and enabled buttons.
pub fn accent() -> Style {
    Style::default().fg(BACKGROUND).bg(PRIMARY)
}

/// Borders of cards and dialogs.
pub fn border() -> Style {
    Style::default().fg(PRIMARY_VARIANT)
}
