//! Building blocks shared by the screens.

use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    text::Line,
    widgets::{Block, BorderType, Paragraph},
};

use crate::ui::theme;

/// Rounded card with a title, the terminal stand-in for an elevated card.
pub fn card(title: &str) -> Block<'_> {
    Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(theme::border())
        .title(Line::styled(format!(" {title} "), theme::title()))
}

/// Full-width button label showing its key binding.
///
/// # Arguments
///
/// * `label` - Button text.
/// * `key` - Key that activates the button.
/// * `enabled` - Disabled buttons are drawn muted.
pub fn primary_button<'a>(label: &'a str, key: &'a str, enabled: bool) -> Paragraph<'a> {
    let style = if enabled {
        theme::accent()
    } else {
        theme::muted()
    };
    Paragraph::new(Line::from(format!("[{key}] {label}")))
        .style(style)
        .alignment(Alignment::Center)
}

/// Key legend at the bottom of a screen.
pub fn help_bar(text: &str) -> Paragraph<'_> {
    Paragraph::new(format!(" {text}")).style(theme::muted())
}

/// Rectangle of `width` by `height` cells centered in `area`, clipped to it.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    rect
}

/// Rectangle of `height` rows along the bottom edge of `area`.
pub fn bottom_sheet_rect(height: u16, area: Rect) -> Rect {
    let height = height.min(area.height);
    Rect {
        x: area.x,
        y: area.y + area.height - height,
        width: area.width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use ratatui::layout::Rect;

    use crate::ui::components::{bottom_sheet_rect, centered_rect};

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(centered_rect(40, 10, area), Rect::new(20, 7, 40, 10));
        // Oversized requests are clipped
        assert_eq!(centered_rect(200, 50, area), area);
    }

    #[test]
    fn test_bottom_sheet_rect() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(bottom_sheet_rect(8, area), Rect::new(0, 16, 80, 8));
        assert_eq!(bottom_sheet_rect(30, area), area);
    }
}
