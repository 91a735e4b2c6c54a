//! Layout calculations for the UI

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main screen layout areas
pub struct MainLayout {
    pub nav: Rect,
    pub content: Rect,
    pub status: Rect,
    pub help: Rect,
}

/// Calculate centered popup area
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let popup_x = area.x + (area.width.saturating_sub(width)) / 2;
    let popup_y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect::new(
        popup_x,
        popup_y,
        width.min(area.width),
        height.min(area.height),
    )
}

/// Calculate main screen layout: page tabs, content, toast line, help bar
pub fn calculate_main_layout(area: Rect) -> MainLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    MainLayout {
        nav: chunks[0],
        content: chunks[1],
        status: chunks[2],
        help: chunks[3],
    }
}

/// Split `area` into a fixed-height header and the remaining body
pub fn header_body(area: Rect, header: u16) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(header), Constraint::Min(0)])
        .split(area);
    (chunks[0], chunks[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_popup_clamps_to_area() {
        let area = Rect::new(0, 0, 20, 10);
        assert_eq!(centered_popup(area, 40, 7), Rect::new(0, 1, 20, 7));
        assert_eq!(centered_popup(area, 10, 4), Rect::new(5, 3, 10, 4));
    }

    #[test]
    fn test_main_layout_reserves_chrome() {
        let layout = calculate_main_layout(Rect::new(0, 0, 80, 24));
        assert_eq!(layout.nav.height, 3);
        assert_eq!(layout.content.height, 19);
        assert_eq!(layout.status.y, 22);
        assert_eq!(layout.help.y, 23);
    }
}
