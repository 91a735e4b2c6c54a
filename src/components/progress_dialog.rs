//! Progress dialog component
//!
//! Shown while a send is in flight. It has no keys of its own; it closes when
//! the awaited reply has been handled.

use crate::component::Component;
use crate::components::centered_popup;
use crate::components::palette::Palette;
use anyhow::Result;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Paragraph},
    Frame,
};

pub const SINGLE_TITLE: &str = "Sending email...";
pub const BULK_TITLE: &str = "Sending bulk emails...";
pub const WAIT_TEXT: &str = "Please wait";

/// What the dialog shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressView {
    pub title: &'static str,
    pub text: &'static str,
    /// Bar position; `None` hides the bar
    pub percent: Option<u16>,
}

#[derive(Default)]
pub struct ProgressDialog;

impl ProgressDialog {
    pub fn draw_with_progress(
        &self,
        frame: &mut Frame,
        area: Rect,
        view: &ProgressView,
        palette: &Palette,
    ) {
        let popup_area = centered_popup(area, 50, 7);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.accent))
            .title(format!(" {} ", view.title))
            .title_style(palette.title())
            .style(palette.base());
        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        let text = Paragraph::new(Line::from(Span::styled(
            view.text,
            Style::default().fg(palette.muted),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(text, chunks[1]);

        if let Some(percent) = view.percent {
            let gauge = Gauge::default()
                .gauge_style(
                    Style::default()
                        .fg(palette.accent)
                        .bg(palette.border)
                        .add_modifier(Modifier::BOLD),
                )
                .percent(percent.min(100))
                .label(format!("{}%", percent.min(100)));
            frame.render_widget(gauge, chunks[2]);
        }
    }
}

impl Component for ProgressDialog {
    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Needs progress data, so App calls draw_with_progress
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::testing::{buffer_contains, render};
    use crate::model::ui::Theme;

    #[test]
    fn test_bulk_progress_shows_percentage() {
        let view = ProgressView {
            title: BULK_TITLE,
            text: WAIT_TEXT,
            percent: Some(40),
        };
        let palette = Palette::for_theme(Theme::Light);
        let buffer = render(80, 20, |frame| {
            ProgressDialog.draw_with_progress(frame, frame.area(), &view, &palette)
        });
        assert!(buffer_contains(&buffer, "Sending bulk emails..."));
        assert!(buffer_contains(&buffer, "40%"));
    }

    #[test]
    fn test_single_send_has_no_bar() {
        let view = ProgressView {
            title: SINGLE_TITLE,
            text: WAIT_TEXT,
            percent: None,
        };
        let palette = Palette::for_theme(Theme::Dark);
        let buffer = render(80, 20, |frame| {
            ProgressDialog.draw_with_progress(frame, frame.area(), &view, &palette)
        });
        assert!(buffer_contains(&buffer, "Please wait"));
        assert!(!buffer_contains(&buffer, "%"));
    }
}
