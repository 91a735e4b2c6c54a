//! Help dialog component
//!
//! Displays all keyboard shortcuts available in the application.

use crate::action::Action;
use crate::component::Component;
use crate::components::palette::Palette;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Margin, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

/// Help dialog showing all keyboard shortcuts
#[derive(Default)]
pub struct HelpDialog {
    pub scroll_offset: usize,
}

impl Component for HelpDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => Some(Action::CloseModal),
            KeyCode::Char('j') | KeyCode::Down => {
                self.scroll_offset = self.scroll_offset.saturating_add(1);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.scroll_offset = self.scroll_offset.saturating_sub(1);
                None
            }
            KeyCode::PageDown => {
                self.scroll_offset = self.scroll_offset.saturating_add(10);
                None
            }
            KeyCode::PageUp => {
                self.scroll_offset = self.scroll_offset.saturating_sub(10);
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        self.draw_with_palette(frame, area, &Palette::for_theme(Default::default()));
        Ok(())
    }
}

impl HelpDialog {
    pub fn draw_with_palette(&mut self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let margin = 4;
        let dialog_area = Rect::new(
            area.x + margin,
            area.y + margin,
            area.width.saturating_sub(margin * 2),
            area.height.saturating_sub(margin * 2),
        );
        frame.render_widget(Clear, dialog_area);

        let content = build_help_content(palette);
        let total = content.len();
        let visible_height = dialog_area.height.saturating_sub(2) as usize;

        // Clamp scroll offset
        let max_scroll = total.saturating_sub(visible_height);
        if self.scroll_offset > max_scroll {
            self.scroll_offset = max_scroll;
        }

        let paragraph = Paragraph::new(content)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Keyboard Shortcuts ")
                    .title_style(palette.title())
                    .border_style(Style::default().fg(palette.accent))
                    .style(palette.base()),
            )
            .scroll((self.scroll_offset as u16, 0));

        frame.render_widget(paragraph, dialog_area);

        if total > visible_height {
            let mut scrollbar_state =
                ScrollbarState::new(total.saturating_sub(visible_height)).position(self.scroll_offset);

            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(Some("↑"))
                    .end_symbol(Some("↓")),
                dialog_area.inner(Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut scrollbar_state,
            );
        }
    }
}

/// Build the help content with all keyboard shortcuts
fn build_help_content(palette: &Palette) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    let section_style = Style::default()
        .fg(palette.warning)
        .add_modifier(Modifier::BOLD);
    let rule_style = Style::default().fg(palette.muted);
    let key_style = palette.key();
    let text_style = Style::default().fg(palette.fg);

    let add_section = |lines: &mut Vec<Line<'static>>, title: &str| {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(format!("  {} ", title), section_style)));
        lines.push(Line::from(Span::styled(
            format!("  {}", "─".repeat(title.len() + 2)),
            rule_style,
        )));
    };

    let add_shortcut = |lines: &mut Vec<Line<'static>>, key: &str, description: &str| {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:12}", key), key_style),
            Span::styled(description.to_string(), text_style),
        ]));
    };

    add_section(&mut lines, "Global");
    add_shortcut(&mut lines, "1-4", "Dashboard / Campaign / Scraper / Analytics");
    add_shortcut(&mut lines, "T", "Toggle light/dark theme");
    add_shortcut(&mut lines, "?", "Show this help");
    add_shortcut(&mut lines, "q", "Quit");
    add_shortcut(&mut lines, "Ctrl+c", "Quit immediately");

    add_section(&mut lines, "Dashboard");
    add_shortcut(&mut lines, "j / ↓", "Next lead");
    add_shortcut(&mut lines, "k / ↑", "Previous lead");
    add_shortcut(&mut lines, "Enter / p", "Preview email (ENRICHED leads)");
    add_shortcut(&mut lines, "f", "Cycle status filter");
    add_shortcut(&mut lines, "F", "Clear status filter");
    add_shortcut(&mut lines, "r", "Refresh");
    add_shortcut(&mut lines, "E", "Export visible leads to CSV");

    add_section(&mut lines, "Campaign");
    add_shortcut(&mut lines, "Tab", "Next tab");
    add_shortcut(&mut lines, "Shift+Tab", "Previous tab");
    add_shortcut(&mut lines, "Enter / p", "Individual: preview email");
    add_shortcut(&mut lines, "p", "Bulk: preview all emails");
    add_shortcut(&mut lines, "Space", "Bulk: include/exclude email");
    add_shortcut(&mut lines, "Enter", "Bulk: expand email");
    add_shortcut(&mut lines, "s", "Bulk: send selected");
    add_shortcut(&mut lines, "x", "Bulk: discard previews");
    add_shortcut(&mut lines, "s", "Follow-ups: run scheduler");

    add_section(&mut lines, "Scraper");
    add_shortcut(&mut lines, "i / Enter", "Edit search query");
    add_shortcut(&mut lines, "Enter", "Start scraping");
    add_shortcut(&mut lines, "Esc", "Stop editing");

    add_section(&mut lines, "Email Editor");
    add_shortcut(&mut lines, "Tab", "Switch subject/body");
    add_shortcut(&mut lines, "Ctrl+s", "Send");
    add_shortcut(&mut lines, "Esc", "Discard");

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Press q, Esc, or ? to close",
        rule_style,
    )));

    lines
}
