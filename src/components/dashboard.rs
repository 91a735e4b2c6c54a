//! Dashboard page: stat cards and the lead table

use crate::action::Action;
use crate::component::Component;
use crate::components::format::{format_date, or_na, sanitize_line, website};
use crate::components::layout::header_body;
use crate::components::palette::Palette;
use crate::model::lead::filter_by_status;
use crate::model::ui::next_status_filter;
use crate::model::{DashboardStats, Lead, LeadStatus};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

pub const EMPTY_TEXT: &str = "No leads found";
const PREVIEW_LABEL: &str = "Preview";
const HEADERS: [&str; 7] = [
    "Clinic",
    "Email",
    "Website",
    "Status",
    "Follow-ups",
    "Last Contacted",
    "Action",
];

/// One rendered table row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadRow {
    pub cells: Vec<String>,
    /// Row carries the Preview action
    pub previewable: bool,
}

/// Build table rows: one per lead, or a single empty-state row
pub fn lead_rows(leads: &[&Lead]) -> Vec<LeadRow> {
    if leads.is_empty() {
        return vec![LeadRow {
            cells: vec![EMPTY_TEXT.to_string()],
            previewable: false,
        }];
    }

    leads
        .iter()
        .map(|lead| {
            let previewable = lead.status.is_sendable();
            LeadRow {
                cells: vec![
                    or_na(lead.clinic_name.as_deref()),
                    or_na(lead.email.as_deref()),
                    website(lead.website.as_deref()),
                    sanitize_line(lead.status.as_str()),
                    lead.follow_ups().to_string(),
                    format_date(lead.last_contacted.as_deref()),
                    if previewable {
                        PREVIEW_LABEL.to_string()
                    } else {
                        String::new()
                    },
                ],
                previewable,
            }
        })
        .collect()
}

/// Dashboard state: table selection and status filter
pub struct DashboardComponent {
    pub table_state: TableState,
    pub status_filter: Option<LeadStatus>,
}

impl Default for DashboardComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardComponent {
    pub fn new() -> Self {
        Self {
            table_state: TableState::default(),
            status_filter: None,
        }
    }

    /// Leads passing the current filter, always computed from the cache
    pub fn visible_leads<'a>(&self, all_leads: &'a [Lead]) -> Vec<&'a Lead> {
        filter_by_status(all_leads, self.status_filter.as_ref())
    }

    pub fn selected_lead<'a>(&self, all_leads: &'a [Lead]) -> Option<&'a Lead> {
        let index = self.table_state.selected()?;
        self.visible_leads(all_leads).get(index).copied()
    }

    pub fn next(&mut self, all_leads: &[Lead]) {
        let count = self.visible_leads(all_leads).len();
        if count == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) if i + 1 < count => i + 1,
            _ => 0,
        };
        self.table_state.select(Some(i));
    }

    pub fn previous(&mut self, all_leads: &[Lead]) {
        let count = self.visible_leads(all_leads).len();
        if count == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(0) | None => count - 1,
            Some(i) => i - 1,
        };
        self.table_state.select(Some(i));
    }

    /// Keep the selection inside the visible rows after the data changed
    pub fn sync_selection(&mut self, all_leads: &[Lead]) {
        let count = self.visible_leads(all_leads).len();
        let selected = match (count, self.table_state.selected()) {
            (0, _) => None,
            (_, Some(i)) => Some(i.min(count - 1)),
            (_, None) => Some(0),
        };
        self.table_state.select(selected);
    }

    pub fn cycle_filter(&mut self, all_leads: &[Lead]) {
        self.status_filter = next_status_filter(self.status_filter.as_ref());
        self.table_state.select(None);
        self.sync_selection(all_leads);
    }

    pub fn clear_filter(&mut self, all_leads: &[Lead]) {
        self.status_filter = None;
        self.table_state.select(None);
        self.sync_selection(all_leads);
    }

    pub fn draw_with_leads(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        all_leads: &[Lead],
        palette: &Palette,
    ) {
        let (cards_area, table_area) = header_body(area, 4);
        render_stat_cards(frame, cards_area, &DashboardStats::from_leads(all_leads), palette);

        let visible = self.visible_leads(all_leads);
        let rows = lead_rows(&visible);

        let table_rows: Vec<Row> = if visible.is_empty() {
            vec![Row::new(vec![Cell::from(Span::styled(
                EMPTY_TEXT,
                Style::default().fg(palette.muted),
            ))])]
        } else {
            rows.into_iter()
                .zip(visible.iter())
                .map(|(row, lead)| {
                    let status_color = palette.status(&lead.status);
                    let cells = row.cells.into_iter().enumerate().map(|(i, text)| match i {
                        0 => Cell::from(Span::styled(
                            text,
                            Style::default().add_modifier(Modifier::BOLD),
                        )),
                        3 => Cell::from(Span::styled(text, Style::default().fg(status_color))),
                        6 => Cell::from(Span::styled(text, palette.key())),
                        _ => Cell::from(text),
                    });
                    Row::new(cells)
                })
                .collect()
        };

        let header = Row::new(HEADERS.iter().map(|h| Cell::from(*h))).style(palette.title());

        let mut title = format!(" Leads ({}) ", visible.len());
        if let Some(ref status) = self.status_filter {
            title = format!("{} [status:{}] ", title.trim_end(), status);
        }

        let widths = [
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Length(12),
            Constraint::Length(10),
            Constraint::Length(15),
            Constraint::Length(8),
        ];

        let table = Table::new(table_rows, widths)
            .header(header)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .border_style(Style::default().fg(palette.border)),
            )
            .highlight_style(
                Style::default()
                    .bg(palette.highlight_bg)
                    .fg(palette.highlight_fg)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

        frame.render_stateful_widget(table, table_area, &mut self.table_state);
    }
}

fn render_stat_cards(frame: &mut Frame, area: Rect, stats: &DashboardStats, palette: &Palette) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    let cards = [
        ("Total Leads", stats.total),
        ("Contacted", stats.contacted),
        ("Emails Sent", stats.emails_sent),
        ("Follow-ups", stats.followups),
    ];

    for ((label, value), chunk) in cards.into_iter().zip(chunks.iter()) {
        let card = Paragraph::new(vec![
            Line::from(Span::styled(
                value.to_string(),
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(label, Style::default().fg(palette.muted))),
        ])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.border)),
        );
        frame.render_widget(card, *chunk);
    }
}

impl Component for DashboardComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextItem),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevItem),
            KeyCode::Enter | KeyCode::Char('p') => Some(Action::PreviewSelected),
            KeyCode::Char('f') => Some(Action::CycleStatusFilter),
            KeyCode::Char('F') => Some(Action::ClearStatusFilter),
            KeyCode::Char('r') => Some(Action::RefreshDashboard),
            KeyCode::Char('E') => Some(Action::ExportLeads),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Needs lead data, so App calls draw_with_leads
        Ok(())
    }
}
