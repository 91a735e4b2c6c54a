//! Campaign page: individual emails, bulk send, and follow-ups

use crate::action::Action;
use crate::component::Component;
use crate::components::format::{format_date, or_na, sanitize, sanitize_line};
use crate::components::layout::header_body;
use crate::components::palette::Palette;
use crate::model::lead::{enriched_leads, outreach_leads};
use crate::model::preview::BulkItem;
use crate::model::ui::CampaignTab;
use crate::model::workflow::BulkWorkflow;
use crate::model::{BulkPreviewSet, Lead};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{
        Block, Borders, Cell, List, ListItem, ListState, Paragraph, Row, Table, TableState, Tabs,
        Wrap,
    },
    Frame,
};

pub const NO_ENRICHED_TEXT: &str = "No enriched leads available";
pub const NO_FOLLOWUPS_TEXT: &str = "No leads in follow-up stages";

/// Data the campaign page renders from
pub struct CampaignRenderContext<'a> {
    pub all_leads: &'a [Lead],
    pub bulk_previews: &'a BulkPreviewSet,
    pub bulk: &'a BulkWorkflow,
    pub scheduler_running: bool,
    pub palette: &'a Palette,
}

/// `N of M emails` for the bulk review panel
pub fn selection_label(previews: &BulkPreviewSet) -> String {
    let (checked, total) = previews.selection_count();
    format!("{} of {} emails", checked, total)
}

/// Text lines of an individual-email card
pub fn individual_card_lines(lead: &Lead) -> Vec<String> {
    vec![
        format!(
            "{} - {}",
            or_na(lead.clinic_name.as_deref()),
            or_na(lead.email.as_deref())
        ),
        format!("Website: {}", or_na(lead.website.as_deref())),
        format!("Contact: {}", or_na(lead.name.as_deref())),
    ]
}

/// Text lines of a bulk-review card; the email is shown only when expanded
pub fn bulk_card_lines(item: &BulkItem) -> Vec<String> {
    let checkbox = if item.included { "[x]" } else { "[ ]" };
    let mut lines = vec![format!(
        "{} {} ({})",
        checkbox,
        or_na(item.entry.lead.clinic_name.as_deref()),
        or_na(item.entry.lead.email.as_deref())
    )];

    if item.expanded {
        lines.push(format!("    Subject: {}", sanitize_line(&item.entry.subject)));
        lines.push("    Body:".to_string());
        lines.extend(
            sanitize(&item.entry.body)
                .lines()
                .map(|l| format!("    {}", l)),
        );
    } else {
        lines.push("    Preview Email (Enter to expand)".to_string());
    }
    lines
}

/// Campaign state: active tab and per-tab selection
pub struct CampaignComponent {
    pub tab: CampaignTab,
    pub individual_state: ListState,
    pub bulk_state: ListState,
    pub followup_state: TableState,
}

impl Default for CampaignComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl CampaignComponent {
    pub fn new() -> Self {
        Self {
            tab: CampaignTab::Individual,
            individual_state: ListState::default(),
            bulk_state: ListState::default(),
            followup_state: TableState::default(),
        }
    }

    pub fn next_tab(&mut self) {
        self.tab = self.tab.next();
    }

    pub fn previous_tab(&mut self) {
        self.tab = self.tab.previous();
    }

    fn tab_len(&self, all_leads: &[Lead], previews: &BulkPreviewSet) -> usize {
        match self.tab {
            CampaignTab::Individual => enriched_leads(all_leads).len(),
            CampaignTab::Bulk => previews.len(),
            CampaignTab::Followups => outreach_leads(all_leads).len(),
        }
    }

    fn current_selection(&self) -> Option<usize> {
        match self.tab {
            CampaignTab::Individual => self.individual_state.selected(),
            CampaignTab::Bulk => self.bulk_state.selected(),
            CampaignTab::Followups => self.followup_state.selected(),
        }
    }

    fn select(&mut self, index: Option<usize>) {
        match self.tab {
            CampaignTab::Individual => self.individual_state.select(index),
            CampaignTab::Bulk => self.bulk_state.select(index),
            CampaignTab::Followups => self.followup_state.select(index),
        }
    }

    pub fn next(&mut self, all_leads: &[Lead], previews: &BulkPreviewSet) {
        let count = self.tab_len(all_leads, previews);
        if count == 0 {
            return;
        }
        let i = match self.current_selection() {
            Some(i) if i + 1 < count => i + 1,
            _ => 0,
        };
        self.select(Some(i));
    }

    pub fn previous(&mut self, all_leads: &[Lead], previews: &BulkPreviewSet) {
        let count = self.tab_len(all_leads, previews);
        if count == 0 {
            return;
        }
        let i = match self.current_selection() {
            Some(0) | None => count - 1,
            Some(i) => i - 1,
        };
        self.select(Some(i));
    }

    /// Clamp every tab's selection to its current row count
    pub fn sync_selection(&mut self, all_leads: &[Lead], previews: &BulkPreviewSet) {
        fn clamp(selected: Option<usize>, count: usize) -> Option<usize> {
            match (count, selected) {
                (0, _) => None,
                (_, Some(i)) => Some(i.min(count - 1)),
                (_, None) => Some(0),
            }
        }
        let enriched = enriched_leads(all_leads).len();
        let followups = outreach_leads(all_leads).len();
        self.individual_state
            .select(clamp(self.individual_state.selected(), enriched));
        self.bulk_state
            .select(clamp(self.bulk_state.selected(), previews.len()));
        self.followup_state
            .select(clamp(self.followup_state.selected(), followups));
    }

    /// Enriched lead under the cursor on the individual tab
    pub fn selected_enriched_lead<'a>(&self, all_leads: &'a [Lead]) -> Option<&'a Lead> {
        let index = self.individual_state.selected()?;
        enriched_leads(all_leads).get(index).copied()
    }

    /// Bulk card under the cursor
    pub fn selected_bulk_index(&self) -> Option<usize> {
        self.bulk_state.selected()
    }

    pub fn draw_with_context(&mut self, frame: &mut Frame, area: Rect, ctx: &CampaignRenderContext) {
        let (tabs_area, body_area) = header_body(area, 3);
        let palette = ctx.palette;

        let titles: Vec<Line> = CampaignTab::all()
            .iter()
            .map(|t| Line::from(t.name()))
            .collect();
        let selected = CampaignTab::all()
            .iter()
            .position(|t| *t == self.tab)
            .unwrap_or(0);
        let tabs = Tabs::new(titles)
            .select(selected)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(palette.border)),
            )
            .style(Style::default().fg(palette.muted))
            .highlight_style(
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            );
        frame.render_widget(tabs, tabs_area);

        match self.tab {
            CampaignTab::Individual => self.draw_individual(frame, body_area, ctx),
            CampaignTab::Bulk => self.draw_bulk(frame, body_area, ctx),
            CampaignTab::Followups => self.draw_followups(frame, body_area, ctx),
        }
    }

    fn draw_individual(&mut self, frame: &mut Frame, area: Rect, ctx: &CampaignRenderContext) {
        let palette = ctx.palette;
        let leads = enriched_leads(ctx.all_leads);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Ready to Contact ")
            .border_style(Style::default().fg(palette.border));

        if leads.is_empty() {
            let empty = Paragraph::new(Span::styled(
                NO_ENRICHED_TEXT,
                Style::default().fg(palette.muted),
            ))
            .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let items: Vec<ListItem> = leads
            .iter()
            .map(|lead| {
                let mut lines = individual_card_lines(lead).into_iter();
                let mut text = Text::default();
                if let Some(heading) = lines.next() {
                    text.lines.push(Line::from(vec![
                        Span::styled(heading, Style::default().add_modifier(Modifier::BOLD)),
                        Span::styled("  [p] Preview Email", palette.key()),
                    ]));
                }
                for line in lines {
                    text.lines
                        .push(Line::from(Span::styled(line, Style::default().fg(palette.muted))));
                }
                text.lines.push(Line::from(""));
                ListItem::new(text)
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(
                Style::default()
                    .bg(palette.highlight_bg)
                    .fg(palette.highlight_fg),
            )
            .highlight_symbol("▶ ");
        frame.render_stateful_widget(list, area, &mut self.individual_state);
    }

    fn draw_bulk(&mut self, frame: &mut Frame, area: Rect, ctx: &CampaignRenderContext) {
        let palette = ctx.palette;
        let (header_area, list_area) = header_body(area, 3);

        let enriched = enriched_leads(ctx.all_leads).len();
        let mut spans = vec![Span::styled(
            format!(" {} leads ", enriched),
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )];
        match ctx.bulk {
            BulkWorkflow::PreviewLoading => {
                spans.push(Span::styled(" Generating... ", Style::default().fg(palette.warning)));
            }
            BulkWorkflow::Idle => {
                spans.push(Span::styled(" p ", palette.key()));
                spans.push(Span::raw("Preview All Emails"));
            }
            BulkWorkflow::Reviewing | BulkWorkflow::Sending => {
                spans.push(Span::styled(
                    format!(" {} ", selection_label(ctx.bulk_previews)),
                    Style::default().fg(palette.fg).add_modifier(Modifier::BOLD),
                ));
                spans.push(Span::styled(" Space ", palette.key()));
                spans.push(Span::raw("Toggle "));
                spans.push(Span::styled(" Enter ", palette.key()));
                spans.push(Span::raw("Expand "));
                spans.push(Span::styled(" s ", Style::default().fg(palette.success)));
                spans.push(Span::raw("Send Selected "));
                spans.push(Span::styled(" x ", Style::default().fg(palette.error)));
                spans.push(Span::raw("Discard"));
            }
        }
        let header = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Bulk Send ")
                .border_style(Style::default().fg(palette.border)),
        );
        frame.render_widget(header, header_area);

        // The review panel is hidden until previews exist
        if ctx.bulk_previews.is_empty() {
            return;
        }

        let items: Vec<ListItem> = ctx
            .bulk_previews
            .items()
            .iter()
            .map(|item| {
                let mut lines = bulk_card_lines(item).into_iter();
                let mut text = Text::default();
                if let Some(heading) = lines.next() {
                    let style = if item.included {
                        Style::default()
                            .fg(palette.success)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(palette.muted)
                    };
                    text.lines.push(Line::from(Span::styled(heading, style)));
                }
                for line in lines {
                    text.lines.push(Line::from(line));
                }
                ListItem::new(text)
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(palette.border)),
            )
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("▶ ");
        frame.render_stateful_widget(list, list_area, &mut self.bulk_state);
    }

    fn draw_followups(&mut self, frame: &mut Frame, area: Rect, ctx: &CampaignRenderContext) {
        let palette = ctx.palette;
        let (header_area, table_area) = header_body(area, 3);

        let button = if ctx.scheduler_running {
            Line::from(Span::styled(" Running... ", Style::default().fg(palette.warning)))
        } else {
            Line::from(vec![
                Span::styled(" s ", palette.key()),
                Span::raw("Run Follow-up Scheduler"),
            ])
        };
        let header = Paragraph::new(button).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Follow-ups ")
                .border_style(Style::default().fg(palette.border)),
        );
        frame.render_widget(header, header_area);

        let leads = outreach_leads(ctx.all_leads);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.border));

        if leads.is_empty() {
            let empty = Paragraph::new(Span::styled(
                NO_FOLLOWUPS_TEXT,
                Style::default().fg(palette.muted),
            ))
            .wrap(Wrap { trim: true })
            .block(block);
            frame.render_widget(empty, table_area);
            return;
        }

        let rows: Vec<Row> = leads
            .iter()
            .map(|lead| {
                Row::new(vec![
                    Cell::from(Span::styled(
                        or_na(lead.clinic_name.as_deref()),
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                    Cell::from(or_na(lead.email.as_deref())),
                    Cell::from(Span::styled(
                        sanitize_line(lead.status.as_str()),
                        Style::default().fg(palette.status(&lead.status)),
                    )),
                    Cell::from(lead.follow_ups().to_string()),
                    Cell::from(format_date(lead.last_contacted.as_deref())),
                ])
            })
            .collect();

        let header = Row::new(["Clinic", "Email", "Status", "Follow-ups", "Last Contacted"])
            .style(palette.title());
        let widths = [
            Constraint::Percentage(25),
            Constraint::Percentage(30),
            Constraint::Length(12),
            Constraint::Length(10),
            Constraint::Length(15),
        ];
        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .highlight_style(
                Style::default()
                    .bg(palette.highlight_bg)
                    .fg(palette.highlight_fg),
            );
        frame.render_stateful_widget(table, table_area, &mut self.followup_state);
    }
}

impl Component for CampaignComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match (self.tab, key.code) {
            (_, KeyCode::Tab) => Some(Action::NextTab),
            (_, KeyCode::BackTab) => Some(Action::PrevTab),
            (_, KeyCode::Char('j')) | (_, KeyCode::Down) => Some(Action::NextItem),
            (_, KeyCode::Char('k')) | (_, KeyCode::Up) => Some(Action::PrevItem),
            (CampaignTab::Individual, KeyCode::Enter)
            | (CampaignTab::Individual, KeyCode::Char('p')) => Some(Action::PreviewSelected),
            (CampaignTab::Bulk, KeyCode::Char('p')) => Some(Action::BulkPreview),
            (CampaignTab::Bulk, KeyCode::Char(' ')) => Some(Action::ToggleBulkItem),
            (CampaignTab::Bulk, KeyCode::Enter) => Some(Action::ExpandBulkItem),
            (CampaignTab::Bulk, KeyCode::Char('s')) => Some(Action::BulkSend),
            (CampaignTab::Bulk, KeyCode::Char('x')) => Some(Action::DiscardBulk),
            (CampaignTab::Followups, KeyCode::Char('s')) => Some(Action::RunScheduler),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Needs view state, so App calls draw_with_context
        Ok(())
    }
}
