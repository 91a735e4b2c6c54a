//! Analytics page: headline rates, status distribution, weekly activity

use crate::component::Component;
use crate::components::format::sanitize_line;
use crate::components::layout::header_body;
use crate::components::palette::Palette;
use crate::model::Analytics;
use anyhow::Result;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};

const BAR_WIDTH: usize = 30;

/// One line per status: label, bar scaled to the largest count, count and share
pub fn status_lines(analytics: &Analytics) -> Vec<String> {
    let shares = analytics.status_shares();
    let max = shares.iter().map(|s| s.count).max().unwrap_or(0);

    shares
        .iter()
        .map(|share| {
            let filled = if max == 0 {
                0
            } else {
                (share.count as f64 / max as f64 * BAR_WIDTH as f64).round() as usize
            };
            format!(
                "{:<12} {:<width$} {} ({:.1}%)",
                sanitize_line(&share.label),
                "█".repeat(filled),
                share.count,
                share.percent,
                width = BAR_WIDTH
            )
        })
        .collect()
}

#[derive(Default)]
pub struct AnalyticsComponent;

impl AnalyticsComponent {
    pub fn draw_with_analytics(
        &self,
        frame: &mut Frame,
        area: Rect,
        analytics: Option<&Analytics>,
        loading: bool,
        palette: &Palette,
    ) {
        let Some(analytics) = analytics else {
            let text = if loading {
                "Loading analytics..."
            } else {
                "No analytics available"
            };
            let empty = Paragraph::new(Span::styled(text, Style::default().fg(palette.muted)))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(" Analytics ")
                        .border_style(Style::default().fg(palette.border)),
                );
            frame.render_widget(empty, area);
            return;
        };

        let (cards_area, charts_area) = header_body(area, 4);
        render_metric_cards(frame, cards_area, analytics, palette);

        let charts = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(charts_area);

        let distribution: Vec<Line> = if analytics.status_counts.is_empty() {
            vec![Line::from(Span::styled(
                "No leads yet",
                Style::default().fg(palette.muted),
            ))]
        } else {
            status_lines(analytics)
                .into_iter()
                .map(|l| Line::from(Span::styled(l, Style::default().fg(palette.fg))))
                .collect()
        };
        let distribution = Paragraph::new(distribution).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Lead Status Distribution ")
                .border_style(Style::default().fg(palette.border)),
        );
        frame.render_widget(distribution, charts[0]);

        render_weekly_chart(frame, charts[1], analytics, palette);
    }
}

fn render_metric_cards(frame: &mut Frame, area: Rect, analytics: &Analytics, palette: &Palette) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(area);

    let cards = [
        ("Total Leads", analytics.total().to_string()),
        ("Reach Rate", format!("{:.1}%", analytics.reach_rate())),
        ("Reply Rate", format!("{:.1}%", analytics.reply_rate())),
    ];

    for ((label, value), chunk) in cards.into_iter().zip(chunks.iter()) {
        let card = Paragraph::new(vec![
            Line::from(Span::styled(
                value,
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

fn render_weekly_chart(frame: &mut Frame, area: Rect, analytics: &Analytics, palette: &Palette) {
    let sent_style = Style::default().fg(palette.accent);
    let opened_style = Style::default().fg(palette.success);

    let mut chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Line::from(vec![
                    Span::raw(" Weekly Performance "),
                    Span::styled("■ Emails Sent ", sent_style),
                    Span::styled("■ Opened ", opened_style),
                ]))
                .border_style(Style::default().fg(palette.border)),
        )
        .bar_width(2)
        .bar_gap(0)
        .group_gap(1)
        .value_style(Style::default().fg(palette.bg).bg(palette.fg))
        .label_style(Style::default().fg(palette.muted));

    for day in analytics.weekly_bars() {
        let group = BarGroup::default()
            .label(Line::from(day.day))
            .bars(&[
                Bar::default().value(day.sent).style(sent_style),
                Bar::default().value(day.opened).style(opened_style),
            ]);
        chart = chart.data(group);
    }

    frame.render_widget(chart, area);
}

impl Component for AnalyticsComponent {
    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Needs the analytics payload, so App calls draw_with_analytics
        Ok(())
    }
}
