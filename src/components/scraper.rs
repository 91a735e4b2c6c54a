//! Scraper page: query input and the run log

use crate::action::Action;
use crate::component::Component;
use crate::components::format::sanitize_line;
use crate::components::palette::Palette;
use crate::model::workflow::{LogLevel, ScraperLog};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub const QUERY_HINT: &str = "e.g. dental clinics in Austin, TX";

/// Query editor state
#[derive(Default)]
pub struct ScraperComponent {
    pub query: String,
    pub editing: bool,
}

impl ScraperComponent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enter_query_mode(&mut self) {
        self.editing = true;
    }

    pub fn exit_query_mode(&mut self) {
        self.editing = false;
    }

    pub fn query_input(&mut self, c: char) {
        self.query.push(c);
    }

    pub fn query_backspace(&mut self) {
        self.query.pop();
    }

    /// Trimmed query, `None` when blank
    pub fn submitted_query(&self) -> Option<String> {
        let trimmed = self.query.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    pub fn draw_with_log(
        &self,
        frame: &mut Frame,
        area: Rect,
        log: &ScraperLog,
        running: bool,
        palette: &Palette,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(area);

        let input_line = if self.query.is_empty() && !self.editing {
            Line::from(Span::styled(QUERY_HINT, Style::default().fg(palette.muted)))
        } else if self.editing {
            Line::from(format!("{}_", self.query))
        } else {
            Line::from(self.query.clone())
        };
        let border = if self.editing { palette.accent } else { palette.border };
        let input = Paragraph::new(input_line).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Search Query ")
                .border_style(Style::default().fg(border)),
        );
        frame.render_widget(input, chunks[0]);

        let trigger = if running {
            Line::from(Span::styled(" Running... ", Style::default().fg(palette.warning)))
        } else if self.editing {
            Line::from(vec![
                Span::styled(" Enter ", palette.key()),
                Span::raw("Start Scraping  "),
                Span::styled(" Esc ", palette.key()),
                Span::raw("Stop editing"),
            ])
        } else {
            Line::from(vec![
                Span::styled(" i ", palette.key()),
                Span::raw("Edit query"),
            ])
        };
        frame.render_widget(Paragraph::new(trigger), chunks[1]);

        let lines: Vec<Line> = log
            .lines
            .iter()
            .map(|line| {
                let style = match line.level {
                    LogLevel::Info => Style::default().fg(palette.fg),
                    LogLevel::Success => Style::default()
                        .fg(palette.success)
                        .add_modifier(Modifier::BOLD),
                    LogLevel::Error => Style::default()
                        .fg(palette.error)
                        .add_modifier(Modifier::BOLD),
                };
                Line::from(Span::styled(sanitize_line(&line.text), style))
            })
            .collect();

        // Keep the newest lines in view
        let visible = chunks[2].height.saturating_sub(2) as usize;
        let scroll = lines.len().saturating_sub(visible) as u16;

        let panel = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Scraper Log ")
                    .border_style(Style::default().fg(palette.border)),
            )
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0));
        frame.render_widget(panel, chunks[2]);
    }
}

impl Component for ScraperComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = if self.editing {
            match key.code {
                KeyCode::Esc => Some(Action::ExitQueryMode),
                KeyCode::Enter => Some(Action::RunScraper),
                KeyCode::Backspace => Some(Action::QueryBackspace),
                KeyCode::Char(c) => Some(Action::QueryInput(c)),
                _ => None,
            }
        } else {
            match key.code {
                KeyCode::Char('i') | KeyCode::Enter => Some(Action::EnterQueryMode),
                _ => None,
            }
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::EnterQueryMode => self.enter_query_mode(),
            Action::ExitQueryMode => self.exit_query_mode(),
            Action::QueryInput(c) => self.query_input(c),
            Action::QueryBackspace => self.query_backspace(),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Needs the log, so App calls draw_with_log
        Ok(())
    }
}
