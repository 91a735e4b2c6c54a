//! Email preview/edit dialog component

use crate::action::Action;
use crate::component::Component;
use crate::components::format::{or_na, sanitize, sanitize_line};
use crate::components::palette::Palette;
use crate::model::workflow::{DraftField, EmailDraft};
use crate::model::Lead;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

#[derive(Default)]
pub struct EmailDialog;

impl EmailDialog {
    pub fn draw_with_draft(
        &self,
        frame: &mut Frame,
        area: Rect,
        draft: &EmailDraft,
        lead: Option<&Lead>,
        loading: bool,
        palette: &Palette,
    ) {
        let margin = 2;
        let overlay_area = Rect::new(
            area.x + margin,
            area.y + margin,
            area.width.saturating_sub(margin * 2),
            area.height.saturating_sub(margin * 2),
        );
        frame.render_widget(Clear, overlay_area);

        let recipient = match lead {
            Some(lead) => format!(
                " Email Preview: {} <{}> ",
                or_na(lead.clinic_name.as_deref()),
                or_na(lead.email.as_deref())
            ),
            None => " Email Preview ".to_string(),
        };
        let outer = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.accent))
            .title(recipient)
            .title_style(palette.title())
            .style(palette.base());
        let inner = outer.inner(overlay_area);
        frame.render_widget(outer, overlay_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(inner);

        let text_style = if loading {
            Style::default()
                .fg(palette.muted)
                .add_modifier(Modifier::ITALIC)
        } else {
            Style::default().fg(palette.fg)
        };
        let field_border = |field: DraftField| {
            if !loading && draft.focus == field {
                Style::default().fg(palette.accent)
            } else {
                Style::default().fg(palette.border)
            }
        };
        let cursor = |field: DraftField| if !loading && draft.focus == field { "_" } else { "" };

        let subject = Paragraph::new(Line::from(Span::styled(
            format!("{}{}", sanitize_line(&draft.subject), cursor(DraftField::Subject)),
            text_style,
        )))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Subject ")
                .border_style(field_border(DraftField::Subject)),
        );
        frame.render_widget(subject, chunks[0]);

        let body_text = format!("{}{}", sanitize(&draft.body), cursor(DraftField::Body));
        let body_lines: Vec<Line> = body_text
            .split('\n')
            .map(|l| Line::from(Span::styled(l.to_string(), text_style)))
            .collect();

        // Keep the end of the body (where typing happens) in view
        let visible = chunks[1].height.saturating_sub(2) as usize;
        let scroll = body_lines.len().saturating_sub(visible) as u16;

        let body = Paragraph::new(body_lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Body ")
                    .border_style(field_border(DraftField::Body)),
            )
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0));
        frame.render_widget(body, chunks[1]);

        let help = if loading {
            Line::from(vec![
                Span::styled(" Esc ", palette.key()),
                Span::raw("Cancel"),
            ])
        } else {
            Line::from(vec![
                Span::styled(" Tab ", palette.key()),
                Span::raw("Switch field  "),
                Span::styled(" Ctrl+S ", Style::default().fg(palette.success).add_modifier(Modifier::BOLD)),
                Span::raw("Send  "),
                Span::styled(" Esc ", Style::default().fg(palette.error).add_modifier(Modifier::BOLD)),
                Span::raw("Discard"),
            ])
        };
        frame.render_widget(Paragraph::new(help).alignment(Alignment::Center), chunks[2]);
    }
}

impl Component for EmailDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let action = match key.code {
            KeyCode::Esc => Some(Action::DiscardEmail),
            KeyCode::Char('s') if ctrl => Some(Action::SendEmail),
            KeyCode::Tab | KeyCode::BackTab => Some(Action::EditorSwitchField),
            KeyCode::Enter => Some(Action::EditorNewline),
            KeyCode::Backspace => Some(Action::EditorBackspace),
            KeyCode::Char(c) if !ctrl => Some(Action::EditorInput(c)),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Needs the draft, so App calls draw_with_draft
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::testing::{buffer_contains, render};
    use crate::model::lead::test_lead;
    use crate::model::ui::Theme;

    #[test]
    fn test_key_mapping() {
        let mut dialog = EmailDialog;
        let ctrl_s = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        let plain_s = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::NONE);
        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(dialog.handle_key_event(ctrl_s).unwrap(), Some(Action::SendEmail));
        assert_eq!(dialog.handle_key_event(plain_s).unwrap(), Some(Action::EditorInput('s')));
        assert_eq!(dialog.handle_key_event(esc).unwrap(), Some(Action::DiscardEmail));
    }

    #[test]
    fn test_draw_placeholder_while_loading() {
        let draft = EmailDraft::placeholder(1);
        let lead = test_lead(1, "ENRICHED");
        let palette = Palette::for_theme(Theme::Light);
        let buffer = render(90, 20, |frame| {
            EmailDialog.draw_with_draft(frame, frame.area(), &draft, Some(&lead), true, &palette)
        });
        assert!(buffer_contains(&buffer, "Generating..."));
        assert!(buffer_contains(&buffer, "Generating personalized email..."));
        assert!(buffer_contains(&buffer, "Clinic 1 <lead1@example.com>"));
    }

    #[test]
    fn test_draw_strips_control_sequences() {
        let draft = EmailDraft {
            lead_id: 2,
            subject: "\x1b[2JHi".to_string(),
            body: "Hello\nthere".to_string(),
            focus: DraftField::Body,
        };
        let palette = Palette::for_theme(Theme::Dark);
        let buffer = render(90, 20, |frame| {
            EmailDialog.draw_with_draft(frame, frame.area(), &draft, None, false, &palette)
        });
        assert!(buffer_contains(&buffer, "Hi"));
        assert!(!buffer_contains(&buffer, "[2J"));
        assert!(buffer_contains(&buffer, "there_"));
    }
}
