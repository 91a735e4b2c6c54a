//! Colors for the light and dark themes

use crate::model::ui::Theme;
use crate::model::LeadStatus;
use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bg: Color,
    pub fg: Color,
    pub muted: Color,
    pub border: Color,
    pub accent: Color,
    pub highlight_bg: Color,
    pub highlight_fg: Color,
    pub success: Color,
    pub error: Color,
    pub warning: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Palette {
                bg: Color::White,
                fg: Color::Black,
                muted: Color::DarkGray,
                border: Color::Gray,
                accent: Color::Blue,
                highlight_bg: Color::Blue,
                highlight_fg: Color::White,
                success: Color::Green,
                error: Color::Red,
                warning: Color::Rgb(180, 110, 0),
            },
            Theme::Dark => Palette {
                bg: Color::Black,
                fg: Color::White,
                muted: Color::Gray,
                border: Color::DarkGray,
                accent: Color::Cyan,
                highlight_bg: Color::Blue,
                highlight_fg: Color::White,
                success: Color::LightGreen,
                error: Color::LightRed,
                warning: Color::Yellow,
            },
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn key(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    /// Badge color per status
    pub fn status(&self, status: &LeadStatus) -> Color {
        match status {
            LeadStatus::Found => self.muted,
            LeadStatus::Enriched => self.accent,
            LeadStatus::MissingInfo => self.error,
            LeadStatus::Contacted
            | LeadStatus::Followup1
            | LeadStatus::Followup2
            | LeadStatus::Followup3 => self.warning,
            LeadStatus::Replied | LeadStatus::Closed => self.success,
            LeadStatus::Other(_) => self.fg,
        }
    }
}
