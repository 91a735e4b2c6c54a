//! UI state - pages, tabs, theme and the status filter

use super::lead::{LeadStatus, FILTERABLE_STATUSES};
use serde::{Deserialize, Serialize};

/// Top-level page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    Campaign,
    Scraper,
    Analytics,
}

impl Page {
    pub fn all() -> [Page; 4] {
        [Page::Dashboard, Page::Campaign, Page::Scraper, Page::Analytics]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Campaign => "Campaign",
            Page::Scraper => "Scraper",
            Page::Analytics => "Analytics",
        }
    }

    /// Page bound to a number key (1-based)
    pub fn from_digit(c: char) -> Option<Page> {
        let index = c.to_digit(10)? as usize;
        Page::all().get(index.checked_sub(1)?).copied()
    }
}

/// Tabs of the campaign page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CampaignTab {
    Individual,
    Bulk,
    Followups,
}

impl CampaignTab {
    pub fn all() -> [CampaignTab; 3] {
        [CampaignTab::Individual, CampaignTab::Bulk, CampaignTab::Followups]
    }

    pub fn name(&self) -> &'static str {
        match self {
            CampaignTab::Individual => "Individual Emails",
            CampaignTab::Bulk => "Bulk Send",
            CampaignTab::Followups => "Follow-ups",
        }
    }

    pub fn next(self) -> CampaignTab {
        let tabs = CampaignTab::all();
        let index = tabs.iter().position(|t| *t == self).unwrap_or(0);
        tabs[(index + 1) % tabs.len()]
    }

    pub fn previous(self) -> CampaignTab {
        let tabs = CampaignTab::all();
        let index = tabs.iter().position(|t| *t == self).unwrap_or(0);
        tabs[(index + tabs.len() - 1) % tabs.len()]
    }
}

/// Colour theme, persisted as `light` / `dark`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

/// Next value of the dashboard status filter: all → each status → all
pub fn next_status_filter(current: Option<&LeadStatus>) -> Option<LeadStatus> {
    match current {
        None => FILTERABLE_STATUSES.first().cloned(),
        Some(status) => {
            let index = FILTERABLE_STATUSES.iter().position(|s| s == status)?;
            FILTERABLE_STATUSES.get(index + 1).cloned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_from_digit() {
        assert_eq!(Page::from_digit('1'), Some(Page::Dashboard));
        assert_eq!(Page::from_digit('4'), Some(Page::Analytics));
        assert_eq!(Page::from_digit('0'), None);
        assert_eq!(Page::from_digit('5'), None);
    }

    #[test]
    fn test_campaign_tab_cycle() {
        assert_eq!(CampaignTab::Followups.next(), CampaignTab::Individual);
        assert_eq!(CampaignTab::Individual.previous(), CampaignTab::Followups);
    }

    #[test]
    fn test_status_filter_cycles_back_to_all() {
        let mut filter = None;
        let mut seen = 0;
        loop {
            filter = next_status_filter(filter.as_ref());
            if filter.is_none() {
                break;
            }
            seen += 1;
        }
        assert_eq!(seen, FILTERABLE_STATUSES.len());
    }

    #[test]
    fn test_theme_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
    }
}
