//! Analytics payload and the figures derived from it

use super::lead::LeadStatus;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Day labels of the weekly performance chart
pub const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Per-day email counters, one value per weekday
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DailyStats {
    #[serde(default)]
    pub sent: Vec<u64>,
    #[serde(default)]
    pub opened: Vec<u64>,
}

/// Body of `GET /analytics`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Analytics {
    #[serde(default)]
    pub status_counts: BTreeMap<String, u64>,
    #[serde(default)]
    pub daily_stats: DailyStats,
}

/// One slice of the status distribution
#[derive(Debug, Clone, PartialEq)]
pub struct StatusShare {
    pub label: String,
    pub count: u64,
    pub percent: f64,
}

/// A weekday column of the performance chart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayBar {
    pub day: &'static str,
    pub sent: u64,
    pub opened: u64,
}

impl Analytics {
    pub fn total(&self) -> u64 {
        self.status_counts.values().sum()
    }

    fn count_where(&self, pred: impl Fn(&LeadStatus) -> bool) -> u64 {
        self.status_counts
            .iter()
            .filter(|(status, _)| pred(&LeadStatus::from(status.as_str())))
            .map(|(_, count)| *count)
            .sum()
    }

    /// Leads that were emailed at least once (including those who replied)
    pub fn reached(&self) -> u64 {
        self.count_where(|s| s.is_in_outreach() || *s == LeadStatus::Replied)
    }

    pub fn replied(&self) -> u64 {
        self.count_where(|s| *s == LeadStatus::Replied)
    }

    /// Reached leads as a share of all leads, in percent
    pub fn reach_rate(&self) -> f64 {
        percent(self.reached(), self.total())
    }

    /// Replies as a share of reached leads, in percent
    pub fn reply_rate(&self) -> f64 {
        percent(self.replied(), self.reached())
    }

    /// Status distribution, one entry per status in label order
    ///
    /// Keys differing only in case are the same status and are summed.
    pub fn status_shares(&self) -> Vec<StatusShare> {
        let total = self.total();
        let mut grouped: BTreeMap<String, u64> = BTreeMap::new();
        for (raw, count) in &self.status_counts {
            *grouped
                .entry(LeadStatus::from(raw.as_str()).to_string())
                .or_default() += count;
        }
        grouped
            .into_iter()
            .map(|(label, count)| StatusShare {
                label,
                count,
                percent: percent(count, total),
            })
            .collect()
    }

    /// Seven weekday columns; missing days count as zero
    pub fn weekly_bars(&self) -> Vec<DayBar> {
        WEEKDAYS
            .iter()
            .enumerate()
            .map(|(i, day)| DayBar {
                day,
                sent: self.daily_stats.sent.get(i).copied().unwrap_or(0),
                opened: self.daily_stats.opened.get(i).copied().unwrap_or(0),
            })
            .collect()
    }
}

fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Analytics {
        serde_json::from_str(
            r#"{
                "success": true,
                "status_counts": {"Enriched": 4, "Contacted": 3, "Followup_1": 1, "Replied": 2},
                "daily_stats": {"sent": [1, 2, 3], "opened": [0, 1]}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_rates() {
        let analytics = sample();
        assert_eq!(analytics.total(), 10);
        assert_eq!(analytics.reached(), 6);
        assert_eq!(analytics.replied(), 2);
        assert!((analytics.reach_rate() - 60.0).abs() < f64::EPSILON);
        assert!((analytics.reply_rate() - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_rates_on_empty_payload() {
        let analytics = Analytics::default();
        assert_eq!(analytics.reach_rate(), 0.0);
        assert_eq!(analytics.reply_rate(), 0.0);
        assert!(analytics.status_shares().is_empty());
    }

    #[test]
    fn test_status_shares_use_canonical_labels() {
        let shares = sample().status_shares();
        let labels: Vec<&str> = shares.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["CONTACTED", "ENRICHED", "FOLLOWUP_1", "REPLIED"]);
        let sum: f64 = shares.iter().map(|s| s.percent).sum();
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_status_shares_merge_case_variants() {
        let analytics = Analytics {
            status_counts: BTreeMap::from([
                ("Enriched".to_string(), 3),
                ("ENRICHED".to_string(), 2),
                ("replied".to_string(), 5),
            ]),
            daily_stats: DailyStats::default(),
        };
        let shares = analytics.status_shares();
        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0].label, "ENRICHED");
        assert_eq!(shares[0].count, 5);
        assert!((shares[0].percent - 50.0).abs() < 1e-9);
        assert_eq!(shares[1].label, "REPLIED");
        assert_eq!(shares[1].count, 5);
    }

    #[test]
    fn test_weekly_bars_pad_missing_days() {
        let bars = sample().weekly_bars();
        assert_eq!(bars.len(), 7);
        assert_eq!(bars[0], DayBar { day: "Mon", sent: 1, opened: 0 });
        assert_eq!(bars[2].sent, 3);
        assert_eq!(bars[6], DayBar { day: "Sun", sent: 0, opened: 0 });
    }
}
