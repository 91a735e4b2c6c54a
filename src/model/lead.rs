//! Lead records as served by the backend
//!
//! Leads are owned by the server. The dashboard keeps a read-only copy that is
//! replaced wholesale on every fetch, so nothing in here mutates a lead.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outreach status of a lead
///
/// The backend stores statuses in title case (`Enriched`, `Followup_1`) while
/// older payloads use upper case. Both are accepted; anything unknown is kept
/// verbatim so it can still be displayed and filtered on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LeadStatus {
    Found,
    Enriched,
    MissingInfo,
    Contacted,
    Followup1,
    Followup2,
    Followup3,
    Replied,
    Closed,
    Other(String),
}

/// Statuses the dashboard filter cycles through, in display order
pub const FILTERABLE_STATUSES: [LeadStatus; 9] = [
    LeadStatus::Found,
    LeadStatus::Enriched,
    LeadStatus::MissingInfo,
    LeadStatus::Contacted,
    LeadStatus::Followup1,
    LeadStatus::Followup2,
    LeadStatus::Followup3,
    LeadStatus::Replied,
    LeadStatus::Closed,
];

impl LeadStatus {
    /// Canonical upper-case label
    pub fn as_str(&self) -> &str {
        match self {
            LeadStatus::Found => "FOUND",
            LeadStatus::Enriched => "ENRICHED",
            LeadStatus::MissingInfo => "MISSING_INFO",
            LeadStatus::Contacted => "CONTACTED",
            LeadStatus::Followup1 => "FOLLOWUP_1",
            LeadStatus::Followup2 => "FOLLOWUP_2",
            LeadStatus::Followup3 => "FOLLOWUP_3",
            LeadStatus::Replied => "REPLIED",
            LeadStatus::Closed => "CLOSED",
            LeadStatus::Other(raw) => raw,
        }
    }

    /// Only enriched leads can go through the preview/send workflow
    pub fn is_sendable(&self) -> bool {
        matches!(self, LeadStatus::Enriched)
    }

    /// Contacted or in one of the follow-up stages
    pub fn is_in_outreach(&self) -> bool {
        matches!(self, LeadStatus::Contacted) || self.is_followup()
    }

    pub fn is_followup(&self) -> bool {
        matches!(
            self,
            LeadStatus::Followup1 | LeadStatus::Followup2 | LeadStatus::Followup3
        )
    }
}

impl From<String> for LeadStatus {
    fn from(raw: String) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "FOUND" => LeadStatus::Found,
            "ENRICHED" => LeadStatus::Enriched,
            "MISSING_INFO" => LeadStatus::MissingInfo,
            "CONTACTED" => LeadStatus::Contacted,
            "FOLLOWUP_1" => LeadStatus::Followup1,
            "FOLLOWUP_2" => LeadStatus::Followup2,
            "FOLLOWUP_3" => LeadStatus::Followup3,
            "REPLIED" => LeadStatus::Replied,
            "CLOSED" => LeadStatus::Closed,
            _ => LeadStatus::Other(raw),
        }
    }
}

impl From<&str> for LeadStatus {
    fn from(raw: &str) -> Self {
        LeadStatus::from(raw.to_string())
    }
}

impl From<LeadStatus> for String {
    fn from(status: LeadStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single lead
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub id: i64,
    #[serde(default)]
    pub clinic_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    pub status: LeadStatus,
    #[serde(default)]
    pub follow_up_count: Option<u32>,
    /// ISO-8601 timestamp, kept as sent by the server
    #[serde(default)]
    pub last_contacted: Option<String>,
}

impl Lead {
    pub fn follow_ups(&self) -> u32 {
        self.follow_up_count.unwrap_or(0)
    }
}

/// Body of `GET /leads`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeadList {
    #[serde(default)]
    pub leads: Vec<Lead>,
}

/// Summary counters shown on top of the dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub total: usize,
    pub contacted: usize,
    pub emails_sent: usize,
    pub followups: usize,
}

impl DashboardStats {
    /// Recompute counters from scratch for the given leads
    pub fn from_leads(leads: &[Lead]) -> Self {
        let contacted = leads.iter().filter(|l| l.status.is_in_outreach()).count();
        let followups = leads.iter().filter(|l| l.status.is_followup()).count();
        Self {
            total: leads.len(),
            contacted,
            emails_sent: contacted,
            followups,
        }
    }
}

/// Filter leads by exact status; `None` keeps everything
pub fn filter_by_status<'a>(leads: &'a [Lead], status: Option<&LeadStatus>) -> Vec<&'a Lead> {
    match status {
        Some(status) => leads.iter().filter(|l| &l.status == status).collect(),
        None => leads.iter().collect(),
    }
}

pub fn enriched_leads(leads: &[Lead]) -> Vec<&Lead> {
    leads.iter().filter(|l| l.status.is_sendable()).collect()
}

pub fn outreach_leads(leads: &[Lead]) -> Vec<&Lead> {
    leads.iter().filter(|l| l.status.is_in_outreach()).collect()
}

#[cfg(test)]
pub(crate) fn test_lead(id: i64, status: &str) -> Lead {
    Lead {
        id,
        clinic_name: Some(format!("Clinic {}", id)),
        email: Some(format!("lead{}@example.com", id)),
        website: Some(format!("https://clinic{}.example.com", id)),
        name: Some(format!("Dr. {}", id)),
        status: LeadStatus::from(status),
        follow_up_count: Some(0),
        last_contacted: None,
    }
}
