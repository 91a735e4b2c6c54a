//! View state - the client-side copy of server data
//!
//! Every field is replaced wholesale after a confirmed round trip; renderers
//! only ever read from here.

use super::analytics::Analytics;
use super::lead::Lead;
use super::preview::BulkPreviewSet;

#[derive(Debug, Default)]
pub struct ViewState {
    /// Leads from the most recent fetch
    pub all_leads: Vec<Lead>,

    /// Lead open in the email-preview workflow
    pub current_lead_id: Option<i64>,

    /// Bulk previews under review
    pub bulk_previews: BulkPreviewSet,

    /// Most recent analytics payload
    pub analytics: Option<Analytics>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace_leads(&mut self, leads: Vec<Lead>) {
        self.all_leads = leads;
    }

    pub fn lead(&self, id: i64) -> Option<&Lead> {
        self.all_leads.iter().find(|l| l.id == id)
    }
}
