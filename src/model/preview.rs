//! Email previews, single and bulk

use serde::Deserialize;
use std::collections::HashMap;

/// Generated email for one lead, editable before sending
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EmailPreview {
    #[serde(default)]
    pub lead_id: i64,
    pub subject: String,
    pub body: String,
}

/// The reduced lead record embedded in bulk previews
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PreviewLead {
    pub id: i64,
    #[serde(default)]
    pub clinic_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// One entry of `POST /bulk-preview`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BulkPreviewEntry {
    pub lead: PreviewLead,
    pub subject: String,
    pub body: String,
}

/// Body of `POST /bulk-preview`, keyed by lead id as a string
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BulkPreviewResponse {
    #[serde(default)]
    pub previews: HashMap<String, BulkPreviewEntry>,
}

/// A reviewed bulk preview item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkItem {
    /// Wire key, kept for display and as the send identifier
    pub key: String,
    pub lead_id: i64,
    pub entry: BulkPreviewEntry,
    pub included: bool,
    pub expanded: bool,
}

/// Bulk previews under review, in ascending lead id order
///
/// Every item starts included. Counters are always derived from the items
/// themselves rather than tracked separately.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkPreviewSet {
    items: Vec<BulkItem>,
}

impl BulkPreviewSet {
    pub fn from_response(response: BulkPreviewResponse) -> Self {
        let mut items: Vec<BulkItem> = response
            .previews
            .into_iter()
            .map(|(key, entry)| {
                let lead_id = key.trim().parse::<i64>().unwrap_or(entry.lead.id);
                BulkItem {
                    key,
                    lead_id,
                    entry,
                    included: true,
                    expanded: false,
                }
            })
            .collect();
        items.sort_by_key(|item| item.lead_id);
        Self { items }
    }

    pub fn items(&self) -> &[BulkItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Flip inclusion of the item at `index`
    pub fn toggle(&mut self, index: usize) {
        if let Some(item) = self.items.get_mut(index) {
            item.included = !item.included;
        }
    }

    /// Expand or collapse the email body of the item at `index`
    pub fn toggle_expanded(&mut self, index: usize) {
        if let Some(item) = self.items.get_mut(index) {
            item.expanded = !item.expanded;
        }
    }

    /// Ids of the items currently included
    pub fn selected_ids(&self) -> Vec<i64> {
        self.items
            .iter()
            .filter(|item| item.included)
            .map(|item| item.lead_id)
            .collect()
    }

    /// `(checked, total)` as shown in the selection counter
    pub fn selection_count(&self) -> (usize, usize) {
        let checked = self.items.iter().filter(|item| item.included).count();
        (checked, self.items.len())
    }
}

#[cfg(test)]
pub(crate) fn test_bulk_response(ids: &[i64]) -> BulkPreviewResponse {
    let previews = ids
        .iter()
        .map(|id| {
            (
                id.to_string(),
                BulkPreviewEntry {
                    lead: PreviewLead {
                        id: *id,
                        clinic_name: Some(format!("Clinic {}", id)),
                        email: Some(format!("lead{}@example.com", id)),
                        name: None,
                    },
                    subject: format!("Question for Clinic {}", id),
                    body: format!("Hello clinic {}", id),
                },
            )
        })
        .collect();
    BulkPreviewResponse { previews }
}
