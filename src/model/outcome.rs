//! Result payloads of the backend's trigger endpoints

use serde::Deserialize;

/// `{success, error?}` as returned by send-email and run-scheduler
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ActionResult {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// Body of `POST /bulk-send`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BulkSendResult {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub sent: u32,
    #[serde(default)]
    pub failed: u32,
    #[serde(default)]
    pub error: Option<String>,
}

/// Body of `POST /run-scraper`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ScraperResult {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub enriched: Option<u32>,
    #[serde(default)]
    pub error: Option<String>,
}
