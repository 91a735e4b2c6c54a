//! Background request runner
//!
//! Each API call runs on its own thread and posts its reply to a channel that
//! the UI drains on every tick, so the event loop never waits on the network.

use crate::model::{
    ActionResult, Analytics, BulkPreviewResponse, BulkSendResult, EmailPreview, LeadList,
    ScraperResult,
};
use crate::services::api::{ApiError, LeadApi};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread;
use tracing::debug;

/// A backend call waiting to be executed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRequest {
    FetchLeads,
    PreviewEmail { lead_id: i64 },
    SendEmail { lead_id: i64, subject: String, body: String },
    BulkPreview,
    BulkSend { lead_ids: Vec<i64> },
    RunScheduler,
    RunScraper { query: String },
    FetchAnalytics,
}

impl ApiRequest {
    pub fn name(&self) -> &'static str {
        match self {
            ApiRequest::FetchLeads => "fetch_leads",
            ApiRequest::PreviewEmail { .. } => "preview_email",
            ApiRequest::SendEmail { .. } => "send_email",
            ApiRequest::BulkPreview => "bulk_preview",
            ApiRequest::BulkSend { .. } => "bulk_send",
            ApiRequest::RunScheduler => "run_scheduler",
            ApiRequest::RunScraper { .. } => "run_scraper",
            ApiRequest::FetchAnalytics => "fetch_analytics",
        }
    }

    fn execute(self, api: &dyn LeadApi) -> ApiReply {
        match self {
            ApiRequest::FetchLeads => ApiReply::Leads(api.fetch_leads()),
            ApiRequest::PreviewEmail { lead_id } => ApiReply::Preview {
                lead_id,
                result: api.preview_email(lead_id),
            },
            ApiRequest::SendEmail {
                lead_id,
                subject,
                body,
            } => ApiReply::EmailSent(api.send_email(lead_id, &subject, &body)),
            ApiRequest::BulkPreview => ApiReply::BulkPreview(api.bulk_preview()),
            ApiRequest::BulkSend { lead_ids } => ApiReply::BulkSent(api.bulk_send(&lead_ids)),
            ApiRequest::RunScheduler => ApiReply::Scheduler(api.run_scheduler()),
            ApiRequest::RunScraper { query } => ApiReply::Scraper(api.run_scraper(&query)),
            ApiRequest::FetchAnalytics => ApiReply::Analytics(api.fetch_analytics()),
        }
    }
}

/// Outcome of an [`ApiRequest`]
#[derive(Debug)]
pub enum ApiReply {
    Leads(Result<LeadList, ApiError>),
    Preview {
        lead_id: i64,
        result: Result<EmailPreview, ApiError>,
    },
    EmailSent(Result<ActionResult, ApiError>),
    BulkPreview(Result<BulkPreviewResponse, ApiError>),
    BulkSent(Result<BulkSendResult, ApiError>),
    Scheduler(Result<ActionResult, ApiError>),
    Scraper(Result<ScraperResult, ApiError>),
    Analytics(Result<Analytics, ApiError>),
}

impl ApiReply {
    /// User-facing text shown when the call itself failed
    pub fn failure_message(&self) -> &'static str {
        match self {
            ApiReply::Leads(_) => "Failed to load leads",
            ApiReply::Preview { .. } => "Failed to generate email preview",
            ApiReply::EmailSent(_) => "Failed to send email",
            ApiReply::BulkPreview(_) => "Failed to generate bulk preview",
            ApiReply::BulkSent(_) => "Failed to send bulk emails",
            ApiReply::Scheduler(_) => "Failed to run scheduler",
            ApiReply::Scraper(_) => "Failed to start scraper",
            ApiReply::Analytics(_) => "Failed to fetch analytics",
        }
    }
}

/// Runs API requests on worker threads
pub struct RequestRunner {
    api: Arc<dyn LeadApi>,
    sender: Sender<ApiReply>,
    receiver: Receiver<ApiReply>,
    in_flight: usize,
}

impl RequestRunner {
    pub fn new(api: Arc<dyn LeadApi>) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            api,
            sender,
            receiver,
            in_flight: 0,
        }
    }

    /// Start a request in the background
    pub fn spawn(&mut self, request: ApiRequest) {
        debug!(request = request.name(), "dispatching request");
        let api = Arc::clone(&self.api);
        let tx = self.sender.clone();

        thread::spawn(move || {
            let reply = request.execute(api.as_ref());
            let _ = tx.send(reply);
        });

        self.in_flight += 1;
    }

    /// Collect every reply that has arrived since the last poll
    pub fn poll(&mut self) -> Vec<ApiReply> {
        let mut replies = Vec::new();
        loop {
            match self.receiver.try_recv() {
                Ok(reply) => {
                    self.in_flight = self.in_flight.saturating_sub(1);
                    replies.push(reply);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        replies
    }

    /// Number of requests whose reply has not been polled yet
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }
}
