//! Backend API client
//!
//! One call per endpoint of the lead backend. Calls are blocking and are run
//! off the UI thread by the request runner.

use crate::model::{
    ActionResult, Analytics, BulkPreviewResponse, BulkSendResult, EmailPreview, LeadList,
    ScraperResult,
};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::debug;

/// Base URL of the lead backend
pub const API_BASE: &str = "http://localhost:5000/api";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx reply; `message` is the body's `error` field when it had one
    #[error("server returned {status}: {}", message.as_deref().unwrap_or("no error text"))]
    Status {
        status: u16,
        message: Option<String>,
    },

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Error text written by the backend, if the reply carried any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

/// Operations offered by the lead backend
pub trait LeadApi: Send + Sync {
    fn fetch_leads(&self) -> Result<LeadList, ApiError>;
    fn preview_email(&self, lead_id: i64) -> Result<EmailPreview, ApiError>;
    fn send_email(&self, lead_id: i64, subject: &str, body: &str)
        -> Result<ActionResult, ApiError>;
    fn bulk_preview(&self) -> Result<BulkPreviewResponse, ApiError>;
    fn bulk_send(&self, lead_ids: &[i64]) -> Result<BulkSendResult, ApiError>;
    fn run_scheduler(&self) -> Result<ActionResult, ApiError>;
    fn run_scraper(&self, query: &str) -> Result<ScraperResult, ApiError>;
    fn fetch_analytics(&self) -> Result<Analytics, ApiError>;
}

/// Error body the backend sends alongside non-2xx statuses
#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// HTTP implementation of [`LeadApi`]
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    pub fn new() -> Self {
        Self::with_base_url(API_BASE)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(self.client.get(self.url(path)))
    }

    fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T, ApiError> {
        let request = self
            .client
            .post(self.url(path))
            .header(CONTENT_TYPE, "application/json");
        let request = match body {
            Some(body) => request.json(&body),
            None => request,
        };
        self.execute(request)
    }

    fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.send()?;
        let status = response.status();
        let text = response.text()?;
        debug!(status = status.as_u16(), bytes = text.len(), "api response");

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&text)
                .ok()
                .and_then(|b| b.error)
                .filter(|m| !m.trim().is_empty());
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_str(&text)?)
    }
}

impl LeadApi for ApiClient {
    fn fetch_leads(&self) -> Result<LeadList, ApiError> {
        self.get("leads")
    }

    fn preview_email(&self, lead_id: i64) -> Result<EmailPreview, ApiError> {
        let mut preview: EmailPreview =
            self.post("preview-email", Some(json!({ "lead_id": lead_id })))?;
        preview.lead_id = lead_id;
        Ok(preview)
    }

    fn send_email(
        &self,
        lead_id: i64,
        subject: &str,
        body: &str,
    ) -> Result<ActionResult, ApiError> {
        self.post(
            "send-email",
            Some(json!({ "lead_id": lead_id, "subject": subject, "body": body })),
        )
    }

    fn bulk_preview(&self) -> Result<BulkPreviewResponse, ApiError> {
        self.post("bulk-preview", None)
    }

    fn bulk_send(&self, lead_ids: &[i64]) -> Result<BulkSendResult, ApiError> {
        self.post("bulk-send", Some(json!({ "lead_ids": lead_ids })))
    }

    fn run_scheduler(&self) -> Result<ActionResult, ApiError> {
        self.post("run-scheduler", None)
    }

    fn run_scraper(&self, query: &str) -> Result<ScraperResult, ApiError> {
        self.post("run-scraper", Some(json!({ "query": query })))
    }

    fn fetch_analytics(&self) -> Result<Analytics, ApiError> {
        self.get("analytics")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LeadStatus;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Run a blocking client call outside the async worker threads
    async fn call<T, F>(server: &MockServer, f: F) -> T
    where
        T: Send + 'static,
        F: FnOnce(ApiClient) -> T + Send + 'static,
    {
        let base = format!("{}/api", server.uri());
        tokio::task::spawn_blocking(move || f(ApiClient::with_base_url(base)))
            .await
            .unwrap()
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let client = ApiClient::with_base_url("http://localhost:5000/api/");
        assert_eq!(client.url("leads"), "http://localhost:5000/api/leads");
    }

    #[test]
    fn test_unreachable_backend_is_transport_error() {
        let client = ApiClient::with_base_url("http://127.0.0.1:9/api");
        let result = client.fetch_leads();
        assert!(matches!(result, Err(ApiError::Transport(_))));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_fetch_leads() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/leads"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true,
                "leads": [
                    {"id": 1, "clinic_name": "A", "email": "a@x.io", "website": null,
                     "name": null, "status": "Enriched", "follow_up_count": 0,
                     "last_contacted": null},
                    {"id": 2, "clinic_name": "B", "email": "b@x.io", "website": null,
                     "name": null, "status": "Contacted", "follow_up_count": 1,
                     "last_contacted": "2024-03-01T10:00:00"}
                ]
            })))
            .mount(&server)
            .await;

        let list = call(&server, |c| c.fetch_leads()).await.unwrap();
        assert_eq!(list.leads.len(), 2);
        assert_eq!(list.leads[0].status, LeadStatus::Enriched);
        assert_eq!(list.leads[1].follow_ups(), 1);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_preview_email_posts_lead_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/preview-email"))
            .and(body_json(serde_json::json!({"lead_id": 1})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true, "subject": "Hi", "body": "Hello"
            })))
            .mount(&server)
            .await;

        let preview = call(&server, |c| c.preview_email(1)).await.unwrap();
        assert_eq!(
            preview,
            EmailPreview {
                lead_id: 1,
                subject: "Hi".to_string(),
                body: "Hello".to_string()
            }
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_bulk_send_posts_ids() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/bulk-send"))
            .and(body_json(serde_json::json!({"lead_ids": [1, 2]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true, "sent": 2, "failed": 0
            })))
            .expect(1)
            .mount(&server)
            .await;

        let result = call(&server, |c| c.bulk_send(&[1, 2])).await.unwrap();
        assert!(result.success);
        assert_eq!((result.sent, result.failed), (2, 0));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_error_status_keeps_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/run-scraper"))
            .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
                "success": false, "error": "rate limited"
            })))
            .mount(&server)
            .await;

        let err = call(&server, |c| c.run_scraper("dentist chicago"))
            .await
            .unwrap_err();
        match err {
            ApiError::Status { status, ref message } => {
                assert_eq!(status, 500);
                assert_eq!(message.as_deref(), Some("rate limited"));
            }
            ref other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.server_message(), Some("rate limited"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_error_status_without_body_has_no_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/run-scheduler"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&server)
            .await;

        let err = call(&server, |c| c.run_scheduler()).await.unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 502, message: None }));
        assert_eq!(err.server_message(), None);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_malformed_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/analytics"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = call(&server, |c| c.fetch_analytics()).await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
