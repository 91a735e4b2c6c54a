//! External service interactions
//!
//! - Backend HTTP API
//! - Background request execution
//! - CSV export

pub mod api;
pub mod export;
pub mod request_runner;

pub use api::{ApiClient, ApiError, LeadApi, API_BASE};
pub use export::export_leads;
pub use request_runner::{ApiReply, ApiRequest, RequestRunner};
