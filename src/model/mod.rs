//! Model layer - centralized state management
//!
//! - `ViewState` - server data cached for rendering (leads, previews, analytics)
//! - `workflow` - email/bulk/scraper state machines
//! - `ModalStack` - modal overlay management

pub mod analytics;
pub mod lead;
pub mod modal;
pub mod outcome;
pub mod preview;
pub mod toast;
pub mod ui;
pub mod view_state;
pub mod workflow;

pub use analytics::Analytics;
pub use lead::{DashboardStats, Lead, LeadList, LeadStatus};
pub use outcome::{ActionResult, BulkSendResult, ScraperResult};
pub use preview::{BulkPreviewResponse, BulkPreviewSet, EmailPreview};
pub use toast::{Toast, ToastKind};
pub use view_state::ViewState;
