//! UI Components
//!
//! Each component encapsulates its own state, event handling, and rendering logic.
//! Components communicate through Actions rather than direct state mutation.

pub mod analytics;
pub mod campaign;
pub mod dashboard;
pub mod email_dialog;
pub mod format;
pub mod help_dialog;
pub mod layout;
pub mod palette;
pub mod progress_dialog;
pub mod quit_dialog;
pub mod scraper;

pub use analytics::AnalyticsComponent;
pub use campaign::{CampaignComponent, CampaignRenderContext};
pub use dashboard::DashboardComponent;
pub use email_dialog::EmailDialog;
pub use help_dialog::HelpDialog;
pub use layout::{calculate_main_layout, centered_popup};
pub use palette::Palette;
pub use progress_dialog::{ProgressDialog, ProgressView};
pub use quit_dialog::QuitDialog;
pub use scraper::ScraperComponent;
