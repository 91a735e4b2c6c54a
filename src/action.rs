//! Action enum - All possible application actions
//!
//! Components turn key events into Actions; the App processes them to run
//! workflows and update state.

use crate::model::ui::Page;
use std::fmt;

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick: drains API replies and advances timers
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Quit without confirmation
    ForceQuit,

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────
    /// Show a page (and load its data)
    SwitchPage(Page),
    /// Next campaign tab
    NextTab,
    /// Previous campaign tab
    PrevTab,
    /// Move to next row/card
    NextItem,
    /// Move to previous row/card
    PrevItem,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    OpenQuitDialog,
    OpenHelp,
    CloseModal,

    // ─────────────────────────────────────────────────────────────────────────
    // Dashboard
    // ─────────────────────────────────────────────────────────────────────────
    /// Reload leads and confirm with a toast
    RefreshDashboard,
    /// Advance the status filter to the next status
    CycleStatusFilter,
    /// Show all statuses again
    ClearStatusFilter,
    /// Write the visible rows to CSV
    ExportLeads,
    /// Toggle light/dark theme
    ToggleTheme,

    // ─────────────────────────────────────────────────────────────────────────
    // Single email
    // ─────────────────────────────────────────────────────────────────────────
    /// Open the preview for the focused lead
    PreviewSelected,
    /// Open the preview for a given lead
    OpenEmailPreview(i64),
    /// Switch between subject and body
    EditorSwitchField,
    EditorInput(char),
    EditorNewline,
    EditorBackspace,
    SendEmail,
    DiscardEmail,

    // ─────────────────────────────────────────────────────────────────────────
    // Bulk
    // ─────────────────────────────────────────────────────────────────────────
    BulkPreview,
    ToggleBulkItem,
    ExpandBulkItem,
    BulkSend,
    DiscardBulk,

    // ─────────────────────────────────────────────────────────────────────────
    // Follow-ups & scraper
    // ─────────────────────────────────────────────────────────────────────────
    RunScheduler,
    EnterQueryMode,
    ExitQueryMode,
    QueryInput(char),
    QueryBackspace,
    RunScraper,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::SwitchPage(page) => write!(f, "SwitchPage({})", page.name()),
            Action::OpenEmailPreview(id) => write!(f, "OpenEmailPreview({})", id),
            Action::EditorInput(c) => write!(f, "EditorInput('{}')", c),
            Action::QueryInput(c) => write!(f, "QueryInput('{}')", c),
            other => write!(f, "{:?}", other),
        }
    }
}
