//! Root application component
//!
//! The App struct implements the Component trait, acting as the root component
//! that delegates event handling and rendering to child components. It owns the
//! view state and drives the email, bulk, scheduler and scraper workflows by
//! dispatching requests to the background runner and applying their replies.

use crate::action::Action;
use crate::component::Component;
use crate::components::progress_dialog::{BULK_TITLE, SINGLE_TITLE, WAIT_TEXT};
use crate::components::{
    calculate_main_layout, AnalyticsComponent, CampaignComponent, CampaignRenderContext,
    DashboardComponent, EmailDialog, HelpDialog, Palette, ProgressDialog, ProgressView,
    QuitDialog, ScraperComponent,
};
use crate::config::Config;
use crate::model::modal::{Modal, ModalStack};
use crate::model::ui::{CampaignTab, Page};
use crate::model::workflow::{
    BulkWorkflow, EmailDraft, EmailWorkflow, LogLevel, ScraperLog, SimulatedProgress,
};
use crate::model::{BulkPreviewSet, BulkSendResult, Toast, ToastKind, ViewState};
use crate::services::{export_leads, ApiError, ApiReply, ApiRequest, LeadApi, RequestRunner};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

// ═══════════════════════════════════════════════════════════════════════════════
// App Struct
// ═══════════════════════════════════════════════════════════════════════════════

/// Main application state - coordinates between components
pub struct App {
    /// Server data cached for rendering
    pub view: ViewState,

    /// Modal overlay stack
    pub modals: ModalStack,

    /// Background API requests
    pub runner: RequestRunner,

    /// Page currently shown
    pub page: Page,

    pub email: EmailWorkflow,
    pub bulk: BulkWorkflow,

    /// Cosmetic bar shown while a bulk send is in flight
    pub bulk_progress: Option<SimulatedProgress>,

    /// Bulk reply held back until the bar has shown 100%
    pending_bulk: Option<Result<BulkSendResult, ApiError>>,

    pub scheduler_running: bool,
    pub scraper_running: bool,
    pub scraper_log: ScraperLog,
    pub analytics_loading: bool,

    /// A leads fetch is in flight
    leads_loading: bool,
    /// Another fetch is needed once the in-flight one lands
    leads_stale: bool,
    /// Confirm the next successful reload with a toast
    refresh_requested: bool,

    /// Transient notification
    pub toast: Option<Toast>,

    /// Persisted preferences
    pub config: Config,

    /// Flag to indicate the app should quit
    pub should_quit: bool,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub dashboard: DashboardComponent,
    pub campaign: CampaignComponent,
    pub scraper: ScraperComponent,
    pub analytics: AnalyticsComponent,
    pub email_dialog: EmailDialog,
    pub progress_dialog: ProgressDialog,
    pub quit_dialog: QuitDialog,
    pub help_dialog: HelpDialog,
}

// ═══════════════════════════════════════════════════════════════════════════════
// App Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    /// Create a new App instance
    pub fn new(api: Arc<dyn LeadApi>, config: Config) -> App {
        App {
            view: ViewState::new(),
            modals: ModalStack::new(),
            runner: RequestRunner::new(api),
            page: Page::Dashboard,
            email: EmailWorkflow::Idle,
            bulk: BulkWorkflow::Idle,
            bulk_progress: None,
            pending_bulk: None,
            scheduler_running: false,
            scraper_running: false,
            scraper_log: ScraperLog::default(),
            analytics_loading: false,
            leads_loading: false,
            leads_stale: false,
            refresh_requested: false,
            toast: None,
            config,
            should_quit: false,
            // Components
            dashboard: DashboardComponent::new(),
            campaign: CampaignComponent::new(),
            scraper: ScraperComponent::new(),
            analytics: AnalyticsComponent,
            email_dialog: EmailDialog,
            progress_dialog: ProgressDialog,
            quit_dialog: QuitDialog,
            help_dialog: HelpDialog::default(),
        }
    }

    pub fn palette(&self) -> Palette {
        Palette::for_theme(self.config.theme)
    }

    fn show_success(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::success(message));
    }

    fn show_error(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::error(message));
    }

    /// Reload leads for both the dashboard and the campaign page
    ///
    /// A request already in flight is reused; a second one follows it so the
    /// final state reflects everything that happened before this call.
    fn reload_leads(&mut self) {
        if self.leads_loading {
            self.leads_stale = true;
            return;
        }
        self.leads_loading = true;
        self.runner.spawn(ApiRequest::FetchLeads);
    }

    fn load_analytics(&mut self) {
        if self.analytics_loading {
            return;
        }
        self.analytics_loading = true;
        self.runner.spawn(ApiRequest::FetchAnalytics);
    }

    fn switch_page(&mut self, page: Page) {
        debug!(page = page.name(), "switching page");
        self.page = page;
        match page {
            Page::Dashboard | Page::Campaign => self.reload_leads(),
            Page::Analytics => self.load_analytics(),
            Page::Scraper => {}
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Single email
    // ─────────────────────────────────────────────────────────────────────────

    fn open_email_preview(&mut self, lead_id: i64) {
        if self.email != EmailWorkflow::Idle {
            return;
        }
        let sendable = self
            .view
            .lead(lead_id)
            .is_some_and(|lead| lead.status.is_sendable());
        if !sendable {
            return;
        }

        info!(lead_id, "generating email preview");
        self.view.current_lead_id = Some(lead_id);
        self.email = EmailWorkflow::PreviewLoading(EmailDraft::placeholder(lead_id));
        self.modals.push(Modal::EmailEditor);
        self.runner.spawn(ApiRequest::PreviewEmail { lead_id });
    }

    fn send_email(&mut self) {
        let EmailWorkflow::PreviewReady(draft) = &self.email else {
            return;
        };
        let lead_id = draft.lead_id;
        let request = ApiRequest::SendEmail {
            lead_id,
            subject: draft.subject.clone(),
            body: draft.body.clone(),
        };
        info!(lead_id, "sending email");

        self.email = EmailWorkflow::Sending { lead_id };
        self.modals.close(Modal::EmailEditor);
        self.modals.push(Modal::Progress);
        self.runner.spawn(request);
    }

    fn discard_email(&mut self) {
        if matches!(self.email, EmailWorkflow::Sending { .. }) {
            return;
        }
        self.email = EmailWorkflow::Idle;
        self.view.current_lead_id = None;
        self.modals.close(Modal::EmailEditor);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Bulk
    // ─────────────────────────────────────────────────────────────────────────

    fn bulk_preview(&mut self) {
        if matches!(self.bulk, BulkWorkflow::PreviewLoading | BulkWorkflow::Sending) {
            return;
        }
        info!("generating bulk previews");
        self.bulk = BulkWorkflow::PreviewLoading;
        self.runner.spawn(ApiRequest::BulkPreview);
    }

    fn bulk_send(&mut self, now: Instant) {
        if matches!(self.bulk, BulkWorkflow::PreviewLoading | BulkWorkflow::Sending) {
            return;
        }
        let lead_ids = self.view.bulk_previews.selected_ids();
        if lead_ids.is_empty() {
            self.show_error("No leads selected");
            return;
        }

        info!(count = lead_ids.len(), "sending bulk emails");
        self.bulk = BulkWorkflow::Sending;
        self.bulk_progress = Some(SimulatedProgress::start(now));
        self.modals.push(Modal::Progress);
        self.runner.spawn(ApiRequest::BulkSend { lead_ids });
    }

    fn discard_bulk(&mut self) {
        if self.bulk == BulkWorkflow::Sending {
            return;
        }
        self.view.bulk_previews.clear();
        self.bulk = BulkWorkflow::Idle;
        self.campaign
            .sync_selection(&self.view.all_leads, &self.view.bulk_previews);
    }

    /// Close the progress modal and report the held bulk reply
    fn finish_bulk_send(&mut self) {
        self.bulk_progress = None;
        self.modals.close(Modal::Progress);

        match self.pending_bulk.take() {
            Some(Ok(result)) if result.success => {
                info!(sent = result.sent, failed = result.failed, "bulk send complete");
                self.show_success(format!(
                    "Bulk send complete! Sent: {}, Failed: {}",
                    result.sent, result.failed
                ));
                self.view.bulk_previews.clear();
                self.bulk = BulkWorkflow::Idle;
            }
            Some(Ok(result)) => {
                warn!(error = ?result.error, "bulk send rejected");
                self.show_error(result.error.unwrap_or_else(|| "Bulk send failed".to_string()));
                self.bulk = BulkWorkflow::Reviewing;
            }
            Some(Err(e)) => {
                error!(error = %e, "bulk send failed");
                self.show_error(e.server_message().unwrap_or("Failed to send bulk emails"));
                self.bulk = BulkWorkflow::Reviewing;
            }
            None => {
                self.bulk = BulkWorkflow::Reviewing;
            }
        }

        self.campaign
            .sync_selection(&self.view.all_leads, &self.view.bulk_previews);
        self.reload_leads();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Scheduler & scraper
    // ─────────────────────────────────────────────────────────────────────────

    fn run_scheduler(&mut self) {
        if self.scheduler_running {
            return;
        }
        info!("running follow-up scheduler");
        self.scheduler_running = true;
        self.runner.spawn(ApiRequest::RunScheduler);
    }

    fn run_scraper(&mut self, now: Instant) {
        if self.scraper_running {
            return;
        }
        let Some(query) = self.scraper.submitted_query() else {
            self.show_error("Please enter a search query");
            return;
        };

        info!(%query, "starting scraper");
        self.scraper.exit_query_mode();
        self.scraper_running = true;
        self.scraper_log.start(&query, now);
        self.runner.spawn(ApiRequest::RunScraper { query });
    }

    fn export_visible_leads(&mut self) {
        let visible = self.dashboard.visible_leads(&self.view.all_leads);
        let count = visible.len();
        match export_leads(&visible, &self.config.export_dir()) {
            Ok(path) => {
                info!(path = %path.display(), count, "exported leads");
                self.show_success(format!("Exported {} leads to {}", count, path.display()));
            }
            Err(e) => {
                error!(error = %e, "export failed");
                self.show_error("Export failed");
            }
        }
    }

    fn toggle_theme(&mut self) {
        self.config.theme = self.config.theme.toggled();
        info!(theme = self.config.theme.as_str(), "theme changed");
        if let Err(e) = self.config.save() {
            warn!(error = %e, "could not save theme");
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Replies
    // ─────────────────────────────────────────────────────────────────────────

    fn on_tick(&mut self, now: Instant) {
        for reply in self.runner.poll() {
            self.handle_reply(reply, now);
        }

        if self.scraper_log.is_running() {
            self.scraper_log.advance(now);
        }

        if self
            .bulk_progress
            .as_ref()
            .is_some_and(|p| p.hold_elapsed(now))
        {
            self.finish_bulk_send();
        }

        if self.toast.as_ref().is_some_and(|t| t.is_expired(now)) {
            self.toast = None;
        }
    }

    fn handle_reply(&mut self, reply: ApiReply, now: Instant) {
        let failure = reply.failure_message();
        match reply {
            ApiReply::Leads(result) => {
                self.leads_loading = false;
                match result {
                    Ok(list) => {
                        debug!(count = list.leads.len(), "leads loaded");
                        self.view.replace_leads(list.leads);
                        if std::mem::take(&mut self.refresh_requested) {
                            self.show_success("Dashboard refreshed");
                        }
                    }
                    Err(e) => {
                        error!(error = %e, "fetch_leads failed");
                        self.refresh_requested = false;
                        self.view.replace_leads(Vec::new());
                        self.show_error(failure);
                    }
                }
                self.dashboard.sync_selection(&self.view.all_leads);
                self.campaign
                    .sync_selection(&self.view.all_leads, &self.view.bulk_previews);

                if std::mem::take(&mut self.leads_stale) {
                    self.reload_leads();
                }
            }

            ApiReply::Preview { lead_id, result } => {
                // The editor may have been discarded or reopened meanwhile
                let waiting = matches!(&self.email, EmailWorkflow::PreviewLoading(d) if d.lead_id == lead_id);
                if !waiting {
                    debug!(lead_id, "dropping stale preview");
                    return;
                }
                match result {
                    Ok(preview) => {
                        self.email = EmailWorkflow::PreviewReady(EmailDraft {
                            lead_id,
                            subject: preview.subject,
                            body: preview.body,
                            focus: Default::default(),
                        });
                    }
                    Err(e) => {
                        error!(lead_id, error = %e, "preview_email failed");
                        self.email = EmailWorkflow::Idle;
                        self.view.current_lead_id = None;
                        self.modals.close(Modal::EmailEditor);
                        self.show_error(failure);
                    }
                }
            }

            ApiReply::EmailSent(result) => {
                self.modals.close(Modal::Progress);
                self.email = EmailWorkflow::Idle;
                self.view.current_lead_id = None;
                match result {
                    Ok(r) if r.success => {
                        info!("email sent");
                        self.show_success("Email sent successfully!");
                    }
                    Ok(r) => {
                        warn!(error = ?r.error, "email rejected");
                        self.show_error(r.error.unwrap_or_else(|| failure.to_string()));
                    }
                    Err(e) => {
                        error!(error = %e, "send_email failed");
                        self.show_error(e.server_message().unwrap_or(failure));
                    }
                }
                self.reload_leads();
            }

            ApiReply::BulkPreview(result) => {
                match result {
                    Ok(response) => {
                        self.view.bulk_previews = BulkPreviewSet::from_response(response);
                        debug!(count = self.view.bulk_previews.len(), "bulk previews ready");
                        self.bulk = if self.view.bulk_previews.is_empty() {
                            BulkWorkflow::Idle
                        } else {
                            BulkWorkflow::Reviewing
                        };
                    }
                    Err(e) => {
                        error!(error = %e, "bulk_preview failed");
                        self.bulk = if self.view.bulk_previews.is_empty() {
                            BulkWorkflow::Idle
                        } else {
                            BulkWorkflow::Reviewing
                        };
                        self.show_error(failure);
                    }
                }
                self.campaign
                    .sync_selection(&self.view.all_leads, &self.view.bulk_previews);
            }

            ApiReply::BulkSent(result) => {
                self.pending_bulk = Some(result);
                match self.bulk_progress.as_mut() {
                    Some(progress) => progress.finish(now),
                    None => self.finish_bulk_send(),
                }
            }

            ApiReply::Scheduler(result) => {
                self.scheduler_running = false;
                match result {
                    Ok(r) if r.success => {
                        info!("follow-up scheduler completed");
                        self.show_success("Follow-up scheduler completed!");
                    }
                    Ok(r) => {
                        warn!(error = ?r.error, "scheduler reported failure");
                        self.show_error(r.error.unwrap_or_else(|| failure.to_string()));
                    }
                    Err(e) => {
                        error!(error = %e, "run_scheduler failed");
                        self.show_error(e.server_message().unwrap_or(failure));
                    }
                }
                self.reload_leads();
            }

            ApiReply::Scraper(result) => {
                self.scraper_running = false;
                match result {
                    Ok(r) if r.success => {
                        info!(count = r.count, enriched = ?r.enriched, "scraping complete");
                        self.scraper_log.finish(
                            LogLevel::Success,
                            format!("✅ Scraping complete! Found {} new leads.", r.count),
                        );
                        self.show_success(format!("Scraping complete! Added {} leads", r.count));
                    }
                    Ok(r) => {
                        let message = r.error.unwrap_or_else(|| "Unknown error".to_string());
                        warn!(error = %message, "scraper reported failure");
                        self.scraper_log
                            .finish(LogLevel::Error, format!("❌ Error: {}", message));
                        self.show_error("Scraping failed");
                    }
                    Err(e) => {
                        error!(error = %e, "run_scraper failed");
                        // A rejected run reads like any other scraper failure
                        let (text, toast) = match e.server_message() {
                            Some(message) => (message, "Scraping failed"),
                            None => (failure, failure),
                        };
                        self.scraper_log
                            .finish(LogLevel::Error, format!("❌ Error: {}", text));
                        self.show_error(toast);
                    }
                }
            }

            ApiReply::Analytics(result) => {
                self.analytics_loading = false;
                match result {
                    Ok(analytics) => self.view.analytics = Some(analytics),
                    Err(e) => {
                        error!(error = %e, "fetch_analytics failed");
                        self.show_error(failure);
                    }
                }
            }
        }
    }

    fn progress_view(&self, now: Instant) -> Option<ProgressView> {
        if let Some(progress) = &self.bulk_progress {
            return Some(ProgressView {
                title: BULK_TITLE,
                text: WAIT_TEXT,
                percent: Some(progress.percent(now)),
            });
        }
        matches!(self.email, EmailWorkflow::Sending { .. }).then_some(ProgressView {
            title: SINGLE_TITLE,
            text: WAIT_TEXT,
            percent: None,
        })
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    fn init(&mut self) -> Result<()> {
        info!("loading dashboard");
        self.reload_leads();
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(Some(Action::ForceQuit));
        }

        if let Some(modal) = self.modals.top() {
            return self.handle_modal_key_event(modal, key);
        }

        if self.page == Page::Scraper && self.scraper.editing {
            return self.scraper.handle_key_event(key);
        }

        let action = match key.code {
            KeyCode::Char(c @ '1'..='4') => Page::from_digit(c).map(Action::SwitchPage),
            KeyCode::Char('T') => Some(Action::ToggleTheme),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Char('q') => Some(Action::OpenQuitDialog),
            _ => None,
        };
        if action.is_some() {
            return Ok(action);
        }

        match self.page {
            Page::Dashboard => self.dashboard.handle_key_event(key),
            Page::Campaign => self.campaign.handle_key_event(key),
            Page::Scraper => self.scraper.handle_key_event(key),
            Page::Analytics => self.analytics.handle_key_event(key),
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        let now = Instant::now();
        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick => self.on_tick(now),
            Action::ForceQuit => {
                self.should_quit = true;
            }
            Action::Resize(_, _) => {}

            // ─────────────────────────────────────────────────────────────────
            // Navigation
            // ─────────────────────────────────────────────────────────────────
            Action::SwitchPage(page) => self.switch_page(page),
            Action::NextTab if self.page == Page::Campaign => self.campaign.next_tab(),
            Action::PrevTab if self.page == Page::Campaign => self.campaign.previous_tab(),
            Action::NextTab | Action::PrevTab => {}
            Action::NextItem => match self.page {
                Page::Dashboard => self.dashboard.next(&self.view.all_leads),
                Page::Campaign => self
                    .campaign
                    .next(&self.view.all_leads, &self.view.bulk_previews),
                _ => {}
            },
            Action::PrevItem => match self.page {
                Page::Dashboard => self.dashboard.previous(&self.view.all_leads),
                Page::Campaign => self
                    .campaign
                    .previous(&self.view.all_leads, &self.view.bulk_previews),
                _ => {}
            },

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenQuitDialog => self.modals.push(Modal::QuitConfirm),
            Action::OpenHelp => {
                self.help_dialog.scroll_offset = 0;
                self.modals.push(Modal::Help);
            }
            Action::CloseModal => {
                if matches!(self.modals.top(), Some(Modal::QuitConfirm | Modal::Help)) {
                    self.modals.pop();
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // Dashboard
            // ─────────────────────────────────────────────────────────────────
            Action::RefreshDashboard => {
                self.refresh_requested = true;
                self.reload_leads();
            }
            Action::CycleStatusFilter => self.dashboard.cycle_filter(&self.view.all_leads),
            Action::ClearStatusFilter => self.dashboard.clear_filter(&self.view.all_leads),
            Action::ExportLeads => self.export_visible_leads(),
            Action::ToggleTheme => self.toggle_theme(),

            // ─────────────────────────────────────────────────────────────────
            // Single email
            // ─────────────────────────────────────────────────────────────────
            Action::PreviewSelected => {
                let lead = match self.page {
                    Page::Dashboard => self.dashboard.selected_lead(&self.view.all_leads),
                    Page::Campaign if self.campaign.tab == CampaignTab::Individual => {
                        self.campaign.selected_enriched_lead(&self.view.all_leads)
                    }
                    _ => None,
                };
                return Ok(lead
                    .filter(|l| l.status.is_sendable())
                    .map(|l| Action::OpenEmailPreview(l.id)));
            }
            Action::OpenEmailPreview(lead_id) => self.open_email_preview(lead_id),
            Action::EditorSwitchField => {
                if let Some(draft) = self.email.draft_mut() {
                    draft.switch_focus();
                }
            }
            Action::EditorInput(c) => {
                if let Some(draft) = self.email.draft_mut() {
                    draft.push_char(c);
                }
            }
            Action::EditorNewline => {
                if let Some(draft) = self.email.draft_mut() {
                    draft.push_newline();
                }
            }
            Action::EditorBackspace => {
                if let Some(draft) = self.email.draft_mut() {
                    draft.backspace();
                }
            }
            Action::SendEmail => self.send_email(),
            Action::DiscardEmail => self.discard_email(),

            // ─────────────────────────────────────────────────────────────────
            // Bulk
            // ─────────────────────────────────────────────────────────────────
            Action::BulkPreview => self.bulk_preview(),
            Action::ToggleBulkItem => {
                if self.bulk == BulkWorkflow::Reviewing {
                    if let Some(index) = self.campaign.selected_bulk_index() {
                        self.view.bulk_previews.toggle(index);
                    }
                }
            }
            Action::ExpandBulkItem => {
                if let Some(index) = self.campaign.selected_bulk_index() {
                    self.view.bulk_previews.toggle_expanded(index);
                }
            }
            Action::BulkSend => self.bulk_send(now),
            Action::DiscardBulk => self.discard_bulk(),

            // ─────────────────────────────────────────────────────────────────
            // Follow-ups & scraper
            // ─────────────────────────────────────────────────────────────────
            Action::RunScheduler => self.run_scheduler(),
            Action::EnterQueryMode
            | Action::ExitQueryMode
            | Action::QueryInput(_)
            | Action::QueryBackspace => {
                self.scraper.update(action)?;
            }
            Action::RunScraper => self.run_scraper(now),
        }

        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let palette = self.palette();
        let now = Instant::now();

        frame.render_widget(Block::default().style(palette.base()), area);
        let layout = calculate_main_layout(area);

        render_nav(frame, layout.nav, self.page, &palette);

        match self.page {
            Page::Dashboard => {
                self.dashboard
                    .draw_with_leads(frame, layout.content, &self.view.all_leads, &palette);
            }
            Page::Campaign => {
                let ctx = CampaignRenderContext {
                    all_leads: &self.view.all_leads,
                    bulk_previews: &self.view.bulk_previews,
                    bulk: &self.bulk,
                    scheduler_running: self.scheduler_running,
                    palette: &palette,
                };
                self.campaign.draw_with_context(frame, layout.content, &ctx);
            }
            Page::Scraper => {
                self.scraper.draw_with_log(
                    frame,
                    layout.content,
                    &self.scraper_log,
                    self.scraper_running,
                    &palette,
                );
            }
            Page::Analytics => {
                self.analytics.draw_with_analytics(
                    frame,
                    layout.content,
                    self.view.analytics.as_ref(),
                    self.analytics_loading,
                    &palette,
                );
            }
        }

        render_status_line(frame, layout.status, self.toast.as_ref(), self.runner.in_flight(), &palette);
        render_help_bar(frame, layout.help, self, &palette);

        // Draw modal overlays bottom to top
        if let Some(modal) = self.modals.top() {
            self.draw_modal(frame, area, modal, &palette, now);
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Helper Methods
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    fn handle_modal_key_event(&mut self, modal: Modal, key: KeyEvent) -> Result<Option<Action>> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.handle_key_event(key),
            Modal::Help => self.help_dialog.handle_key_event(key),
            Modal::EmailEditor => self.email_dialog.handle_key_event(key),
            // Closes on its own once the reply is handled
            Modal::Progress => Ok(None),
        }
    }

    fn draw_modal(&mut self, frame: &mut Frame, area: Rect, modal: Modal, palette: &Palette, now: Instant) {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.draw_with_palette(frame, area, palette),
            Modal::Help => self.help_dialog.draw_with_palette(frame, area, palette),
            Modal::EmailEditor => {
                if let Some(draft) = self.email.draft() {
                    let lead = self.view.lead(draft.lead_id);
                    self.email_dialog.draw_with_draft(
                        frame,
                        area,
                        draft,
                        lead,
                        self.email.is_loading(),
                        palette,
                    );
                }
            }
            Modal::Progress => {
                if let Some(view) = self.progress_view(now) {
                    self.progress_dialog
                        .draw_with_progress(frame, area, &view, palette);
                }
            }
        }
    }
}

fn render_nav(frame: &mut Frame, area: Rect, page: Page, palette: &Palette) {
    let titles: Vec<Line> = Page::all()
        .iter()
        .enumerate()
        .map(|(i, p)| Line::from(format!("{} {}", i + 1, p.name())))
        .collect();
    let selected = Page::all().iter().position(|p| *p == page).unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Lead Dashboard ")
                .title_style(palette.title())
                .border_style(Style::default().fg(palette.border)),
        )
        .style(Style::default().fg(palette.muted))
        .highlight_style(
            Style::default()
                .fg(palette.highlight_fg)
                .bg(palette.highlight_bg)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, area);
}

fn render_status_line(
    frame: &mut Frame,
    area: Rect,
    toast: Option<&Toast>,
    in_flight: usize,
    palette: &Palette,
) {
    let line = match toast {
        Some(toast) => {
            let (icon, color) = match toast.kind {
                ToastKind::Success => ("✓", palette.success),
                ToastKind::Error => ("✗", palette.error),
            };
            Line::from(Span::styled(
                format!(" {} {} ", icon, toast.message),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ))
        }
        None if in_flight > 0 => Line::from(Span::styled(
            " Loading... ",
            Style::default().fg(palette.muted),
        )),
        None => Line::from(""),
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_help_bar(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let key = palette.key();
    let mut spans = vec![
        Span::styled(" q ", key),
        Span::raw("Quit "),
        Span::styled(" 1-4 ", key),
        Span::raw("Pages "),
        Span::styled(" T ", key),
        Span::raw("Theme "),
        Span::styled(" ? ", key),
        Span::raw("Help "),
        Span::styled("│", Style::default().fg(palette.muted)),
    ];

    let page_keys: &[(&str, &str)] = match app.page {
        Page::Dashboard => &[
            ("j/k", "Move"),
            ("p", "Preview"),
            ("f/F", "Filter"),
            ("r", "Refresh"),
            ("E", "Export"),
        ],
        Page::Campaign => match app.campaign.tab {
            CampaignTab::Individual => &[("Tab", "Next tab"), ("p", "Preview")],
            CampaignTab::Bulk => &[
                ("Tab", "Next tab"),
                ("p", "Preview all"),
                ("Space", "Toggle"),
                ("s", "Send"),
            ],
            CampaignTab::Followups => &[("Tab", "Next tab"), ("s", "Run scheduler")],
        },
        Page::Scraper => &[("i", "Edit query"), ("Enter", "Start")],
        Page::Analytics => &[],
    };
    for (k, label) in page_keys {
        spans.push(Span::styled(format!(" {} ", k), key));
        spans.push(Span::raw(format!("{} ", label)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::testing::{buffer_contains, render};
    use crate::model::lead::test_lead;
    use crate::model::preview::test_bulk_response;
    use crate::model::ui::Theme;
    use crate::model::{
        ActionResult, Analytics, BulkPreviewResponse, DashboardStats, EmailPreview, Lead, LeadList,
        LeadStatus, ScraperResult,
    };
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;
    use std::thread;
    use std::time::Duration;

    /// In-memory backend recording every call
    #[derive(Default)]
    struct FakeApi {
        leads: Mutex<Vec<Lead>>,
        fail_leads: Mutex<bool>,
        preview: Mutex<Option<EmailPreview>>,
        bulk_previews: Mutex<Vec<i64>>,
        bulk_result: Mutex<BulkSendResult>,
        scraper_result: Mutex<ScraperResult>,
        /// Server error text the next send, scheduler run or scrape is rejected with
        send_rejection: Mutex<Option<String>>,
        scheduler_rejection: Mutex<Option<String>>,
        scraper_rejection: Mutex<Option<String>>,
        calls: Mutex<Vec<&'static str>>,
        bulk_ids: Mutex<Vec<i64>>,
    }

    impl FakeApi {
        fn with_leads(leads: Vec<Lead>) -> Arc<Self> {
            let api = FakeApi::default();
            *api.leads.lock().unwrap() = leads;
            Arc::new(api)
        }

        fn record(&self, name: &'static str) {
            self.calls.lock().unwrap().push(name);
        }

        fn count(&self, name: &str) -> usize {
            self.calls.lock().unwrap().iter().filter(|c| **c == name).count()
        }
    }

    fn server_error() -> ApiError {
        ApiError::Status {
            status: 500,
            message: None,
        }
    }

    fn rejected(rejection: &Mutex<Option<String>>) -> Result<(), ApiError> {
        match rejection.lock().unwrap().clone() {
            Some(message) => Err(ApiError::Status {
                status: 500,
                message: Some(message),
            }),
            None => Ok(()),
        }
    }

    impl LeadApi for FakeApi {
        fn fetch_leads(&self) -> Result<LeadList, ApiError> {
            self.record("fetch_leads");
            if *self.fail_leads.lock().unwrap() {
                return Err(server_error());
            }
            Ok(LeadList {
                leads: self.leads.lock().unwrap().clone(),
            })
        }

        fn preview_email(&self, lead_id: i64) -> Result<EmailPreview, ApiError> {
            self.record("preview_email");
            match self.preview.lock().unwrap().clone() {
                Some(mut preview) => {
                    preview.lead_id = lead_id;
                    Ok(preview)
                }
                None => Err(server_error()),
            }
        }

        fn send_email(&self, _: i64, _: &str, _: &str) -> Result<ActionResult, ApiError> {
            self.record("send_email");
            rejected(&self.send_rejection)?;
            Ok(ActionResult {
                success: true,
                error: None,
            })
        }

        fn bulk_preview(&self) -> Result<BulkPreviewResponse, ApiError> {
            self.record("bulk_preview");
            Ok(test_bulk_response(&self.bulk_previews.lock().unwrap()))
        }

        fn bulk_send(&self, lead_ids: &[i64]) -> Result<BulkSendResult, ApiError> {
            self.record("bulk_send");
            *self.bulk_ids.lock().unwrap() = lead_ids.to_vec();
            Ok(self.bulk_result.lock().unwrap().clone())
        }

        fn run_scheduler(&self) -> Result<ActionResult, ApiError> {
            self.record("run_scheduler");
            rejected(&self.scheduler_rejection)?;
            Ok(ActionResult {
                success: true,
                error: None,
            })
        }

        fn run_scraper(&self, _: &str) -> Result<ScraperResult, ApiError> {
            self.record("run_scraper");
            rejected(&self.scraper_rejection)?;
            Ok(self.scraper_result.lock().unwrap().clone())
        }

        fn fetch_analytics(&self) -> Result<Analytics, ApiError> {
            self.record("fetch_analytics");
            Ok(Analytics::default())
        }
    }

    struct Harness {
        app: App,
        api: Arc<FakeApi>,
        dir: tempfile::TempDir,
    }

    fn harness(api: Arc<FakeApi>) -> Harness {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json"));
        let mut app = App::new(api.clone(), config);
        app.init().unwrap();
        let mut h = Harness { app, api, dir };
        h.settle();
        h
    }

    impl Harness {
        /// Run an action and any follow-ups, as the main loop does
        fn dispatch(&mut self, action: Action) {
            let mut current = Some(action);
            while let Some(a) = current {
                current = self.app.update(a).unwrap();
            }
        }

        fn tick_until(&mut self, what: &str, cond: impl Fn(&App) -> bool) {
            let deadline = Instant::now() + Duration::from_secs(5);
            while !cond(&self.app) {
                assert!(Instant::now() < deadline, "timed out waiting for {}", what);
                self.app.update(Action::Tick).unwrap();
                thread::sleep(Duration::from_millis(10));
            }
        }

        /// Tick until no request is in flight and no bulk send is held
        fn settle(&mut self) {
            self.tick_until("requests to finish", |app| {
                app.runner.in_flight() == 0 && app.bulk_progress.is_none()
            });
        }

        fn toast(&self) -> Option<(String, ToastKind)> {
            self.app.toast.as_ref().map(|t| (t.message.clone(), t.kind))
        }
    }

    #[test]
    fn test_startup_loads_stats_and_individual_cards() {
        let api = FakeApi::with_leads(vec![
            test_lead(1, "CONTACTED"),
            test_lead(2, "FOLLOWUP_1"),
            test_lead(3, "ENRICHED"),
        ]);
        let mut h = harness(api);

        let stats = DashboardStats::from_leads(&h.app.view.all_leads);
        assert_eq!(
            (stats.total, stats.contacted, stats.emails_sent, stats.followups),
            (3, 2, 2, 1)
        );

        h.dispatch(Action::SwitchPage(Page::Campaign));
        h.settle();
        let cards: Vec<i64> = crate::model::lead::enriched_leads(&h.app.view.all_leads)
            .iter()
            .map(|l| l.id)
            .collect();
        assert_eq!(cards, vec![3]);

        let app = &mut h.app;
        let buffer = render(120, 30, |frame| app.draw(frame, frame.area()).unwrap());
        assert!(buffer_contains(&buffer, "Clinic 3 - lead3@example.com"));
        assert!(!buffer_contains(&buffer, "Clinic 1 - "));
    }

    #[test]
    fn test_preview_fills_editor_and_send_reloads() {
        let api = FakeApi::with_leads(vec![test_lead(7, "ENRICHED")]);
        *api.preview.lock().unwrap() = Some(EmailPreview {
            lead_id: 0,
            subject: "Hi".to_string(),
            body: "Hello".to_string(),
        });
        let mut h = harness(api);

        h.dispatch(Action::PreviewSelected);
        assert_eq!(h.app.view.current_lead_id, Some(7));
        assert!(h.app.modals.is_open(Modal::EmailEditor));
        assert!(h.app.email.is_loading());

        h.tick_until("preview", |app| matches!(app.email, EmailWorkflow::PreviewReady(_)));
        let draft = h.app.email.draft().unwrap();
        assert_eq!((draft.subject.as_str(), draft.body.as_str()), ("Hi", "Hello"));

        h.dispatch(Action::EditorInput('!'));
        h.dispatch(Action::SendEmail);
        assert!(h.app.modals.is_open(Modal::Progress));
        assert!(!h.app.modals.is_open(Modal::EmailEditor));

        h.settle();
        assert_eq!(h.app.email, EmailWorkflow::Idle);
        assert!(h.app.modals.is_empty());
        assert_eq!(
            h.toast(),
            Some(("Email sent successfully!".to_string(), ToastKind::Success))
        );
        assert_eq!(h.api.count("fetch_leads"), 2);
    }

    #[test]
    fn test_rejected_send_closes_modal_and_reloads() {
        let api = FakeApi::with_leads(vec![test_lead(7, "ENRICHED")]);
        *api.preview.lock().unwrap() = Some(EmailPreview {
            lead_id: 0,
            subject: "Hi".to_string(),
            body: "Hello".to_string(),
        });
        *api.send_rejection.lock().unwrap() = Some("Resend quota exceeded".to_string());
        let mut h = harness(api);

        h.dispatch(Action::OpenEmailPreview(7));
        h.tick_until("preview", |app| matches!(app.email, EmailWorkflow::PreviewReady(_)));
        h.dispatch(Action::SendEmail);
        h.settle();

        assert_eq!(h.app.email, EmailWorkflow::Idle);
        assert_eq!(h.app.view.current_lead_id, None);
        assert!(h.app.modals.is_empty());
        assert_eq!(
            h.toast(),
            Some(("Resend quota exceeded".to_string(), ToastKind::Error))
        );
        assert_eq!(h.api.count("fetch_leads"), 2);
    }

    #[test]
    fn test_rejected_scheduler_reenables_and_reloads() {
        let api = FakeApi::with_leads(Vec::new());
        *api.scheduler_rejection.lock().unwrap() = Some("SMTP down".to_string());
        let mut h = harness(api);

        h.dispatch(Action::RunScheduler);
        h.settle();

        assert!(!h.app.scheduler_running);
        assert_eq!(h.api.count("fetch_leads"), 2);
        assert_eq!(
            h.toast(),
            Some(("SMTP down".to_string(), ToastKind::Error))
        );

        *h.api.scheduler_rejection.lock().unwrap() = None;
        h.dispatch(Action::RunScheduler);
        h.settle();
        assert_eq!(h.api.count("run_scheduler"), 2);
    }

    #[test]
    fn test_rejected_bulk_send_shows_server_text() {
        let mut h = harness(FakeApi::with_leads(Vec::new()));
        h.app.bulk = BulkWorkflow::Sending;
        h.app.pending_bulk = Some(Err(ApiError::Status {
            status: 500,
            message: Some("No API key".to_string()),
        }));
        h.app.finish_bulk_send();
        assert_eq!(
            h.toast(),
            Some(("No API key".to_string(), ToastKind::Error))
        );
        assert_eq!(h.app.bulk, BulkWorkflow::Reviewing);
    }

    #[test]
    fn test_preview_failure_closes_editor() {
        let api = FakeApi::with_leads(vec![test_lead(4, "ENRICHED")]);
        let mut h = harness(api);

        h.dispatch(Action::OpenEmailPreview(4));
        h.settle();
        assert_eq!(h.app.email, EmailWorkflow::Idle);
        assert!(h.app.modals.is_empty());
        assert_eq!(
            h.toast(),
            Some(("Failed to generate email preview".to_string(), ToastKind::Error))
        );
    }

    #[test]
    fn test_preview_ignores_ineligible_leads() {
        let api = FakeApi::with_leads(vec![test_lead(1, "CONTACTED")]);
        let mut h = harness(api);
        h.dispatch(Action::PreviewSelected);
        h.dispatch(Action::OpenEmailPreview(1));
        assert_eq!(h.app.email, EmailWorkflow::Idle);
        assert_eq!(h.api.count("preview_email"), 0);
    }

    #[test]
    fn test_bulk_send_reports_counts_and_clears_previews() {
        let api = FakeApi::with_leads(vec![test_lead(1, "ENRICHED"), test_lead(2, "ENRICHED")]);
        *api.bulk_previews.lock().unwrap() = vec![2, 1];
        *api.bulk_result.lock().unwrap() = BulkSendResult {
            success: true,
            sent: 2,
            failed: 0,
            error: None,
        };
        let mut h = harness(api);

        h.dispatch(Action::SwitchPage(Page::Campaign));
        h.dispatch(Action::NextTab);
        h.dispatch(Action::BulkPreview);
        h.tick_until("bulk previews", |app| app.bulk == BulkWorkflow::Reviewing);
        assert_eq!(h.app.view.bulk_previews.selection_count(), (2, 2));

        h.dispatch(Action::BulkSend);
        assert!(h.app.modals.is_open(Modal::Progress));
        h.settle();

        assert_eq!(*h.api.bulk_ids.lock().unwrap(), vec![1, 2]);
        let (message, kind) = h.toast().unwrap();
        assert!(message.contains("Sent: 2, Failed: 0"));
        assert_eq!(kind, ToastKind::Success);
        assert!(h.app.view.bulk_previews.is_empty());
        assert_eq!(h.app.bulk, BulkWorkflow::Idle);
        assert!(h.app.modals.is_empty());
    }

    #[test]
    fn test_bulk_failure_keeps_previews() {
        let api = FakeApi::with_leads(vec![test_lead(1, "ENRICHED")]);
        *api.bulk_previews.lock().unwrap() = vec![1];
        *api.bulk_result.lock().unwrap() = BulkSendResult {
            success: false,
            sent: 0,
            failed: 1,
            error: None,
        };
        let mut h = harness(api);

        h.dispatch(Action::BulkPreview);
        h.tick_until("bulk previews", |app| app.bulk == BulkWorkflow::Reviewing);
        h.dispatch(Action::BulkSend);
        h.settle();

        assert_eq!(
            h.toast(),
            Some(("Bulk send failed".to_string(), ToastKind::Error))
        );
        assert_eq!(h.app.view.bulk_previews.len(), 1);
        assert_eq!(h.app.bulk, BulkWorkflow::Reviewing);
    }

    #[test]
    fn test_empty_bulk_selection_makes_no_call() {
        let api = FakeApi::with_leads(vec![test_lead(1, "ENRICHED")]);
        *api.bulk_previews.lock().unwrap() = vec![1];
        let mut h = harness(api);

        h.dispatch(Action::SwitchPage(Page::Campaign));
        h.dispatch(Action::NextTab);
        h.dispatch(Action::BulkPreview);
        h.tick_until("bulk previews", |app| app.bulk == BulkWorkflow::Reviewing);

        h.dispatch(Action::ToggleBulkItem);
        assert_eq!(h.app.view.bulk_previews.selection_count(), (0, 1));
        h.dispatch(Action::BulkSend);

        assert_eq!(
            h.toast(),
            Some(("No leads selected".to_string(), ToastKind::Error))
        );
        assert!(h.app.modals.is_empty());
        h.settle();
        assert_eq!(h.api.count("bulk_send"), 0);
    }

    #[test]
    fn test_scraper_error_is_logged_and_trigger_reenabled() {
        let api = FakeApi::with_leads(Vec::new());
        *api.scraper_result.lock().unwrap() = ScraperResult {
            success: false,
            count: 0,
            enriched: None,
            error: Some("rate limited".to_string()),
        };
        let mut h = harness(api);

        h.dispatch(Action::SwitchPage(Page::Scraper));
        h.dispatch(Action::EnterQueryMode);
        for c in "dentists".chars() {
            h.dispatch(Action::QueryInput(c));
        }
        h.dispatch(Action::RunScraper);
        assert!(h.app.scraper_running);
        assert_eq!(
            h.app.scraper_log.lines[0].text,
            "Starting scraper for: \"dentists\"..."
        );

        h.settle();
        let last = h.app.scraper_log.lines.last().unwrap();
        assert_eq!(last.text, "❌ Error: rate limited");
        assert_eq!(last.level, LogLevel::Error);
        assert!(!h.app.scraper_running);
        assert!(!h.app.scraper_log.is_running());
    }

    #[test]
    fn test_rejected_scrape_shows_server_text() {
        let api = FakeApi::with_leads(Vec::new());
        *api.scraper_rejection.lock().unwrap() = Some("rate limited".to_string());
        let mut h = harness(api);

        h.app.scraper.query = "dentists".to_string();
        h.dispatch(Action::RunScraper);
        h.settle();

        let last = h.app.scraper_log.lines.last().unwrap();
        assert_eq!(last.text, "❌ Error: rate limited");
        assert_eq!(last.level, LogLevel::Error);
        assert!(!h.app.scraper_running);
        assert_eq!(
            h.toast(),
            Some(("Scraping failed".to_string(), ToastKind::Error))
        );
    }

    #[test]
    fn test_scraper_failure_without_server_text_uses_generic_text() {
        let mut h = harness(FakeApi::with_leads(Vec::new()));
        let now = Instant::now();
        h.app.scraper_running = true;
        h.app.scraper_log.start("dentists", now);

        h.app.handle_reply(ApiReply::Scraper(Err(server_error())), now);

        assert_eq!(
            h.app.scraper_log.lines.last().map(|l| l.text.as_str()),
            Some("❌ Error: Failed to start scraper")
        );
        assert_eq!(
            h.toast(),
            Some(("Failed to start scraper".to_string(), ToastKind::Error))
        );
        assert!(!h.app.scraper_running);
    }

    #[test]
    fn test_blank_scraper_query_is_refused() {
        let mut h = harness(FakeApi::with_leads(Vec::new()));
        h.dispatch(Action::SwitchPage(Page::Scraper));
        h.dispatch(Action::RunScraper);
        assert_eq!(
            h.toast(),
            Some(("Please enter a search query".to_string(), ToastKind::Error))
        );
        assert!(!h.app.scraper_running);
        assert_eq!(h.api.count("run_scraper"), 0);
    }

    #[test]
    fn test_scraper_success() {
        let api = FakeApi::with_leads(Vec::new());
        *api.scraper_result.lock().unwrap() = ScraperResult {
            success: true,
            count: 12,
            enriched: Some(9),
            error: None,
        };
        let mut h = harness(api);
        h.app.scraper.query = "vets in Ohio".to_string();
        h.dispatch(Action::RunScraper);
        h.settle();
        assert_eq!(
            h.app.scraper_log.lines.last().map(|l| l.text.as_str()),
            Some("✅ Scraping complete! Found 12 new leads.")
        );
        assert_eq!(
            h.toast(),
            Some(("Scraping complete! Added 12 leads".to_string(), ToastKind::Success))
        );
    }

    #[test]
    fn test_filter_uses_cache_without_fetching() {
        let api = FakeApi::with_leads(vec![
            test_lead(1, "ENRICHED"),
            test_lead(2, "CONTACTED"),
            test_lead(3, "CONTACTED"),
        ]);
        let mut h = harness(api);
        assert_eq!(h.api.count("fetch_leads"), 1);

        h.dispatch(Action::CycleStatusFilter);
        h.dispatch(Action::CycleStatusFilter);
        assert_eq!(h.app.dashboard.status_filter, Some(LeadStatus::Enriched));
        assert_eq!(h.app.dashboard.visible_leads(&h.app.view.all_leads).len(), 1);

        h.dispatch(Action::ClearStatusFilter);
        assert_eq!(h.app.dashboard.visible_leads(&h.app.view.all_leads).len(), 3);
        h.settle();
        assert_eq!(h.api.count("fetch_leads"), 1);
    }

    #[test]
    fn test_failed_fetch_empties_cache() {
        let api = FakeApi::with_leads(vec![test_lead(1, "ENRICHED")]);
        let mut h = harness(api);
        assert_eq!(h.app.view.all_leads.len(), 1);

        *h.api.fail_leads.lock().unwrap() = true;
        h.dispatch(Action::RefreshDashboard);
        h.settle();
        assert!(h.app.view.all_leads.is_empty());
        assert_eq!(
            h.toast(),
            Some(("Failed to load leads".to_string(), ToastKind::Error))
        );
    }

    #[test]
    fn test_refresh_confirms_with_toast() {
        let mut h = harness(FakeApi::with_leads(Vec::new()));
        h.dispatch(Action::RefreshDashboard);
        h.settle();
        assert_eq!(
            h.toast(),
            Some(("Dashboard refreshed".to_string(), ToastKind::Success))
        );
    }

    #[test]
    fn test_scheduler_reloads_and_reports() {
        let mut h = harness(FakeApi::with_leads(Vec::new()));
        h.dispatch(Action::RunScheduler);
        assert!(h.app.scheduler_running);
        h.dispatch(Action::RunScheduler);
        h.settle();

        assert!(!h.app.scheduler_running);
        assert_eq!(h.api.count("run_scheduler"), 1);
        assert_eq!(h.api.count("fetch_leads"), 2);
        assert_eq!(
            h.toast(),
            Some(("Follow-up scheduler completed!".to_string(), ToastKind::Success))
        );
    }

    #[test]
    fn test_page_switches_load_their_data() {
        let mut h = harness(FakeApi::with_leads(Vec::new()));
        h.dispatch(Action::SwitchPage(Page::Scraper));
        h.dispatch(Action::SwitchPage(Page::Analytics));
        h.settle();
        assert_eq!(h.api.count("fetch_leads"), 1);
        assert_eq!(h.api.count("fetch_analytics"), 1);
        assert!(h.app.view.analytics.is_some());
    }

    #[test]
    fn test_theme_toggle_persists() {
        let mut h = harness(FakeApi::with_leads(Vec::new()));
        let path = h.dir.path().join("config.json");
        h.dispatch(Action::ToggleTheme);
        assert_eq!(h.app.config.theme, Theme::Dark);
        assert_eq!(Config::load_from(&path).theme, Theme::Dark);
        h.dispatch(Action::ToggleTheme);
        assert_eq!(Config::load_from(&path).theme, Theme::Light);
    }

    #[test]
    fn test_export_writes_visible_rows() {
        let api = FakeApi::with_leads(vec![test_lead(1, "ENRICHED"), test_lead(2, "FOUND")]);
        let mut h = harness(api);
        h.dispatch(Action::ExportLeads);
        let (message, kind) = h.toast().unwrap();
        assert_eq!(kind, ToastKind::Success);
        assert!(message.starts_with("Exported 2 leads to "));
        let exported: Vec<_> = std::fs::read_dir(h.dir.path().join("exports"))
            .unwrap()
            .collect();
        assert_eq!(exported.len(), 1);
    }

    #[test]
    fn test_modal_keys_take_priority() {
        let mut h = harness(FakeApi::with_leads(Vec::new()));
        let q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        let n = KeyEvent::new(KeyCode::Char('n'), KeyModifiers::NONE);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);

        let action = h.app.handle_key_event(q).unwrap();
        assert_eq!(action, Some(Action::OpenQuitDialog));
        h.dispatch(Action::OpenQuitDialog);
        assert_eq!(h.app.handle_key_event(q).unwrap(), None);
        assert_eq!(h.app.handle_key_event(n).unwrap(), Some(Action::CloseModal));
        assert_eq!(h.app.handle_key_event(ctrl_c).unwrap(), Some(Action::ForceQuit));
    }

    #[test]
    fn test_scraper_editing_swallows_global_keys() {
        let mut h = harness(FakeApi::with_leads(Vec::new()));
        h.dispatch(Action::SwitchPage(Page::Scraper));
        h.dispatch(Action::EnterQueryMode);
        let one = KeyEvent::new(KeyCode::Char('1'), KeyModifiers::NONE);
        assert_eq!(h.app.handle_key_event(one).unwrap(), Some(Action::QueryInput('1')));
    }

    #[test]
    fn test_draw_dashboard_with_toast() {
        let api = FakeApi::with_leads(vec![test_lead(1, "ENRICHED")]);
        let mut h = harness(api);
        h.app.toast = Some(Toast::success("Dashboard refreshed"));
        let app = &mut h.app;
        let buffer = render(120, 24, |frame| app.draw(frame, frame.area()).unwrap());
        assert!(buffer_contains(&buffer, "1 Dashboard"));
        assert!(buffer_contains(&buffer, "Dashboard refreshed"));
        assert!(buffer_contains(&buffer, "Clinic 1"));
    }
}
