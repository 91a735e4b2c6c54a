//! Workflow state machines and their cosmetic timers
//!
//! The progress bar and the scraper log are visual simulations driven by the
//! UI tick. They do not reflect server progress; they only stop once the
//! awaited reply arrives.

use std::time::{Duration, Instant};

// ═══════════════════════════════════════════════════════════════════════════════
// Single email
// ═══════════════════════════════════════════════════════════════════════════════

pub const SUBJECT_PLACEHOLDER: &str = "Generating...";
pub const BODY_PLACEHOLDER: &str = "Generating personalized email...";

/// Which field of the email editor receives keystrokes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DraftField {
    #[default]
    Subject,
    Body,
}

/// Editable email shown in the edit modal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailDraft {
    pub lead_id: i64,
    pub subject: String,
    pub body: String,
    pub focus: DraftField,
}

impl EmailDraft {
    pub fn placeholder(lead_id: i64) -> Self {
        Self {
            lead_id,
            subject: SUBJECT_PLACEHOLDER.to_string(),
            body: BODY_PLACEHOLDER.to_string(),
            focus: DraftField::Subject,
        }
    }

    pub fn switch_focus(&mut self) {
        self.focus = match self.focus {
            DraftField::Subject => DraftField::Body,
            DraftField::Body => DraftField::Subject,
        };
    }

    pub fn push_char(&mut self, c: char) {
        match self.focus {
            DraftField::Subject => self.subject.push(c),
            DraftField::Body => self.body.push(c),
        }
    }

    /// Newlines only make sense in the body
    pub fn push_newline(&mut self) {
        if self.focus == DraftField::Body {
            self.body.push('\n');
        }
    }

    pub fn backspace(&mut self) {
        match self.focus {
            DraftField::Subject => self.subject.pop(),
            DraftField::Body => self.body.pop(),
        };
    }
}

/// `Idle → PreviewLoading → PreviewReady → Sending → Idle`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EmailWorkflow {
    #[default]
    Idle,
    PreviewLoading(EmailDraft),
    PreviewReady(EmailDraft),
    Sending { lead_id: i64 },
}

impl EmailWorkflow {
    pub fn draft(&self) -> Option<&EmailDraft> {
        match self {
            EmailWorkflow::PreviewLoading(draft) | EmailWorkflow::PreviewReady(draft) => {
                Some(draft)
            }
            _ => None,
        }
    }

    /// Only a ready draft accepts edits
    pub fn draft_mut(&mut self) -> Option<&mut EmailDraft> {
        match self {
            EmailWorkflow::PreviewReady(draft) => Some(draft),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, EmailWorkflow::PreviewLoading(_))
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Bulk
// ═══════════════════════════════════════════════════════════════════════════════

/// `Idle → BulkPreviewLoading → BulkReviewing → BulkSending → Idle`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BulkWorkflow {
    #[default]
    Idle,
    PreviewLoading,
    Reviewing,
    Sending,
}

/// Simulated progress: +10% per step, capped at 90% until completion
#[derive(Debug, Clone)]
pub struct SimulatedProgress {
    started: Instant,
    step: Duration,
    finished_at: Option<Instant>,
}

impl SimulatedProgress {
    pub const STEP: Duration = Duration::from_millis(300);
    /// How long 100% stays visible before the modal closes
    pub const HOLD: Duration = Duration::from_millis(500);

    pub fn start(now: Instant) -> Self {
        Self {
            started: now,
            step: Self::STEP,
            finished_at: None,
        }
    }

    pub fn percent(&self, now: Instant) -> u16 {
        if self.finished_at.is_some() {
            return 100;
        }
        let steps = now.duration_since(self.started).as_millis() / self.step.as_millis();
        (steps.min(9) * 10) as u16
    }

    /// Force the bar to 100%; the simulation timer stops here
    pub fn finish(&mut self, now: Instant) {
        self.finished_at.get_or_insert(now);
    }

    /// Finished and shown at 100% long enough to be dismissed
    pub fn hold_elapsed(&self, now: Instant) -> bool {
        self.finished_at
            .is_some_and(|at| now.duration_since(at) >= Self::HOLD)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Scraper
// ═══════════════════════════════════════════════════════════════════════════════

/// Scripted lines shown while the scraper request is in flight
pub const SCRAPER_SCRIPT: [&str; 6] = [
    "Initializing Google Search scraper...",
    "Searching for leads...",
    "Found potential leads...",
    "Extracting contact information...",
    "Verifying email addresses...",
    "Saving leads to database...",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub level: LogLevel,
    pub text: String,
}

/// Scraper log panel; the script timer runs only while `running`
#[derive(Debug, Clone, Default)]
pub struct ScraperLog {
    pub lines: Vec<LogLine>,
    script_started: Option<Instant>,
    script_index: usize,
}

impl ScraperLog {
    pub const INTERVAL: Duration = Duration::from_millis(1500);

    /// Reset the panel for a new run
    pub fn start(&mut self, query: &str, now: Instant) {
        self.lines = vec![LogLine {
            level: LogLevel::Info,
            text: format!("Starting scraper for: \"{}\"...", query),
        }];
        self.script_started = Some(now);
        self.script_index = 0;
    }

    pub fn is_running(&self) -> bool {
        self.script_started.is_some()
    }

    /// Append the scripted lines that are due by `now`
    pub fn advance(&mut self, now: Instant) {
        let Some(started) = self.script_started else {
            return;
        };
        let due = (now.duration_since(started).as_millis() / Self::INTERVAL.as_millis()) as usize;
        while self.script_index < due.min(SCRAPER_SCRIPT.len()) {
            self.lines.push(LogLine {
                level: LogLevel::Info,
                text: SCRAPER_SCRIPT[self.script_index].to_string(),
            });
            self.script_index += 1;
        }
    }

    /// Stop the script and append the final line
    pub fn finish(&mut self, level: LogLevel, text: String) {
        self.script_started = None;
        self.lines.push(LogLine { level, text });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_editing_respects_focus() {
        let mut draft = EmailDraft {
            lead_id: 1,
            subject: "Hi".to_string(),
            body: "Hello".to_string(),
            focus: DraftField::Subject,
        };
        draft.push_char('!');
        draft.push_newline();
        draft.switch_focus();
        draft.push_newline();
        draft.push_char('x');
        draft.backspace();
        assert_eq!(draft.subject, "Hi!");
        assert_eq!(draft.body, "Hello\n");
    }

    #[test]
    fn test_loading_draft_is_not_editable() {
        let mut workflow = EmailWorkflow::PreviewLoading(EmailDraft::placeholder(3));
        assert!(workflow.draft_mut().is_none());
        assert_eq!(workflow.draft().map(|d| d.subject.as_str()), Some(SUBJECT_PLACEHOLDER));
    }

    #[test]
    fn test_progress_steps_and_cap() {
        let start = Instant::now();
        let mut progress = SimulatedProgress::start(start);
        assert_eq!(progress.percent(start), 0);
        assert_eq!(progress.percent(start + Duration::from_millis(310)), 10);
        assert_eq!(progress.percent(start + Duration::from_millis(1250)), 40);
        assert_eq!(progress.percent(start + Duration::from_secs(60)), 90);

        let done = start + Duration::from_millis(700);
        progress.finish(done);
        assert_eq!(progress.percent(done), 100);
        assert!(!progress.hold_elapsed(done));
        assert!(progress.hold_elapsed(done + SimulatedProgress::HOLD));
    }

    #[test]
    fn test_scraper_log_appends_script_on_cadence() {
        let start = Instant::now();
        let mut log = ScraperLog::default();
        log.start("dentist chicago", start);
        assert_eq!(log.lines[0].text, "Starting scraper for: \"dentist chicago\"...");

        log.advance(start + Duration::from_millis(1400));
        assert_eq!(log.lines.len(), 1);
        log.advance(start + Duration::from_millis(3100));
        assert_eq!(log.lines.len(), 3);
        log.advance(start + Duration::from_secs(60));
        assert_eq!(log.lines.len(), 1 + SCRAPER_SCRIPT.len());
    }

    #[test]
    fn test_scraper_log_stops_after_finish() {
        let start = Instant::now();
        let mut log = ScraperLog::default();
        log.start("q", start);
        log.finish(LogLevel::Error, "❌ Error: rate limited".to_string());
        log.advance(start + Duration::from_secs(60));
        assert!(!log.is_running());
        assert_eq!(log.lines.last().map(|l| l.text.as_str()), Some("❌ Error: rate limited"));
        assert_eq!(log.lines.len(), 2);
    }
}
