// Draft autosave bookkeeping
// Tracks unsaved changes and when the next periodic save is due; the controller performs the save.

use std::time::{Duration, Instant};

pub const DEFAULT_AUTOSAVE_INTERVAL: Duration = Duration::from_secs(30);

/// How long the "draft saved" acknowledgment stays visible.
pub const SAVE_ACK_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone)]
pub struct DraftState {
    modified: bool,
    interval: Duration,
    last_attempt: Instant,
    last_saved_at: Option<Instant>,
}

impl DraftState {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            modified: false,
            interval,
            last_attempt: now,
            last_saved_at: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn mark_modified(&mut self) {
        self.modified = true;
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Snapshot replaced from the server: nothing left to save.
    pub fn mark_clean(&mut self) {
        self.modified = false;
    }

    /// The periodic timer has fired and there is something to save.
    pub fn autosave_due(&self, now: Instant) -> bool {
        self.modified && now.saturating_duration_since(self.last_attempt) >= self.interval
    }

    pub fn record_attempt(&mut self, now: Instant) {
        self.last_attempt = now;
    }

    pub fn record_success(&mut self, now: Instant) {
        self.modified = false;
        self.last_saved_at = Some(now);
    }

    pub fn last_saved_at(&self) -> Option<Instant> {
        self.last_saved_at
    }

    pub fn show_ack(&self, now: Instant) -> bool {
        self.last_saved_at
            .map(|t| now.saturating_duration_since(t) < SAVE_ACK_DURATION)
            .unwrap_or(false)
    }
}
