use std::time::{Duration, Instant};

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AutosaveStatus {
    Idle,
    Saving,
    Saved,
}

impl AutosaveStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Idle => "",
            Self::Saving => "Saving...",
            Self::Saved => "All changes saved",
        }
    }
}

/// Debounced "saving"/"saved" status text. Purely informational: nothing is written when the
/// indicator settles.
#[derive(Debug, Clone)]
pub struct AutosaveIndicator {
    delay: Duration,
    status: AutosaveStatus,
    settles_at: Option<Instant>,
}

impl AutosaveIndicator {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            status: AutosaveStatus::Idle,
            settles_at: None,
        }
    }

    /// Restart the quiet period; a pending deadline is replaced, never stacked.
    pub fn record_edit(&mut self, now: Instant) {
        self.status = AutosaveStatus::Saving;
        self.settles_at = Some(now + self.delay);
    }

    pub fn poll(&mut self, now: Instant) -> AutosaveStatus {
        if let Some(deadline) = self.settles_at {
            if now >= deadline {
                self.status = AutosaveStatus::Saved;
                self.settles_at = None;
            }
        }
        self.status
    }

    pub fn status(&self) -> AutosaveStatus {
        self.status
    }
}
