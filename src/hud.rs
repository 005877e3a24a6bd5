//! HUD status sink
//!
//! Score, timer and combo are pushed after every change.

use std::fmt;

pub use crate::sim::Status;

/// Consumer of HUD status updates
pub trait StatusSink {
    fn status(&mut self, status: Status);
}

impl StatusSink for () {
    fn status(&mut self, _status: Status) {}
}

/// Combo as shown on the HUD
pub fn combo_label(combo: u32) -> String {
    format!("{combo}x")
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "score {} | time {} | combo {}",
            self.score,
            self.time_remaining,
            combo_label(self.combo)
        )
    }
}

/// Status sink that logs changes (headless builds)
#[derive(Debug, Default)]
pub struct LogStatus {
    last: Option<Status>,
}

impl LogStatus {
    pub fn last(&self) -> Option<Status> {
        self.last
    }
}

impl StatusSink for LogStatus {
    fn status(&mut self, status: Status) {
        if self.last != Some(status) {
            log::debug!("{status}");
        }
        self.last = Some(status);
    }
}
