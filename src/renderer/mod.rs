//! Renderer interface
//!
//! The simulation owns no visuals. A renderer is told about lanes, cups,
//! indicators and feedback popups, and draws them however it likes.

mod feedback;

pub use feedback::{FeedbackLayer, Popup};

pub use crate::sim::{Feedback, Indicator, RemovalReason};
use crate::sim::{Cup, CupId, Lane, SessionSummary};

/// Consumer of simulation visuals. Every method defaults to a no-op.
pub trait Renderer {
    /// A new session built its lanes (top to bottom)
    fn lanes_created(&mut self, _lanes: &[Lane]) {}

    fn cup_spawned(&mut self, _cup: &Cup) {}

    /// Called after every frame tick with current positions
    fn cups_moved(&mut self, _lanes: &[Lane]) {}

    fn cup_removed(&mut self, _id: CupId, _reason: RemovalReason) {}

    /// Show or hide a persistent indicator
    fn indicator(&mut self, _indicator: Indicator, _visible: bool) {}

    /// Transient popup; it should disappear after `lifetime_ms`
    fn feedback(&mut self, _feedback: &Feedback) {}

    fn session_ended(&mut self, _final_score: i64, _summary: &SessionSummary) {}
}

impl Renderer for () {}

/// Renderer that logs instead of drawing (headless builds)
#[derive(Debug, Default)]
pub struct LogRenderer {
    pub popups: FeedbackLayer,
    speed_up_visible: bool,
    bonus_visible: bool,
    frames: u64,
}

impl LogRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn indicator_visible(&self, indicator: Indicator) -> bool {
        match indicator {
            Indicator::SpeedUp => self.speed_up_visible,
            Indicator::Bonus => self.bonus_visible,
        }
    }
}

impl Renderer for LogRenderer {
    fn lanes_created(&mut self, lanes: &[Lane]) {
        let names: Vec<_> = lanes.iter().map(|l| l.lane_type.as_str()).collect();
        log::info!("Lanes: {}", names.join(", "));
        self.popups.clear();
        self.frames = 0;
    }

    fn cup_spawned(&mut self, cup: &Cup) {
        log::trace!("cup {} enters lane {}", cup.id, cup.lane);
    }

    fn cups_moved(&mut self, _lanes: &[Lane]) {
        self.frames += 1;
        self.popups.age(crate::consts::FRAME_MS);
    }

    fn cup_removed(&mut self, id: CupId, reason: RemovalReason) {
        log::trace!("cup {} removed ({:?})", id, reason);
    }

    fn indicator(&mut self, indicator: Indicator, visible: bool) {
        match indicator {
            Indicator::SpeedUp => self.speed_up_visible = visible,
            Indicator::Bonus => self.bonus_visible = visible,
        }
        log::info!("{:?} indicator {}", indicator, if visible { "on" } else { "off" });
    }

    fn feedback(&mut self, feedback: &Feedback) {
        log::debug!(
            "popup {} at ({:.0}, {:.0})",
            feedback.label(),
            feedback.screen_pos.x,
            feedback.screen_pos.y
        );
        self.popups.push(*feedback);
    }

    fn session_ended(&mut self, final_score: i64, summary: &SessionSummary) {
        log::info!(
            "Final score {} after {} frames ({} hits, {} mistakes, {} misses)",
            final_score,
            self.frames,
            summary.hits,
            summary.mistakes,
            summary.misses
        );
    }
}
