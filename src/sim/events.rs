//! Events emitted by the simulation for the frontend
//!
//! The simulation never talks to a renderer or audio device directly. It
//! queues `GameEvent`s on the state, and the session controller drains them
//! into the collaborators after every scheduled task or click.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{CupId, LaneId, SessionSummary};

/// Discrete audio cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cue {
    /// Defective cup clicked
    CorrectHit,
    /// Clean cup clicked
    Mistake,
    /// Defective cup left the field
    Miss,
    /// Golden cup clicked (bonus window starts)
    GoldenHit,
    SpeedUpStart,
    SpeedUpEnd,
    /// Looping background music
    BackgroundLoop,
    /// Countdown reached the warning threshold
    EndingSoon,
}

/// Persistent on-screen indicators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Indicator {
    SpeedUp,
    Bonus,
}

/// Transient score popup
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    /// Anchor in game-area pixels
    pub screen_pos: Vec2,
    /// Signed score change (0 for golden cups)
    pub amount: i64,
    /// Whether the click was the right call
    pub correct: bool,
    pub lifetime_ms: u64,
}

impl Feedback {
    /// Popup text, with an explicit sign on gains
    pub fn label(&self) -> String {
        if self.amount > 0 {
            format!("+{}", self.amount)
        } else {
            self.amount.to_string()
        }
    }
}

/// HUD values, pushed after every mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub score: i64,
    pub time_remaining: i64,
    pub combo: u32,
}

/// Why a cup left its lane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemovalReason {
    Clicked,
    Exited,
}

/// Everything the frontend needs to know about
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Lanes were (re)built for a new session
    LanesCreated,
    CupSpawned { id: CupId, lane: LaneId },
    /// Positions advanced by a frame tick
    CupsMoved,
    CupRemoved { id: CupId, lane: LaneId, reason: RemovalReason },
    Indicator { indicator: Indicator, visible: bool },
    Feedback(Feedback),
    PlayCue(Cue),
    StopCue(Cue),
    Status(Status),
    SessionEnded { final_score: i64, summary: SessionSummary },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feedback_label() {
        let mut feedback = Feedback {
            screen_pos: Vec2::ZERO,
            amount: 150,
            correct: true,
            lifetime_ms: 1000,
        };
        assert_eq!(feedback.label(), "+150");

        feedback.amount = -200;
        assert_eq!(feedback.label(), "-200");

        feedback.amount = 0;
        assert_eq!(feedback.label(), "0");
    }
}
