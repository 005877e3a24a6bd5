//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Virtual play-time clock only (no wall-clock reads)
//! - Seeded RNG only
//! - Stable iteration order (lanes in selection order, cups in spawn order)
//! - No rendering, audio or platform dependencies; output is `GameEvent`s

pub mod clock;
pub mod events;
pub mod layout;
pub mod modifiers;
pub mod motion;
pub mod scoring;
pub mod spawn;
pub mod state;
pub mod tick;

pub use clock::{Scheduler, TaskKind};
pub use events::{Cue, Feedback, GameEvent, Indicator, RemovalReason, Status};
pub use layout::LaneLayout;
pub use scoring::{ClickOutcome, Verdict};
pub use state::{
    Cup, CupId, CupKind, DefectKind, GameState, Lane, LaneId, LaneType, ModifierState,
    SessionStats, SessionSummary,
};
pub use tick::run_task;
