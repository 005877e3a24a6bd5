//! Cup Patrol - conveyor-belt quality control arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (clock, spawning, motion, modifiers, scoring)
//! - `session`: Session controller wiring the simulation to its collaborators
//! - `renderer`, `audio`, `hud`: Collaborator interfaces consumed by the frontend
//! - `settings`: Per-session configuration input
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod error;
pub mod hud;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{ConfigError, StartError};
pub use session::{Game, SessionPhase};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Frame tick period (~60 Hz)
    pub const FRAME_MS: u64 = 16;
    /// Countdown tick period
    pub const COUNTDOWN_MS: u64 = 1000;
    /// How often the ambient speed fluctuation is redrawn
    pub const FLUCTUATION_INTERVAL_MS: u64 = 3000;

    /// Session length when the duration input is missing or invalid
    pub const DEFAULT_DURATION_SECS: i64 = 90;

    /// Cups start fully off-field on the spawn side
    pub const SPAWN_POSITION: f32 = 100.0;
    /// Cups below this lane percentage have left the field
    pub const EXIT_THRESHOLD: f32 = -10.0;

    /// Lane geometry defaults (pixels)
    pub const DEFAULT_LANE_WIDTH_PX: f32 = 800.0;
    pub const DEFAULT_LANE_HEIGHT_PX: f32 = 150.0;
    pub const CUP_SIZE_PX: f32 = 100.0;

    /// Feedback popups float this far above the cup they came from
    pub const FEEDBACK_OFFSET_PX: f32 = 20.0;
    /// On-screen lifetime of a feedback popup
    pub const FEEDBACK_LIFETIME_MS: u64 = 1000;
}

/// Convert a pixel distance to a percentage of a lane's width
#[inline]
pub fn px_to_percent(px: f32, lane_width_px: f32) -> f32 {
    px / lane_width_px * 100.0
}

/// Convert a lane percentage back to pixels
#[inline]
pub fn percent_to_px(percent: f32, lane_width_px: f32) -> f32 {
    percent / 100.0 * lane_width_px
}
