//! Game state and core simulation types
//!
//! Everything a session mutates lives here, owned by the session controller
//! and handed to the simulation by reference.

use serde::{Deserialize, Serialize};

use super::events::{GameEvent, Status};
use super::layout::LaneLayout;
use crate::px_to_percent;

/// Cup entity ID (unique within a session)
pub type CupId = u32;
/// Lane ID (index in selection order)
pub type LaneId = u32;

/// Production line types the player can enable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LaneType {
    #[serde(rename = "line-1")]
    Line1,
    #[serde(rename = "line-2")]
    Line2,
    #[serde(rename = "line-3")]
    Line3,
}

impl LaneType {
    pub const ALL: [LaneType; 3] = [LaneType::Line1, LaneType::Line2, LaneType::Line3];

    pub fn as_str(&self) -> &'static str {
        match self {
            LaneType::Line1 => "line-1",
            LaneType::Line2 => "line-2",
            LaneType::Line3 => "line-3",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "line-1" | "line1" | "1" => Some(LaneType::Line1),
            "line-2" | "line2" | "2" => Some(LaneType::Line2),
            "line-3" | "line3" | "3" => Some(LaneType::Line3),
            _ => None,
        }
    }
}

/// Visual cup variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CupKind {
    Mug,
    Glass,
    Tall,
}

impl CupKind {
    pub const ALL: [CupKind; 3] = [CupKind::Mug, CupKind::Glass, CupKind::Tall];
}

/// Manufacturing defects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DefectKind {
    Crack,
    Chip,
    Smudge,
    WrongColor,
}

impl DefectKind {
    pub const ALL: [DefectKind; 4] = [
        DefectKind::Crack,
        DefectKind::Chip,
        DefectKind::Smudge,
        DefectKind::WrongColor,
    ];
}

/// A cup travelling along a lane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cup {
    pub id: CupId,
    pub lane: LaneId,
    pub kind: CupKind,
    pub defect: Option<DefectKind>,
    /// Golden cups are never defective
    pub golden: bool,
    /// Percentage along the lane; starts at 100 and decreases
    pub position: f32,
}

impl Cup {
    #[inline]
    pub fn is_defective(&self) -> bool {
        self.defect.is_some()
    }
}

/// A conveyor belt and the cups currently on it (spawn order)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lane {
    pub id: LaneId,
    pub lane_type: LaneType,
    /// Rendered width, so every lane is crossed in the same wall-clock time
    pub width_px: f32,
    pub cups: Vec<Cup>,
}

impl Lane {
    pub fn new(id: LaneId, lane_type: LaneType, width_px: f32) -> Self {
        Self {
            id,
            lane_type,
            width_px,
            cups: Vec::new(),
        }
    }

    /// Lane percentage covered by moving `px` pixels
    #[inline]
    pub fn step_percent(&self, px: f32) -> f32 {
        px_to_percent(px, self.width_px)
    }

    pub fn cup(&self, id: CupId) -> Option<&Cup> {
        self.cups.iter().find(|c| c.id == id)
    }

    /// Remove a cup, preserving the order of the rest
    pub fn remove_cup(&mut self, id: CupId) -> Option<Cup> {
        let idx = self.cups.iter().position(|c| c.id == id)?;
        Some(self.cups.remove(idx))
    }
}

/// Stacked rate and score modifiers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModifierState {
    pub speed_up_active: bool,
    pub speed_multiplier: f32,
    pub bonus_active: bool,
    pub bonus_multiplier: f32,
    pub fluctuation_factor: f32,
    /// Play time of the last speed-up eligibility roll
    pub last_speed_up_check_ms: u64,
    /// Play time of the last defective hit (combo timeout anchor)
    pub last_successful_click_ms: u64,
    /// Spawn cadence currently armed on the scheduler
    pub spawn_interval_ms: u64,
}

impl Default for ModifierState {
    fn default() -> Self {
        Self {
            speed_up_active: false,
            speed_multiplier: 1.0,
            bonus_active: false,
            bonus_multiplier: 1.0,
            fluctuation_factor: 1.0,
            last_speed_up_check_ms: 0,
            last_successful_click_ms: 0,
            spawn_interval_ms: 0,
        }
    }
}

impl ModifierState {
    /// Combined rate from speed-up and fluctuation
    #[inline]
    pub fn rate_factor(&self) -> f32 {
        self.speed_multiplier * self.fluctuation_factor
    }

    /// Effective spawn interval for a base interval (never below 1 ms)
    pub fn effective_spawn_interval_ms(&self, base_ms: f32) -> u64 {
        let interval = base_ms / self.rate_factor();
        if interval.is_finite() {
            (interval.round() as u64).max(1)
        } else {
            u64::MAX
        }
    }

    /// Effective per-frame travel for a base speed
    #[inline]
    pub fn effective_speed_px(&self, base_px: f32) -> f32 {
        base_px * self.rate_factor()
    }
}

/// Score, combo and countdown
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionStats {
    pub score: i64,
    pub combo: u32,
    pub time_remaining: i64,
    pub is_playing: bool,
    /// Ending-soon cue is one-shot per session
    pub ending_cue_fired: bool,
}

/// Counters for the end screen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub spawned: u32,
    pub hits: u32,
    pub mistakes: u32,
    pub misses: u32,
    pub golden_hits: u32,
    pub speed_ups: u32,
    pub best_combo: u32,
}

/// RNG seed record, kept alongside the state for replays
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

/// Complete session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub rng_state: RngState,
    pub stats: SessionStats,
    pub modifiers: ModifierState,
    /// Active lanes (selection order)
    pub lanes: Vec<Lane>,
    pub layout: LaneLayout,
    pub summary: SessionSummary,
    /// Pending frontend events, drained by the session controller
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next cup ID
    next_id: CupId,
}

impl GameState {
    /// Create an idle state with no lanes
    pub fn new(seed: u64, layout: LaneLayout) -> Self {
        Self {
            rng_state: RngState { seed },
            stats: SessionStats::default(),
            modifiers: ModifierState::default(),
            lanes: Vec::new(),
            layout,
            summary: SessionSummary::default(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new cup ID
    pub fn next_entity_id(&mut self) -> CupId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn status(&self) -> Status {
        Status {
            score: self.stats.score,
            time_remaining: self.stats.time_remaining,
            combo: self.stats.combo,
        }
    }

    /// Queue a HUD refresh
    pub fn push_status(&mut self) {
        let status = self.status();
        self.events.push(GameEvent::Status(status));
    }

    /// Find a live cup by ID
    pub fn find_cup(&self, id: CupId) -> Option<&Cup> {
        self.lanes.iter().find_map(|lane| lane.cup(id))
    }

    /// Remove a live cup from whichever lane holds it
    pub fn remove_cup(&mut self, id: CupId) -> Option<Cup> {
        self.lanes.iter_mut().find_map(|lane| lane.remove_cup(id))
    }

    /// Total live cups across all lanes
    pub fn cup_count(&self) -> usize {
        self.lanes.iter().map(|l| l.cups.len()).sum()
    }

    /// Set the combo, tracking the session best
    pub fn set_combo(&mut self, combo: u32) {
        self.stats.combo = combo;
        self.summary.best_combo = self.summary.best_combo.max(combo);
    }
}
