//! Session settings
//!
//! What the start screen hands to `Game::start`: duration, selected
//! production lines, lane geometry and audio levels. Loaded from JSON on
//! native builds; every field falls back to its default when absent.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{
    CUP_SIZE_PX, DEFAULT_DURATION_SECS, DEFAULT_LANE_HEIGHT_PX, DEFAULT_LANE_WIDTH_PX,
};
use crate::error::ConfigError;
use crate::sim::{LaneLayout, LaneType};

/// Parse a duration text input. Anything but a positive integer is rejected.
pub fn parse_duration(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok().filter(|secs| *secs > 0)
}

/// Per-session settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Session length in seconds (`None` or non-positive means default)
    pub duration_secs: Option<i64>,
    /// Selected production lines, top to bottom
    pub lanes: Vec<LaneType>,
    /// RNG seed; a random one is drawn when unset
    pub seed: Option<u64>,

    // === Geometry ===
    pub lane_width_px: f32,
    pub lane_height_px: f32,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            duration_secs: None,
            lanes: vec![LaneType::Line1],
            seed: None,

            lane_width_px: DEFAULT_LANE_WIDTH_PX,
            lane_height_px: DEFAULT_LANE_HEIGHT_PX,

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
        }
    }
}

impl Settings {
    /// Settings with the given lines selected
    pub fn with_lanes(lanes: &[LaneType]) -> Self {
        Self {
            lanes: lanes.to_vec(),
            ..Self::default()
        }
    }

    /// Apply the raw text of the duration input
    pub fn set_duration_input(&mut self, raw: &str) {
        self.duration_secs = parse_duration(raw);
    }

    /// Effective session length in seconds
    pub fn duration(&self) -> i64 {
        match self.duration_secs {
            Some(secs) if secs > 0 => secs,
            _ => DEFAULT_DURATION_SECS,
        }
    }

    /// Selected lines without duplicates, in selection order
    pub fn selected_lanes(&self) -> Vec<LaneType> {
        let mut lanes: Vec<LaneType> = Vec::with_capacity(self.lanes.len());
        for lane in &self.lanes {
            if !lanes.contains(lane) {
                lanes.push(*lane);
            }
        }
        lanes
    }

    /// Lane width, falling back to the default for unusable values
    pub fn lane_width(&self) -> f32 {
        positive_or(self.lane_width_px, DEFAULT_LANE_WIDTH_PX)
    }

    pub fn layout(&self) -> LaneLayout {
        LaneLayout {
            lane_height_px: positive_or(self.lane_height_px, DEFAULT_LANE_HEIGHT_PX),
            cup_size_px: CUP_SIZE_PX,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, using defaults if the file is missing or broken
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }
}

fn positive_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        fallback
    }
}
