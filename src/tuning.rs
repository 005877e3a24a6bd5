//! Data-driven game balance
//!
//! Every score value, probability and modifier duration lives here so a
//! session can be rebalanced (or made deterministic for tests) without
//! touching simulation code. `Default` reproduces the shipped balance.

use serde::{Deserialize, Serialize};

/// A combo threshold and the point multiplier it unlocks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComboTier {
    pub min_combo: u32,
    pub multiplier: f32,
}

/// Game balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Motion & spawning ===
    /// Cup travel per frame at 1x rate (pixels)
    pub base_speed_px: f32,
    /// Spawn interval at 1x rate (milliseconds)
    pub base_spawn_interval_ms: f32,
    /// Chance a spawned cup is golden (only outside bonus windows)
    pub golden_chance: f64,
    /// Chance a non-golden cup is defective
    pub defect_chance: f64,

    // === Scoring ===
    pub defect_points: i64,
    pub mistake_penalty: i64,
    pub miss_penalty: i64,
    /// Combo breaks after this long without a defective hit
    pub combo_timeout_ms: u64,
    /// Combo tiers, highest threshold first
    pub combo_tiers: Vec<ComboTier>,

    // === Bonus window ===
    pub bonus_multiplier: f32,
    pub bonus_duration_ms: u64,

    // === Speed-up window ===
    pub speed_up_chance: f64,
    pub speed_up_check_interval_ms: u64,
    pub speed_up_duration_ms: u64,
    pub speed_boost: f32,
    /// Speed-ups only roll while at least this many seconds remain
    pub speed_up_min_time_remaining: i64,

    // === Fluctuation ===
    pub fluctuation_min: f32,
    pub fluctuation_max: f32,

    /// Remaining seconds at which the ending-soon cue fires
    pub ending_soon_secs: i64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            base_speed_px: 5.0,
            base_spawn_interval_ms: 1000.0,
            golden_chance: 0.01,
            defect_chance: 0.4,

            defect_points: 100,
            mistake_penalty: 200,
            miss_penalty: 50,
            combo_timeout_ms: 3000,
            combo_tiers: vec![
                ComboTier { min_combo: 15, multiplier: 2.0 },
                ComboTier { min_combo: 10, multiplier: 1.5 },
                ComboTier { min_combo: 5, multiplier: 1.2 },
            ],

            bonus_multiplier: 3.0,
            bonus_duration_ms: 5000,

            speed_up_chance: 0.2,
            speed_up_check_interval_ms: 5000,
            speed_up_duration_ms: 10_000,
            speed_boost: 1.5,
            speed_up_min_time_remaining: 80,

            fluctuation_min: 0.7,
            fluctuation_max: 1.3,

            ending_soon_secs: 10,
        }
    }
}

impl Tuning {
    /// Point multiplier for the current combo (1.0 below the lowest tier)
    pub fn combo_multiplier(&self, combo: u32) -> f32 {
        self.combo_tiers
            .iter()
            .filter(|tier| combo >= tier.min_combo)
            .max_by_key(|tier| tier.min_combo)
            .map_or(1.0, |tier| tier.multiplier)
    }

    /// Balance with all randomness that produces cups turned off
    pub fn without_cups() -> Self {
        Self {
            golden_chance: 0.0,
            defect_chance: 0.0,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combo_tiers() {
        let tuning = Tuning::default();
        assert_eq!(tuning.combo_multiplier(0), 1.0);
        assert_eq!(tuning.combo_multiplier(4), 1.0);
        assert_eq!(tuning.combo_multiplier(5), 1.2);
        assert_eq!(tuning.combo_multiplier(9), 1.2);
        assert_eq!(tuning.combo_multiplier(10), 1.5);
        assert_eq!(tuning.combo_multiplier(14), 1.5);
        assert_eq!(tuning.combo_multiplier(15), 2.0);
        assert_eq!(tuning.combo_multiplier(200), 2.0);
    }

    #[test]
    fn test_tier_order_does_not_matter() {
        let mut tuning = Tuning::default();
        tuning.combo_tiers.reverse();
        assert_eq!(tuning.combo_multiplier(16), 2.0);
        assert_eq!(tuning.combo_multiplier(12), 1.5);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning: Tuning = serde_json::from_str(r#"{ "miss_penalty": 75 }"#).unwrap();
        assert_eq!(tuning.miss_penalty, 75);
        assert_eq!(tuning.mistake_penalty, 200);
        assert_eq!(tuning.combo_tiers.len(), 3);
    }
}
