//! Cup spawning
//!
//! All randomness flows through the caller's RNG, so a fixed seed yields the
//! same cup sequence every run.

use rand::Rng;

use super::events::GameEvent;
use super::state::{Cup, CupId, CupKind, DefectKind, GameState};
use crate::consts::SPAWN_POSITION;
use crate::tuning::Tuning;

/// Randomized cup attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CupRoll {
    pub kind: CupKind,
    pub defect: Option<DefectKind>,
    pub golden: bool,
}

/// Roll a new cup's kind, rarity and defect
///
/// Golden cups never spawn during a bonus window, and every defect is a
/// crack while one is active.
pub fn roll_cup<R: Rng + ?Sized>(rng: &mut R, bonus_active: bool, tuning: &Tuning) -> CupRoll {
    let kind = CupKind::ALL[rng.random_range(0..CupKind::ALL.len())];

    // The golden roll is always drawn so the sequence doesn't shift with bonus state
    let golden = rng.random::<f64>() < tuning.golden_chance && !bonus_active;
    if golden {
        return CupRoll {
            kind,
            defect: None,
            golden: true,
        };
    }

    let defect = if rng.random::<f64>() < tuning.defect_chance {
        Some(if bonus_active {
            DefectKind::Crack
        } else {
            DefectKind::ALL[rng.random_range(0..DefectKind::ALL.len())]
        })
    } else {
        None
    };

    CupRoll {
        kind,
        defect,
        golden: false,
    }
}

/// Spawn a cup on a random lane
///
/// No-op (returns `None`) when the session isn't running or has no lanes.
pub fn spawn_cup<R: Rng + ?Sized>(
    state: &mut GameState,
    rng: &mut R,
    tuning: &Tuning,
) -> Option<CupId> {
    if !state.stats.is_playing || state.lanes.is_empty() {
        return None;
    }

    let lane_index = rng.random_range(0..state.lanes.len());
    let roll = roll_cup(rng, state.modifiers.bonus_active, tuning);

    let id = state.next_entity_id();
    let lane = &mut state.lanes[lane_index];
    lane.cups.push(Cup {
        id,
        lane: lane.id,
        kind: roll.kind,
        defect: roll.defect,
        golden: roll.golden,
        position: SPAWN_POSITION,
    });
    let lane_id = lane.id;

    state.summary.spawned += 1;
    state.events.push(GameEvent::CupSpawned { id, lane: lane_id });
    log::trace!(
        "Spawned cup {} on lane {}: {:?} defect={:?} golden={}",
        id,
        lane_id,
        roll.kind,
        roll.defect,
        roll.golden
    );

    Some(id)
}
