//! Lane motion and exits
//!
//! Cups move in place once per frame. Speed is expressed as a share of lane
//! width, so lanes of different widths are crossed in the same wall-clock
//! time.

use super::events::{GameEvent, RemovalReason};
use super::scoring;
use super::state::{Cup, GameState};
use crate::consts::EXIT_THRESHOLD;
use crate::tuning::Tuning;

/// Advance every cup by one frame and expire the ones that left the field
///
/// Returns the exited cups. Unclicked defective cups count as misses.
pub fn advance_lanes(state: &mut GameState, tuning: &Tuning) -> Vec<Cup> {
    let step_px = state.modifiers.effective_speed_px(tuning.base_speed_px);
    let mut exited = Vec::new();

    for lane in &mut state.lanes {
        let step = lane.step_percent(step_px);
        for cup in &mut lane.cups {
            cup.position -= step;
        }

        lane.cups.retain(|cup| {
            if cup.position < EXIT_THRESHOLD {
                exited.push(cup.clone());
                false
            } else {
                true
            }
        });
    }

    for cup in &exited {
        state.events.push(GameEvent::CupRemoved {
            id: cup.id,
            lane: cup.lane,
            reason: RemovalReason::Exited,
        });
        if cup.is_defective() {
            scoring::apply_miss(state, tuning);
        }
    }

    exited
}
