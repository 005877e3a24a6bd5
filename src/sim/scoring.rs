//! Scoring and combo state machine
//!
//! | Clicked cup | Score                       | Combo     |
//! |-------------|-----------------------------|-----------|
//! | Golden      | +0, bonus window starts     | unchanged |
//! | Defective   | +100 x tier x bonus         | +1        |
//! | Clean       | -200                        | reset     |
//! | (missed)    | -50                         | reset     |
//!
//! The combo also resets after `combo_timeout_ms` without a defective hit.

use super::clock::Scheduler;
use super::events::{Cue, Feedback, GameEvent, RemovalReason};
use super::modifiers;
use super::state::{Cup, CupId, GameState};
use crate::consts::FEEDBACK_LIFETIME_MS;
use crate::tuning::Tuning;

/// What a clicked cup turned out to be
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Golden,
    Defective,
    Clean,
}

impl Verdict {
    pub fn of(cup: &Cup) -> Self {
        if cup.golden {
            Verdict::Golden
        } else if cup.is_defective() {
            Verdict::Defective
        } else {
            Verdict::Clean
        }
    }

    /// Clicking golden and defective cups is the right call
    pub fn is_correct(&self) -> bool {
        !matches!(self, Verdict::Clean)
    }
}

/// Result of a click that hit a live cup
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickOutcome {
    pub cup: CupId,
    pub verdict: Verdict,
    /// Signed score change
    pub amount: i64,
}

/// Points for hitting a defective cup at the given combo
pub fn defect_award(combo: u32, bonus_multiplier: f32, tuning: &Tuning) -> i64 {
    let points = tuning.defect_points as f64
        * tuning.combo_multiplier(combo) as f64
        * bonus_multiplier as f64;
    points.round() as i64
}

/// Resolve a click on a cup
///
/// Clicks on nothing, on cups that are already gone, or outside a running
/// session are ignored. Any hit consumes the cup.
pub fn click(
    state: &mut GameState,
    scheduler: &mut Scheduler,
    tuning: &Tuning,
    target: Option<CupId>,
) -> Option<ClickOutcome> {
    if !state.stats.is_playing {
        return None;
    }
    let id = target?;

    let lane_index = state
        .lanes
        .iter()
        .position(|lane| lane.cup(id).is_some())?;
    let lane = &state.lanes[lane_index];
    let cup = lane.cup(id)?;
    let anchor = state.layout.feedback_anchor(lane_index, lane, cup);
    let verdict = Verdict::of(cup);
    let lane_id = lane.id;

    let now = scheduler.now_ms();
    let amount = match verdict {
        Verdict::Golden => {
            state.summary.golden_hits += 1;
            modifiers::start_bonus(state, scheduler, tuning);
            0
        }
        Verdict::Defective => {
            let award = defect_award(state.stats.combo, state.modifiers.bonus_multiplier, tuning);
            state.stats.score += award;
            state.set_combo(state.stats.combo + 1);
            state.modifiers.last_successful_click_ms = now;
            state.summary.hits += 1;
            state.events.push(GameEvent::PlayCue(Cue::CorrectHit));
            award
        }
        Verdict::Clean => {
            state.stats.score -= tuning.mistake_penalty;
            state.set_combo(0);
            state.summary.mistakes += 1;
            state.events.push(GameEvent::PlayCue(Cue::Mistake));
            -tuning.mistake_penalty
        }
    };

    state.events.push(GameEvent::Feedback(Feedback {
        screen_pos: anchor,
        amount,
        correct: verdict.is_correct(),
        lifetime_ms: FEEDBACK_LIFETIME_MS,
    }));
    state.lanes[lane_index].remove_cup(id);
    state.events.push(GameEvent::CupRemoved {
        id,
        lane: lane_id,
        reason: RemovalReason::Clicked,
    });
    state.push_status();

    log::debug!("Click on cup {}: {:?} ({:+})", id, verdict, amount);

    Some(ClickOutcome {
        cup: id,
        verdict,
        amount,
    })
}

/// A defective cup left the field unclicked
pub fn apply_miss(state: &mut GameState, tuning: &Tuning) {
    state.stats.score -= tuning.miss_penalty;
    state.set_combo(0);
    state.summary.misses += 1;
    state.push_status();
    state.events.push(GameEvent::PlayCue(Cue::Miss));
}

/// Break the combo if the last defective hit is too old. Returns whether it reset.
pub fn check_combo_timeout(state: &mut GameState, now_ms: u64, tuning: &Tuning) -> bool {
    let idle = now_ms.saturating_sub(state.modifiers.last_successful_click_ms);
    if state.stats.is_playing && state.stats.combo > 0 && idle > tuning.combo_timeout_ms {
        state.set_combo(0);
        state.push_status();
        true
    } else {
        false
    }
}
