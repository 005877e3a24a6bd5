//! Modifier engine: speed-up windows, bonus windows and ambient fluctuation
//!
//! The three effects are independent and may overlap. Speed-up and
//! fluctuation both feed the rate factor, so any change to either one
//! re-arms the spawn task at the new cadence right away.

use rand::Rng;

use super::clock::{Scheduler, TaskKind};
use super::events::{Cue, GameEvent, Indicator};
use super::state::GameState;
use crate::tuning::Tuning;

/// Re-arm the spawn task at the current effective interval
pub fn reschedule_spawn(state: &mut GameState, scheduler: &mut Scheduler, tuning: &Tuning) {
    let interval = state
        .modifiers
        .effective_spawn_interval_ms(tuning.base_spawn_interval_ms);
    state.modifiers.spawn_interval_ms = interval;
    scheduler.every(TaskKind::Spawn, interval);
}

// === Speed-up window ===

/// Roll for a speed-up if one is due. Returns whether a window started.
///
/// Skipped entirely while a window is active or when too little time
/// remains; the check clock only advances when a roll actually happens.
pub fn check_speed_up<R: Rng + ?Sized>(
    state: &mut GameState,
    scheduler: &mut Scheduler,
    rng: &mut R,
    tuning: &Tuning,
) -> bool {
    if !state.stats.is_playing
        || state.modifiers.speed_up_active
        || state.stats.time_remaining < tuning.speed_up_min_time_remaining
    {
        return false;
    }

    let now = scheduler.now_ms();
    let since_last = now.saturating_sub(state.modifiers.last_speed_up_check_ms);
    if since_last <= tuning.speed_up_check_interval_ms {
        return false;
    }
    state.modifiers.last_speed_up_check_ms = now;

    if rng.random::<f64>() < tuning.speed_up_chance {
        start_speed_up(state, scheduler, tuning);
        true
    } else {
        false
    }
}

pub fn start_speed_up(state: &mut GameState, scheduler: &mut Scheduler, tuning: &Tuning) {
    let m = &mut state.modifiers;
    m.speed_up_active = true;
    m.speed_multiplier = tuning.speed_boost;
    state.summary.speed_ups += 1;

    state.events.push(GameEvent::Indicator {
        indicator: Indicator::SpeedUp,
        visible: true,
    });
    state.events.push(GameEvent::PlayCue(Cue::SpeedUpStart));
    reschedule_spawn(state, scheduler, tuning);
    scheduler.after(TaskKind::SpeedUpExpiry, tuning.speed_up_duration_ms);

    log::debug!("Speed-up started at {} ms", scheduler.now_ms());
}

/// Speed-up expiry. No-op after the session ended.
pub fn end_speed_up(state: &mut GameState, scheduler: &mut Scheduler, tuning: &Tuning) {
    if !state.stats.is_playing || !state.modifiers.speed_up_active {
        return;
    }
    state.modifiers.speed_up_active = false;
    state.modifiers.speed_multiplier = 1.0;

    state.events.push(GameEvent::Indicator {
        indicator: Indicator::SpeedUp,
        visible: false,
    });
    state.events.push(GameEvent::PlayCue(Cue::SpeedUpEnd));
    reschedule_spawn(state, scheduler, tuning);

    log::debug!("Speed-up ended at {} ms", scheduler.now_ms());
}

// === Bonus window ===

/// Start (or restart) the bonus window
///
/// A golden click during an active window restarts the full duration and
/// replays the cue.
pub fn start_bonus(state: &mut GameState, scheduler: &mut Scheduler, tuning: &Tuning) {
    state.modifiers.bonus_active = true;
    state.modifiers.bonus_multiplier = tuning.bonus_multiplier;

    state.events.push(GameEvent::Indicator {
        indicator: Indicator::Bonus,
        visible: true,
    });
    state.events.push(GameEvent::PlayCue(Cue::GoldenHit));
    scheduler.after(TaskKind::BonusExpiry, tuning.bonus_duration_ms);

    log::debug!("Bonus window started at {} ms", scheduler.now_ms());
}

/// Bonus expiry. No-op after the session ended.
pub fn end_bonus(state: &mut GameState) {
    if !state.stats.is_playing || !state.modifiers.bonus_active {
        return;
    }
    state.modifiers.bonus_active = false;
    state.modifiers.bonus_multiplier = 1.0;
    state.events.push(GameEvent::Indicator {
        indicator: Indicator::Bonus,
        visible: false,
    });
}

// === Fluctuation ===

/// Redraw the ambient speed factor and re-arm spawning
pub fn fluctuate<R: Rng + ?Sized>(
    state: &mut GameState,
    scheduler: &mut Scheduler,
    rng: &mut R,
    tuning: &Tuning,
) {
    if !state.stats.is_playing {
        return;
    }
    let span = tuning.fluctuation_max - tuning.fluctuation_min;
    let factor = tuning.fluctuation_min + rng.random::<f32>() * span;
    state.modifiers.fluctuation_factor = factor
        .max(tuning.fluctuation_min)
        .min(tuning.fluctuation_max);
    reschedule_spawn(state, scheduler, tuning);

    log::trace!(
        "Fluctuation factor {:.3}, spawn every {} ms",
        state.modifiers.fluctuation_factor,
        state.modifiers.spawn_interval_ms
    );
}
