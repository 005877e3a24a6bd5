//! Scheduled task dispatch
//!
//! Each scheduled task runs to completion before the next one starts, so
//! there's no shared-state contention. Order inside a frame matters:
//! motion and exit penalties resolve first, then the combo timeout and the
//! speed-up roll read the updated state.

use rand::Rng;

use super::clock::{Scheduler, TaskKind};
use super::events::{Cue, GameEvent};
use super::state::GameState;
use super::{modifiers, motion, scoring, spawn};
use crate::tuning::Tuning;

/// Run one fired task. Tasks that fire after the session ended do nothing.
pub fn run_task<R: Rng + ?Sized>(
    state: &mut GameState,
    scheduler: &mut Scheduler,
    rng: &mut R,
    tuning: &Tuning,
    task: TaskKind,
) {
    if !state.stats.is_playing {
        return;
    }

    match task {
        TaskKind::Frame => frame(state, scheduler, rng, tuning),
        TaskKind::Countdown => countdown(state, scheduler, tuning),
        TaskKind::Spawn => {
            spawn::spawn_cup(state, rng, tuning);
        }
        TaskKind::Fluctuation => modifiers::fluctuate(state, scheduler, rng, tuning),
        TaskKind::SpeedUpExpiry => modifiers::end_speed_up(state, scheduler, tuning),
        TaskKind::BonusExpiry => modifiers::end_bonus(state),
    }
}

/// Motion, then combo timeout, then speed-up eligibility
fn frame<R: Rng + ?Sized>(
    state: &mut GameState,
    scheduler: &mut Scheduler,
    rng: &mut R,
    tuning: &Tuning,
) {
    motion::advance_lanes(state, tuning);
    state.events.push(GameEvent::CupsMoved);
    scoring::check_combo_timeout(state, scheduler.now_ms(), tuning);
    modifiers::check_speed_up(state, scheduler, rng, tuning);
}

fn countdown(state: &mut GameState, scheduler: &mut Scheduler, tuning: &Tuning) {
    state.stats.time_remaining -= 1;
    state.push_status();

    if state.stats.time_remaining == tuning.ending_soon_secs && !state.stats.ending_cue_fired {
        state.stats.ending_cue_fired = true;
        state.events.push(GameEvent::PlayCue(Cue::EndingSoon));
    }

    if state.stats.time_remaining <= 0 {
        finish(state, scheduler);
    }
}

/// Arm the periodic activities of a fresh session
pub fn arm_session(state: &mut GameState, scheduler: &mut Scheduler, tuning: &Tuning) {
    use crate::consts::{COUNTDOWN_MS, FLUCTUATION_INTERVAL_MS, FRAME_MS};

    scheduler.every(TaskKind::Frame, FRAME_MS);
    modifiers::reschedule_spawn(state, scheduler, tuning);
    scheduler.every(TaskKind::Countdown, COUNTDOWN_MS);
    scheduler.every(TaskKind::Fluctuation, FLUCTUATION_INTERVAL_MS);
}

/// End the session: stop every activity and freeze the score
///
/// Returns false if the session had already ended.
pub fn finish(state: &mut GameState, scheduler: &mut Scheduler) -> bool {
    if !state.stats.is_playing {
        return false;
    }
    state.stats.is_playing = false;
    scheduler.cancel_all();

    state.events.push(GameEvent::StopCue(Cue::BackgroundLoop));
    state.events.push(GameEvent::SessionEnded {
        final_score: state.stats.score,
        summary: state.summary,
    });

    log::info!(
        "Session ended at {} ms: score {}, best combo {}",
        scheduler.now_ms(),
        state.stats.score,
        state.summary.best_combo
    );
    true
}
