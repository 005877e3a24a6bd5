//! Session controller
//!
//! Owns the play lifecycle (NotStarted -> Playing <-> Paused -> Ended),
//! the scheduler and the RNG, and forwards simulation events to the
//! renderer, audio and status collaborators after every task or click.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::audio::AudioSink;
use crate::error::StartError;
use crate::hud::StatusSink;
use crate::renderer::Renderer;
use crate::settings::Settings;
use crate::sim::{
    ClickOutcome, Cue, CupId, GameEvent, GameState, Indicator, Lane, LaneId, LaneLayout,
    Scheduler, SessionStats, SessionSummary, scoring, tick,
};
use crate::tuning::Tuning;

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    NotStarted,
    Playing,
    /// Virtual time frozen; clicks ignored
    Paused,
    Ended,
}

/// A game: one session at a time, restartable
pub struct Game {
    state: GameState,
    scheduler: Scheduler,
    rng: Pcg32,
    tuning: Tuning,
    phase: SessionPhase,
    renderer: Box<dyn Renderer>,
    audio: Box<dyn AudioSink>,
    status: Box<dyn StatusSink>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(Tuning::default())
    }
}

impl Game {
    /// Create a game with no-op collaborators
    pub fn new(tuning: Tuning) -> Self {
        Self {
            state: GameState::new(0, LaneLayout::default()),
            scheduler: Scheduler::new(),
            rng: Pcg32::seed_from_u64(0),
            tuning,
            phase: SessionPhase::NotStarted,
            renderer: Box::new(()),
            audio: Box::new(()),
            status: Box::new(()),
        }
    }

    pub fn with_renderer(mut self, renderer: impl Renderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    pub fn with_audio(mut self, audio: impl AudioSink + 'static) -> Self {
        self.audio = Box::new(audio);
        self
    }

    pub fn with_status(mut self, status: impl StatusSink + 'static) -> Self {
        self.status = Box::new(status);
        self
    }

    // === Lifecycle ===

    /// Start (or restart) a session
    ///
    /// Fails without creating any lanes when no production line is selected;
    /// the game is then back in `NotStarted`.
    pub fn start(&mut self, settings: &Settings) -> Result<(), StartError> {
        let lane_types = settings.selected_lanes();
        let was_running = matches!(self.phase, SessionPhase::Playing | SessionPhase::Paused);
        self.scheduler.cancel_all();

        if lane_types.is_empty() {
            if was_running {
                self.audio.stop(Cue::BackgroundLoop);
            }
            self.state = GameState::new(self.state.rng_state.seed, settings.layout());
            self.phase = SessionPhase::NotStarted;
            log::warn!("Start refused: no production line selected");
            return Err(StartError::NoLanesSelected);
        }

        let seed = settings.seed.unwrap_or_else(rand::random);
        self.rng = Pcg32::seed_from_u64(seed);
        self.scheduler = Scheduler::new();

        let mut state = GameState::new(seed, settings.layout());
        let width = settings.lane_width();
        state.lanes = lane_types
            .iter()
            .enumerate()
            .map(|(i, lane_type)| Lane::new(i as LaneId, *lane_type, width))
            .collect();
        state.stats = SessionStats {
            time_remaining: settings.duration(),
            is_playing: true,
            ..SessionStats::default()
        };

        state.events.push(GameEvent::LanesCreated);
        for indicator in [Indicator::Bonus, Indicator::SpeedUp] {
            state.events.push(GameEvent::Indicator {
                indicator,
                visible: false,
            });
        }
        state.events.push(GameEvent::PlayCue(Cue::BackgroundLoop));
        state.push_status();
        tick::arm_session(&mut state, &mut self.scheduler, &self.tuning);

        log::info!(
            "Session started: {}s, {} lane(s), seed {}",
            state.stats.time_remaining,
            state.lanes.len(),
            seed
        );

        self.state = state;
        self.phase = SessionPhase::Playing;
        self.flush_events();
        Ok(())
    }

    /// Advance play time, firing every task that comes due
    pub fn advance(&mut self, dt_ms: u64) {
        if self.phase != SessionPhase::Playing {
            return;
        }
        let target = self.scheduler.now_ms().saturating_add(dt_ms);

        while let Some(task) = self.scheduler.pop_due(target) {
            tick::run_task(
                &mut self.state,
                &mut self.scheduler,
                &mut self.rng,
                &self.tuning,
                task,
            );
            self.flush_events();

            if !self.state.stats.is_playing {
                self.phase = SessionPhase::Ended;
                return;
            }
        }
        self.scheduler.settle(target);
    }

    /// Player clicked on a cup (or on nothing)
    pub fn click(&mut self, target: Option<CupId>) -> Option<ClickOutcome> {
        if self.phase != SessionPhase::Playing {
            return None;
        }
        let outcome = scoring::click(&mut self.state, &mut self.scheduler, &self.tuning, target);
        self.flush_events();
        outcome
    }

    /// Player clicked at a game-area position
    pub fn click_at(&mut self, point: Vec2) -> Option<ClickOutcome> {
        let target = self.cup_at(point);
        self.click(target)
    }

    /// Cup under a game-area position
    pub fn cup_at(&self, point: Vec2) -> Option<CupId> {
        self.state.layout.hit_test(&self.state.lanes, point)
    }

    pub fn pause(&mut self) -> bool {
        if self.phase != SessionPhase::Playing {
            return false;
        }
        self.phase = SessionPhase::Paused;
        log::info!("Paused at {} ms", self.scheduler.now_ms());
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.phase != SessionPhase::Paused {
            return false;
        }
        self.phase = SessionPhase::Playing;
        log::info!("Resumed at {} ms", self.scheduler.now_ms());
        true
    }

    /// End the session immediately
    pub fn end_now(&mut self) -> bool {
        if !matches!(self.phase, SessionPhase::Playing | SessionPhase::Paused) {
            return false;
        }
        tick::finish(&mut self.state, &mut self.scheduler);
        self.flush_events();
        self.phase = SessionPhase::Ended;
        true
    }

    // === Queries ===

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Play time of the current session
    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    pub fn is_playing(&self) -> bool {
        self.state.stats.is_playing
    }

    /// Frozen score once the session has ended
    pub fn final_score(&self) -> Option<i64> {
        (self.phase == SessionPhase::Ended).then_some(self.state.stats.score)
    }

    pub fn summary(&self) -> &SessionSummary {
        &self.state.summary
    }

    /// Deliver queued simulation events to the collaborators
    fn flush_events(&mut self) {
        let events = std::mem::take(&mut self.state.events);
        for event in events {
            match event {
                GameEvent::LanesCreated => self.renderer.lanes_created(&self.state.lanes),
                GameEvent::CupSpawned { id, .. } => {
                    if let Some(cup) = self.state.find_cup(id) {
                        self.renderer.cup_spawned(cup);
                    }
                }
                GameEvent::CupsMoved => self.renderer.cups_moved(&self.state.lanes),
                GameEvent::CupRemoved { id, reason, .. } => self.renderer.cup_removed(id, reason),
                GameEvent::Indicator { indicator, visible } => {
                    self.renderer.indicator(indicator, visible)
                }
                GameEvent::Feedback(feedback) => self.renderer.feedback(&feedback),
                GameEvent::PlayCue(cue) => self.audio.play(cue),
                GameEvent::StopCue(cue) => self.audio.stop(cue),
                GameEvent::Status(status) => self.status.status(status),
                GameEvent::SessionEnded {
                    final_score,
                    summary,
                } => self.renderer.session_ended(final_score, &summary),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{LaneType, TaskKind};

    fn settings(duration: i64, lanes: &[LaneType]) -> Settings {
        Settings {
            duration_secs: Some(duration),
            seed: Some(1234),
            ..Settings::with_lanes(lanes)
        }
    }

    #[test]
    fn test_start_requires_a_lane() {
        let mut game = Game::default();
        assert_eq!(game.start(&settings(90, &[])), Err(StartError::NoLanesSelected));
        assert_eq!(game.phase(), SessionPhase::NotStarted);
        assert!(!game.is_playing());
        assert!(game.state().lanes.is_empty());
        assert!(game.scheduler().is_idle());
    }

    #[test]
    fn test_start_builds_lanes_and_arms_tasks() {
        let mut game = Game::default();
        game.start(&settings(90, &[LaneType::Line2, LaneType::Line3])).unwrap();

        assert_eq!(game.phase(), SessionPhase::Playing);
        assert_eq!(game.state().lanes.len(), 2);
        assert_eq!(game.state().lanes[0].lane_type, LaneType::Line2);
        assert_eq!(game.state().stats.time_remaining, 90);
        for kind in [
            TaskKind::Frame,
            TaskKind::Countdown,
            TaskKind::Spawn,
            TaskKind::Fluctuation,
        ] {
            assert!(game.scheduler().is_scheduled(kind), "{kind:?} not armed");
        }
    }

    #[test]
    fn test_failed_restart_tears_down_previous_session() {
        let mut game = Game::default();
        game.start(&settings(90, &[LaneType::Line1])).unwrap();
        game.advance(3000);

        assert!(game.start(&settings(90, &[])).is_err());
        assert_eq!(game.phase(), SessionPhase::NotStarted);
        assert!(game.state().lanes.is_empty());
        assert!(game.scheduler().is_idle());
        assert_eq!(game.state().stats.score, 0);
    }

    #[test]
    fn test_pause_freezes_time() {
        let mut game = Game::default();
        game.start(&settings(90, &[LaneType::Line1])).unwrap();
        game.advance(2000);
        let cups = game.state().cup_count();

        assert!(game.pause());
        game.advance(30_000);
        assert_eq!(game.now_ms(), 2000);
        assert_eq!(game.state().stats.time_remaining, 88);
        assert_eq!(game.state().cup_count(), cups);
        assert!(game.click(game.state().lanes[0].cups.first().map(|c| c.id)).is_none());

        assert!(game.resume());
        game.advance(1000);
        assert_eq!(game.state().stats.time_remaining, 87);
    }

    #[test]
    fn test_end_now() {
        let mut game = Game::default();
        assert!(!game.end_now());

        game.start(&settings(90, &[LaneType::Line1])).unwrap();
        game.advance(1500);
        assert!(game.end_now());
        assert_eq!(game.phase(), SessionPhase::Ended);
        assert_eq!(game.final_score(), Some(game.state().stats.score));
        assert!(game.scheduler().is_idle());

        // Ended sessions don't move
        let now = game.now_ms();
        game.advance(10_000);
        assert_eq!(game.now_ms(), now);
        assert!(!game.end_now());
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut game = Game::default();
        game.start(&settings(20, &[LaneType::Line1])).unwrap();
        game.advance(25_000);
        assert_eq!(game.phase(), SessionPhase::Ended);

        game.start(&settings(30, &[LaneType::Line3])).unwrap();
        assert_eq!(game.phase(), SessionPhase::Playing);
        assert_eq!(game.now_ms(), 0);
        assert_eq!(game.state().stats.score, 0);
        assert_eq!(game.state().stats.combo, 0);
        assert_eq!(game.state().stats.time_remaining, 30);
        assert_eq!(game.state().cup_count(), 0);
        assert_eq!(game.state().modifiers.speed_multiplier, 1.0);
        assert!(!game.state().modifiers.bonus_active);
        assert_eq!(game.summary(), &SessionSummary::default());
    }

    #[test]
    fn test_click_at_hits_cup() {
        let mut game = Game::new(Tuning {
            defect_chance: 1.0,
            golden_chance: 0.0,
            ..Tuning::default()
        });
        game.start(&settings(90, &[LaneType::Line1])).unwrap();
        game.advance(1100);

        let cup = game.state().lanes[0].cups[0].clone();
        let lane = &game.state().lanes[0];
        let origin = game.state().layout.cup_origin(0, lane, &cup);
        let outcome = game.click_at(origin + Vec2::splat(10.0)).unwrap();

        assert_eq!(outcome.cup, cup.id);
        assert_eq!(outcome.amount, 100);
        assert_eq!(game.state().stats.combo, 1);

        // Empty space is ignored
        assert!(game.click_at(Vec2::new(-500.0, 10.0)).is_none());
    }

    #[test]
    fn test_same_seed_same_session() {
        let run = || {
            let mut game = Game::default();
            game.start(&settings(90, &[LaneType::Line1, LaneType::Line2])).unwrap();
            for _ in 0..600 {
                game.advance(16);
                let target = game
                    .state()
                    .lanes
                    .iter()
                    .flat_map(|l| l.cups.iter())
                    .find(|c| c.is_defective() && c.position < 50.0)
                    .map(|c| c.id);
                game.click(target);
            }
            (game.state().stats.score, game.state().summary)
        };
        assert_eq!(run(), run());
    }
}
