//! Cup Patrol entry point
//!
//! Native builds run a headless session driven by a simple autoplay bot:
//! renderer, audio and HUD are log sinks, play time is stepped in frames.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::Path;

    use cup_patrol::Settings;

    env_logger::init();
    log::info!("Cup Patrol (native) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load_or_default(Path::new(&path)),
        None => Settings::default(),
    };
    if let Ok(json) = settings.to_json() {
        log::debug!("Settings: {json}");
    }

    match autoplay::run(&settings) {
        Ok(summary) => println!("{summary}"),
        Err(e) => {
            log::error!("Could not start: {e}");
            std::process::exit(1);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser shell drives `Game` directly; nothing to do here
}

#[cfg(not(target_arch = "wasm32"))]
mod autoplay {
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use cup_patrol::audio::LogAudio;
    use cup_patrol::consts::FRAME_MS;
    use cup_patrol::hud::LogStatus;
    use cup_patrol::renderer::LogRenderer;
    use cup_patrol::sim::{Cup, CupId};
    use cup_patrol::{Game, Settings, StartError, Tuning};

    /// Cups are inspected once they are this far into the lane (percent)
    const REACTION_POSITION: f32 = 60.0;
    /// Chance per frame that the bot acts at all
    const ATTENTION: f64 = 0.25;
    /// Chance that an action lands on a clean cup by mistake
    const SLIP: f64 = 0.05;

    /// Play one session to the end and report it
    pub fn run(settings: &Settings) -> Result<String, StartError> {
        let mut game = Game::new(Tuning::default())
            .with_renderer(LogRenderer::new())
            .with_audio(LogAudio::from_settings(settings))
            .with_status(LogStatus::default());
        game.start(settings)?;

        let mut bot = Pcg32::seed_from_u64(game.state().rng_state.seed ^ 0x5eed);
        while game.is_playing() {
            game.advance(FRAME_MS);
            if bot.random::<f64>() < ATTENTION {
                let target = pick_target(&game, &mut bot);
                game.click(target);
            }
        }

        let summary = game.summary();
        let score = game.final_score().unwrap_or(game.state().stats.score);
        log::info!("Autoplay finished with {score} points");
        Ok(format!(
            "Final score: {score}\n\
             cups: {} | hits: {} | golden: {} | mistakes: {} | misses: {} \
             | best combo: {}x | speed-ups: {}",
            summary.spawned,
            summary.hits,
            summary.golden_hits,
            summary.mistakes,
            summary.misses,
            summary.best_combo,
            summary.speed_ups,
        ))
    }

    fn pick_target(game: &Game, bot: &mut Pcg32) -> Option<CupId> {
        let mut ripe = game
            .state()
            .lanes
            .iter()
            .flat_map(|lane| lane.cups.iter())
            .filter(|cup| cup.position <= REACTION_POSITION);

        if bot.random::<f64>() < SLIP {
            return ripe.find(|cup| !cup.is_defective() && !cup.golden).map(|c| c.id);
        }
        ripe.filter(|cup| wanted(cup))
            .min_by(|a, b| a.position.total_cmp(&b.position))
            .map(|c| c.id)
    }

    fn wanted(cup: &Cup) -> bool {
        cup.golden || cup.is_defective()
    }
}
