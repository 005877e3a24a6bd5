//! Audio cue sink
//!
//! The simulation only names cues; playback belongs to the frontend. Cues
//! are fire-and-forget, and replaying one restarts it from the beginning.

pub use crate::sim::Cue;

use crate::settings::Settings;

impl Cue {
    /// Asset the frontend plays for this cue
    pub fn asset(&self) -> &'static str {
        match self {
            Cue::CorrectHit => "sfx/correct.mp3",
            Cue::Mistake => "sfx/mistake.mp3",
            Cue::Miss => "sfx/miss.mp3",
            Cue::GoldenHit => "sfx/golden.mp3",
            Cue::SpeedUpStart => "sfx/speedup.mp3",
            Cue::SpeedUpEnd => "sfx/speeddown.mp3",
            Cue::BackgroundLoop => "sfx/bg_music.mp3",
            Cue::EndingSoon => "sfx/game_ending_soon.mp3",
        }
    }

    /// Music loops and uses the music volume; everything else is an effect
    pub fn is_music(&self) -> bool {
        matches!(self, Cue::BackgroundLoop)
    }
}

/// Consumer of audio cues
pub trait AudioSink {
    /// Start a cue from the beginning (restarting it if already playing)
    fn play(&mut self, cue: Cue);

    /// Stop a cue and rewind it
    fn stop(&mut self, _cue: Cue) {}
}

impl AudioSink for () {
    fn play(&mut self, _cue: Cue) {}
}

/// Audio sink that logs cues instead of playing them (headless builds)
#[derive(Debug, Clone)]
pub struct LogAudio {
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    music_playing: bool,
}

impl Default for LogAudio {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl LogAudio {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            master_volume: settings.master_volume.clamp(0.0, 1.0),
            sfx_volume: settings.sfx_volume.clamp(0.0, 1.0),
            music_volume: settings.music_volume.clamp(0.0, 1.0),
            muted: settings.muted,
            music_playing: false,
        }
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_music_playing(&self) -> bool {
        self.music_playing
    }

    /// Get effective volume for a cue
    pub fn effective_volume(&self, cue: Cue) -> f32 {
        if self.muted {
            return 0.0;
        }
        let channel = if cue.is_music() {
            self.music_volume
        } else {
            self.sfx_volume
        };
        self.master_volume * channel
    }
}

impl AudioSink for LogAudio {
    fn play(&mut self, cue: Cue) {
        if cue.is_music() {
            self.music_playing = true;
        }
        let vol = self.effective_volume(cue);
        if vol <= 0.0 {
            return;
        }
        log::debug!("play {} (vol {:.2})", cue.asset(), vol);
    }

    fn stop(&mut self, cue: Cue) {
        if cue.is_music() {
            self.music_playing = false;
        }
        log::debug!("stop {}", cue.asset());
    }
}
