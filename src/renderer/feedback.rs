//! Feedback popup lifetimes
//!
//! Popups float upward and fade over their lifetime, then disappear.

use glam::Vec2;

use crate::sim::Feedback;

/// Upward drift over a popup's full lifetime (pixels)
const RISE_PX: f32 = 40.0;

/// A live popup
#[derive(Debug, Clone, Copy)]
pub struct Popup {
    pub feedback: Feedback,
    pub age_ms: u64,
}

impl Popup {
    /// 0 when spawned, 1 when it expires
    pub fn progress(&self) -> f32 {
        if self.feedback.lifetime_ms == 0 {
            return 1.0;
        }
        (self.age_ms as f32 / self.feedback.lifetime_ms as f32).min(1.0)
    }

    /// Current draw position
    pub fn position(&self) -> Vec2 {
        self.feedback.screen_pos - Vec2::new(0.0, RISE_PX * self.progress())
    }

    /// Fade-out alpha
    pub fn alpha(&self) -> f32 {
        1.0 - self.progress()
    }
}

/// Popups currently on screen
#[derive(Debug, Clone, Default)]
pub struct FeedbackLayer {
    popups: Vec<Popup>,
}

impl FeedbackLayer {
    pub fn push(&mut self, feedback: Feedback) {
        self.popups.push(Popup {
            feedback,
            age_ms: 0,
        });
    }

    /// Age every popup, dropping expired ones
    pub fn age(&mut self, dt_ms: u64) {
        for popup in &mut self.popups {
            popup.age_ms += dt_ms;
        }
        self.popups.retain(|p| p.age_ms < p.feedback.lifetime_ms);
    }

    pub fn clear(&mut self) {
        self.popups.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Popup> {
        self.popups.iter()
    }

    pub fn len(&self) -> usize {
        self.popups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.popups.is_empty()
    }
}
