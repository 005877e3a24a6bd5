//! Lane geometry in game-area pixels
//!
//! Lanes are stacked top to bottom in selection order. A cup's `position`
//! is the CSS-style left offset as a percentage of its lane's width.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Cup, CupId, Lane};
use crate::consts::{CUP_SIZE_PX, DEFAULT_LANE_HEIGHT_PX, FEEDBACK_OFFSET_PX};
use crate::percent_to_px;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaneLayout {
    pub lane_height_px: f32,
    pub cup_size_px: f32,
}

impl Default for LaneLayout {
    fn default() -> Self {
        Self {
            lane_height_px: DEFAULT_LANE_HEIGHT_PX,
            cup_size_px: CUP_SIZE_PX,
        }
    }
}

impl LaneLayout {
    /// Top edge of a lane
    #[inline]
    pub fn lane_top(&self, lane_index: usize) -> f32 {
        lane_index as f32 * self.lane_height_px
    }

    /// Top-left corner of a cup, vertically centred on its lane
    pub fn cup_origin(&self, lane_index: usize, lane: &Lane, cup: &Cup) -> Vec2 {
        Vec2::new(
            percent_to_px(cup.position, lane.width_px),
            self.lane_top(lane_index) + (self.lane_height_px - self.cup_size_px) / 2.0,
        )
    }

    /// Where a feedback popup for this cup appears (centred, just above it)
    pub fn feedback_anchor(&self, lane_index: usize, lane: &Lane, cup: &Cup) -> Vec2 {
        let origin = self.cup_origin(lane_index, lane, cup);
        Vec2::new(origin.x + self.cup_size_px / 2.0, origin.y - FEEDBACK_OFFSET_PX)
    }

    /// Cup under a pointer position, if any
    ///
    /// Later cups are drawn on top, so overlapping hits resolve to the most
    /// recently spawned cup.
    pub fn hit_test(&self, lanes: &[Lane], point: Vec2) -> Option<CupId> {
        if point.y < 0.0 || self.lane_height_px <= 0.0 {
            return None;
        }
        let lane_index = (point.y / self.lane_height_px).floor() as usize;
        let lane = lanes.get(lane_index)?;

        lane.cups
            .iter()
            .rev()
            .find(|cup| {
                let origin = self.cup_origin(lane_index, lane, cup);
                let rel = point - origin;
                rel.x >= 0.0
                    && rel.x <= self.cup_size_px
                    && rel.y >= 0.0
                    && rel.y <= self.cup_size_px
            })
            .map(|cup| cup.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{CupKind, LaneType};

    fn lane_with(id: u32, positions: &[(u32, f32)]) -> Lane {
        let mut lane = Lane::new(id, LaneType::Line1, 800.0);
        for &(cup_id, position) in positions {
            lane.cups.push(Cup {
                id: cup_id,
                lane: id,
                kind: CupKind::Glass,
                defect: None,
                golden: false,
                position,
            });
        }
        lane
    }

    #[test]
    fn test_cup_origin_centred_in_lane() {
        let layout = LaneLayout::default();
        let lane = lane_with(1, &[(7, 50.0)]);
        let origin = layout.cup_origin(1, &lane, &lane.cups[0]);
        assert!((origin.x - 400.0).abs() < 0.001);
        assert!((origin.y - (150.0 + 25.0)).abs() < 0.001);
    }

    #[test]
    fn test_feedback_anchor_above_cup() {
        let layout = LaneLayout::default();
        let lane = lane_with(0, &[(7, 25.0)]);
        let anchor = layout.feedback_anchor(0, &lane, &lane.cups[0]);
        assert!((anchor.x - 250.0).abs() < 0.001);
        assert!((anchor.y - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_hit_test_picks_lane_and_cup() {
        let layout = LaneLayout::default();
        let lanes = vec![
            lane_with(0, &[(1, 10.0)]),
            lane_with(1, &[(2, 10.0), (3, 50.0)]),
        ];

        // Lane 1 spans y 150..300, cup 3 spans x 400..500
        assert_eq!(layout.hit_test(&lanes, Vec2::new(450.0, 220.0)), Some(3));
        assert_eq!(layout.hit_test(&lanes, Vec2::new(100.0, 220.0)), Some(2));
        assert_eq!(layout.hit_test(&lanes, Vec2::new(100.0, 60.0)), Some(1));
        // Gap between cups
        assert_eq!(layout.hit_test(&lanes, Vec2::new(300.0, 220.0)), None);
        // Below the last lane
        assert_eq!(layout.hit_test(&lanes, Vec2::new(100.0, 500.0)), None);
    }

    #[test]
    fn test_hit_test_prefers_newest_overlap() {
        let layout = LaneLayout::default();
        let lanes = vec![lane_with(0, &[(1, 10.0), (2, 15.0)])];
        assert_eq!(layout.hit_test(&lanes, Vec2::new(150.0, 75.0)), Some(2));
    }
}
