//! Head-position aim tracking
//!
//! The first valid sample becomes the anchor. Later samples are turned into an
//! offset from it, amplified by the sensitivity, exponentially smoothed, and
//! mirrored horizontally for a front-facing camera.

use glam::Vec2;

use crate::clamp_unit;

/// Lowest/highest accepted sensitivity multiplier
pub const MIN_SENSITIVITY: u8 = 1;
pub const MAX_SENSITIVITY: u8 = 8;

#[derive(Debug, Clone)]
pub struct AimTracker {
    sensitivity: u8,
    /// Weight of the newest sample in the moving average
    smoothing: f32,
    anchor: Option<Vec2>,
    smoothed: Vec2,
    last_aim: Vec2,
}

impl AimTracker {
    pub fn new(sensitivity: u8, smoothing: f32) -> Self {
        Self {
            sensitivity: sensitivity.clamp(MIN_SENSITIVITY, MAX_SENSITIVITY),
            smoothing: smoothing.clamp(0.0, 1.0),
            anchor: None,
            smoothed: Vec2::ZERO,
            last_aim: Vec2::splat(0.5),
        }
    }

    pub fn sensitivity(&self) -> u8 {
        self.sensitivity
    }

    pub fn set_sensitivity(&mut self, sensitivity: u8) {
        self.sensitivity = sensitivity.clamp(MIN_SENSITIVITY, MAX_SENSITIVITY);
    }

    pub fn anchor(&self) -> Option<Vec2> {
        self.anchor
    }

    /// Last emitted aim (held while the face is lost)
    pub fn last_aim(&self) -> Vec2 {
        self.last_aim
    }

    /// Feed one reference sample; returns the mirrored, clamped aim
    pub fn update(&mut self, sample: Vec2) -> Vec2 {
        let anchor = *self.anchor.get_or_insert_with(|| {
            log::info!("Aim anchored at ({:.3}, {:.3})", sample.x, sample.y);
            sample
        });

        let target = (sample - anchor) * self.sensitivity as f32;
        self.smoothed = self.smoothed * (1.0 - self.smoothing) + target * self.smoothing;

        let raw = anchor + self.smoothed;
        self.last_aim = clamp_unit(Vec2::new(1.0 - raw.x, raw.y));
        self.last_aim
    }

    /// Forget the anchor and smoothing; the next sample re-anchors
    pub fn recalibrate(&mut self) {
        self.anchor = None;
        self.smoothed = Vec2::ZERO;
    }

    /// Session reset: recalibrate and re-center the held aim
    pub fn reset(&mut self) {
        self.recalibrate();
        self.last_aim = Vec2::splat(0.5);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).abs().max_element() < 1e-5
    }

    #[test]
    fn test_first_sample_anchors() {
        let mut tracker = AimTracker::new(4, 0.7);
        let aim = tracker.update(Vec2::new(0.4, 0.3));
        assert_eq!(tracker.anchor(), Some(Vec2::new(0.4, 0.3)));
        // Mirrored anchor, no offset yet
        assert!(approx(aim, Vec2::new(0.6, 0.3)));
    }

    #[test]
    fn test_smoothed_offset_is_mirrored() {
        let mut tracker = AimTracker::new(4, 0.7);
        tracker.update(Vec2::new(0.5, 0.5));
        let aim = tracker.update(Vec2::new(0.6, 0.5));
        // un-mirrored: 0.5 + 0.4 * 0.7 = 0.78
        assert!(approx(aim, Vec2::new(0.22, 0.5)));
    }

    #[test]
    fn test_smoothing_converges() {
        let mut tracker = AimTracker::new(2, 0.7);
        tracker.update(Vec2::new(0.5, 0.5));
        let mut aim = Vec2::ZERO;
        for _ in 0..30 {
            aim = tracker.update(Vec2::new(0.5, 0.6));
        }
        assert!(approx(aim, Vec2::new(0.5, 0.7)));
    }

    #[test]
    fn test_large_offsets_clamp() {
        let mut tracker = AimTracker::new(8, 1.0);
        tracker.update(Vec2::new(0.5, 0.5));
        let aim = tracker.update(Vec2::new(0.1, 0.9));
        assert_eq!(aim, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_recalibrate_reanchors() {
        let mut tracker = AimTracker::new(4, 0.7);
        tracker.update(Vec2::new(0.5, 0.5));
        tracker.update(Vec2::new(0.6, 0.5));
        tracker.recalibrate();
        assert_eq!(tracker.anchor(), None);
        let aim = tracker.update(Vec2::new(0.2, 0.2));
        assert!(approx(aim, Vec2::new(0.8, 0.2)));
    }

    #[test]
    fn test_sensitivity_is_clamped() {
        let mut tracker = AimTracker::new(0, 0.7);
        assert_eq!(tracker.sensitivity(), MIN_SENSITIVITY);
        tracker.set_sensitivity(12);
        assert_eq!(tracker.sensitivity(), MAX_SENSITIVITY);
    }

    proptest! {
        #[test]
        fn prop_aim_stays_in_unit_square(
            samples in proptest::collection::vec((-1.0f32..2.0, -1.0f32..2.0), 1..40),
            sensitivity in 1u8..=8,
        ) {
            let mut tracker = AimTracker::new(sensitivity, 0.7);
            for (x, y) in samples {
                let aim = tracker.update(Vec2::new(x, y));
                prop_assert!((0.0..=1.0).contains(&aim.x));
                prop_assert!((0.0..=1.0).contains(&aim.y));
            }
        }
    }
}
