//! Signal conditioning
//!
//! Turns raw per-frame face landmarks into a calibrated aim position and a raw
//! (undebounced) fire intent. Knows nothing about the simulation.

pub mod aim;
pub mod landmarks;
pub mod mouth;

pub use aim::{AimTracker, MAX_SENSITIVITY, MIN_SENSITIVITY};
pub use landmarks::FaceLandmarks;
pub use mouth::{MouthConfig, MouthDetector};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// Conditioned output for one sampled frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AimSignal {
    /// Normalized aim, both axes in [0, 1]
    pub aim: Vec2,
    pub detected: bool,
    pub fire_intent: bool,
}

impl Default for AimSignal {
    fn default() -> Self {
        Self {
            aim: Vec2::splat(0.5),
            detected: false,
            fire_intent: false,
        }
    }
}

/// Aim tracker and mouth detector fed from the same frames
#[derive(Debug, Clone)]
pub struct SignalConditioner {
    aim: AimTracker,
    mouth: MouthDetector,
}

impl SignalConditioner {
    pub fn new(settings: &Settings) -> Self {
        Self {
            aim: AimTracker::new(settings.sensitivity, settings.smoothing),
            mouth: MouthDetector::new(MouthConfig {
                window: settings.mouth_window,
                multiplier: settings.mouth_multiplier,
                fallback_threshold: settings.mouth_fallback_threshold,
            }),
        }
    }

    pub fn aim_tracker(&self) -> &AimTracker {
        &self.aim
    }

    pub fn mouth_detector(&self) -> &MouthDetector {
        &self.mouth
    }

    pub fn set_sensitivity(&mut self, sensitivity: u8) {
        self.aim.set_sensitivity(sensitivity);
    }

    /// Condition one frame. `None` (no face) is an ordinary input.
    pub fn condition(&mut self, frame: Option<&FaceLandmarks>) -> AimSignal {
        let sample = frame.and_then(|face| Some((face.aim_reference()?, face.mouth_opening()?)));

        let Some((reference, opening)) = sample else {
            if let Some(face) = frame {
                log::debug!("Face with {} landmarks is incomplete, ignoring", face.len());
            }
            self.mouth.clear();
            return AimSignal {
                aim: self.aim.last_aim(),
                detected: false,
                fire_intent: false,
            };
        };

        AimSignal {
            aim: self.aim.update(reference),
            detected: true,
            fire_intent: self.mouth.update(opening),
        }
    }

    /// Re-anchor the aim on the next sample (mouth calibration is kept)
    pub fn recalibrate(&mut self) {
        self.aim.recalibrate();
    }

    /// Session-scoped reset of all calibration and smoothing state
    pub fn reset(&mut self) {
        self.aim.reset();
        self.mouth.clear();
    }
}
