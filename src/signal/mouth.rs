//! Mouth-open fire intent
//!
//! Lip distance is compared against a per-session baseline: the smallest
//! distance seen in the first full window of samples (the closed mouth).
//! Until that baseline exists an absolute threshold is used instead.

use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouthConfig {
    /// Samples needed before a baseline is taken
    pub window: usize,
    /// Open when distance exceeds `baseline × multiplier`
    pub multiplier: f32,
    /// Open threshold used before calibration
    pub fallback_threshold: f32,
}

impl Default for MouthConfig {
    fn default() -> Self {
        Self {
            window: 10,
            multiplier: 2.2,
            fallback_threshold: 0.04,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MouthDetector {
    config: MouthConfig,
    history: VecDeque<f32>,
    baseline: Option<f32>,
}

impl MouthDetector {
    pub fn new(config: MouthConfig) -> Self {
        Self {
            history: VecDeque::with_capacity(config.window),
            config,
            baseline: None,
        }
    }

    pub fn baseline(&self) -> Option<f32> {
        self.baseline
    }

    pub fn samples(&self) -> usize {
        self.history.len()
    }

    /// Distance above which the mouth counts as open
    pub fn threshold(&self) -> f32 {
        match self.baseline {
            Some(baseline) => baseline * self.config.multiplier,
            None => self.config.fallback_threshold,
        }
    }

    /// Record one lip distance and report whether the mouth is open
    pub fn update(&mut self, distance: f32) -> bool {
        if self.history.len() == self.config.window {
            self.history.pop_front();
        }
        self.history.push_back(distance);

        if self.baseline.is_none() && self.history.len() >= self.config.window {
            let closed = self.history.iter().copied().fold(f32::INFINITY, f32::min);
            log::info!(
                "Mouth baseline calibrated: {:.4} (fire above {:.4})",
                closed,
                closed * self.config.multiplier
            );
            self.baseline = Some(closed);
        }

        distance > self.threshold()
    }

    /// Face lost: drop calibration so it is rebuilt on reacquisition
    pub fn clear(&mut self) {
        if self.baseline.is_some() {
            log::debug!("Mouth baseline cleared");
        }
        self.history.clear();
        self.baseline = None;
    }
}

impl Default for MouthDetector {
    fn default() -> Self {
        Self::new(MouthConfig::default())
    }
}
