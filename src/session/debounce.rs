//! Fire debouncing
//!
//! A single noisy open-mouth frame must not fire. Only an unbroken run of
//! `threshold` detected, mouth-open ticks produces one shot.

#[derive(Debug, Clone)]
pub struct FireDebouncer {
    threshold: u32,
    streak: u32,
}

impl FireDebouncer {
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold: threshold.max(1),
            streak: 0,
        }
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    /// Feed one tick; true when this tick should fire
    pub fn update(&mut self, detected: bool, fire_intent: bool) -> bool {
        if !(detected && fire_intent) {
            self.streak = 0;
            return false;
        }
        self.streak += 1;
        if self.streak >= self.threshold {
            self.streak = 0;
            return true;
        }
        false
    }

    pub fn reset(&mut self) {
        self.streak = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_per_streak() {
        let mut debouncer = FireDebouncer::new(6);
        let shots: Vec<bool> = (0..12).map(|_| debouncer.update(true, true)).collect();
        let fired: Vec<usize> = shots
            .iter()
            .enumerate()
            .filter_map(|(i, &s)| s.then_some(i))
            .collect();
        assert_eq!(fired, vec![5, 11]);
    }

    #[test]
    fn test_gap_resets_streak() {
        let mut debouncer = FireDebouncer::new(6);
        for _ in 0..5 {
            assert!(!debouncer.update(true, true));
        }
        assert!(!debouncer.update(true, false));
        assert_eq!(debouncer.streak(), 0);
        for _ in 0..5 {
            assert!(!debouncer.update(true, true));
        }
        assert!(debouncer.update(true, true));
    }

    #[test]
    fn test_lost_detection_resets_streak() {
        let mut debouncer = FireDebouncer::new(3);
        debouncer.update(true, true);
        debouncer.update(true, true);
        assert!(!debouncer.update(false, true));
        assert_eq!(debouncer.streak(), 0);
    }
}
