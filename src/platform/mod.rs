//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Logger setup
//! - Run seeds (wall clock)
//! - Capture/render bridge to JS (`web`, wasm32 only)

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Seed derived from the wall clock, for runs without a configured seed
#[cfg(not(target_arch = "wasm32"))]
pub fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(1)
}

#[cfg(target_arch = "wasm32")]
pub fn clock_seed() -> u64 {
    js_sys::Date::now() as u64
}

/// Replace an unset (zero) seed with a clock-derived one
pub fn resolve_seed(configured: u64) -> u64 {
    if configured != 0 { configured } else { clock_seed() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_seed_is_kept() {
        assert_eq!(resolve_seed(77), 77);
        assert_ne!(resolve_seed(0), 0);
    }
}
