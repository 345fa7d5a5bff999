//! Face Blaster - a face-controlled arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, scoring, spawning)
//! - `signal`: Landmark conditioning (calibrated aim + mouth-open fire intent)
//! - `session`: Session lifecycle, fire debouncing and cadence scheduling
//! - `platform`: Browser boundary (capture callbacks, LocalStorage)
//! - `settings`: Externally tunable configuration

pub mod platform;
pub mod session;
pub mod settings;
pub mod signal;
pub mod sim;

pub use session::{EndReason, SessionController, SessionError, SessionPhase};
pub use settings::{Settings, SettingsError};
pub use signal::{AimSignal, FaceLandmarks, SignalConditioner};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (ticks per second); entity velocities are in units/tick
    pub const TICK_RATE: f32 = 60.0;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / TICK_RATE;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest wall-clock gap a single frame may account for (seconds)
    pub const MAX_FRAME_DELTA: f32 = 0.1;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 20.0;
    /// Hit box shrink so grazes don't end the run
    pub const PLAYER_COLLISION_MARGIN: f32 = 5.0;

    /// Projectile defaults
    pub const PROJECTILE_RADIUS: f32 = 5.0;
    pub const PROJECTILE_SPEED: f32 = 6.0;

    /// Enemy defaults
    pub const ENEMY_MIN_RADIUS: f32 = 10.0;
    pub const ENEMY_MAX_RADIUS: f32 = 30.0;
    pub const ENEMY_SPEED: f32 = 1.0;
    /// Enemies above this radius survive a hit and shrink
    pub const ENEMY_SURVIVAL_RADIUS: f32 = 15.0;
    pub const ENEMY_HIT_SHRINK: f32 = 8.0;

    /// Scoring
    pub const SCORE_HIT: u64 = 10;
    pub const SCORE_KILL: u64 = 20;
    pub const SHOT_COST: u64 = 1;
    pub const POINTS_PER_LEVEL: u64 = 500;
    pub const MAX_LEVEL: u32 = 9;

    /// Particles
    pub const PARTICLE_DAMPING: f32 = 0.99;
    pub const PARTICLE_FADE: f32 = 0.01;
    pub const PARTICLES_PER_RADIUS: f32 = 2.0;
    pub const PARTICLE_MAX_SPEED: f32 = 3.0;
    pub const PARTICLE_MAX_SIZE: f32 = 2.0;
}

/// Level reached with the given score: one level per 500 points, capped at 9
#[inline]
pub fn level_for_score(score: u64) -> u32 {
    let level = score / consts::POINTS_PER_LEVEL + 1;
    level.min(consts::MAX_LEVEL as u64) as u32
}

/// Clamp both axes to [0, 1]
#[inline]
pub fn clamp_unit(v: Vec2) -> Vec2 {
    v.clamp(Vec2::ZERO, Vec2::ONE)
}

/// Cheap deterministic hash to [0, 1) (for cosmetic variation only)
#[inline]
pub fn hash_unit(seed: u32) -> f32 {
    let mut h = seed.wrapping_mul(2654435761);
    h ^= h >> 16;
    h = h.wrapping_mul(0x7feb352d);
    h ^= h >> 15;
    (h % 10_000) as f32 / 10_000.0
}
