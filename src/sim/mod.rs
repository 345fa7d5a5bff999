//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (velocities are per tick)
//! - Seeded RNG only (spawner); cosmetic variation is hash-based
//! - Stable iteration order (by entity ID)
//! - No rendering, capture or platform dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{circles_overlap, enemy_reaches_player};
pub use spawn::{EnemySpawn, SpawnScheduler, SpawnTable};
pub use state::{Color, Enemy, GameEvent, GameState, Particle, Player, Projectile, Viewport};
pub use tick::{StepOutcome, TickInput, step};
