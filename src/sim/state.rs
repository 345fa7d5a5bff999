//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives here. Collections are kept in
//! ascending id order so iteration (and therefore collision resolution) is
//! deterministic.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::level_for_score;

/// Presentation color tag (HSL). The simulation never inspects it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
}

impl Color {
    pub const WHITE: Color = Color {
        hue: 0.0,
        saturation: 0.0,
        lightness: 100.0,
    };

    /// Fully saturated color at the given hue (degrees)
    pub fn from_hue(hue: f32) -> Self {
        Self {
            hue,
            saturation: 50.0,
            lightness: 50.0,
        }
    }
}

/// Visible play area in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Strict interior test: points on the border count as outside
    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x > 0.0 && pos.x < self.width && pos.y > 0.0 && pos.y < self.height
    }

    /// Map a normalized [0,1] coordinate into viewport pixels
    pub fn to_pixels(&self, normalized: Vec2) -> Vec2 {
        Vec2::new(normalized.x * self.width, normalized.y * self.height)
    }
}

/// The player's turret. Never moves on its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    pub color: Color,
}

impl Player {
    pub fn centered(viewport: &Viewport) -> Self {
        Self {
            pos: viewport.center(),
            radius: PLAYER_RADIUS,
            color: Color::WHITE,
        }
    }
}

/// A shot fired by the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: Color,
}

impl Projectile {
    /// Projectile leaving `origin` toward `target` at the fixed shot speed.
    /// A target on top of the origin fires straight up.
    pub fn aimed(id: u32, origin: Vec2, target: Vec2) -> Self {
        let dir = (target - origin).try_normalize().unwrap_or(Vec2::NEG_Y);
        Self {
            id,
            pos: origin,
            vel: dir * PROJECTILE_SPEED,
            radius: PROJECTILE_RADIUS,
            color: Color::WHITE,
        }
    }
}

/// An incoming enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: Color,
}

/// A particle for hit effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: Color,
    /// Opacity, 0-1, decreases every tick
    pub alpha: f32,
    pub size: f32,
}

/// Notifications produced by a tick, for UI/render collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Fired { projectile_id: u32 },
    EnemyHit { enemy_id: u32, radius: f32 },
    EnemyDestroyed { enemy_id: u32 },
    LevelChanged { level: u32 },
    GameOver { score: u64 },
}

/// Complete game state for one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Set while the owning session is running
    pub running: bool,
    pub score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    /// Active projectiles (sorted by id)
    pub projectiles: Vec<Projectile>,
    /// Active enemies (sorted by id)
    pub enemies: Vec<Enemy>,
    /// Visual particles (insertion order)
    pub particles: Vec<Particle>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Fresh state with the player centered in the viewport
    pub fn new(viewport: &Viewport) -> Self {
        Self {
            running: false,
            score: 0,
            time_ticks: 0,
            player: Player::centered(viewport),
            projectiles: Vec::new(),
            enemies: Vec::new(),
            particles: Vec::new(),
            next_id: 1,
        }
    }

    /// Current level, derived from score
    pub fn level(&self) -> u32 {
        level_for_score(self.score)
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add an enemy built by the spawner
    pub fn push_enemy(&mut self, pos: Vec2, vel: Vec2, radius: f32, color: Color) -> u32 {
        let id = self.next_entity_id();
        self.enemies.push(Enemy {
            id,
            pos,
            vel,
            radius,
            color,
        });
        id
    }

    /// Copy of the scalar state carrying freshly built entity collections
    pub(crate) fn rebuilt(
        &self,
        projectiles: Vec<Projectile>,
        enemies: Vec<Enemy>,
        particles: Vec<Particle>,
    ) -> Self {
        Self {
            running: self.running,
            score: self.score,
            time_ticks: self.time_ticks,
            player: self.player.clone(),
            projectiles,
            enemies,
            particles,
            next_id: self.next_id,
        }
    }

    /// Re-center the player after a viewport change
    pub fn recenter(&mut self, viewport: &Viewport) {
        self.player.pos = viewport.center();
    }

}
