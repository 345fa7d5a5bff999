//! Enemy spawn cadence
//!
//! Enemies arrive on a timer whose period shrinks as the level rises. The
//! period comes from a level-indexed table with a fallback for levels past
//! its end. Changing level cancels the running timer and starts a new one.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{Color, GameState, Viewport};
use crate::consts::*;

/// Spawn intervals (milliseconds) per level
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnTable {
    /// `intervals_ms[0]` applies to level 1
    pub intervals_ms: Vec<u32>,
    /// Used for levels past the end of the table
    pub fallback_ms: u32,
}

impl Default for SpawnTable {
    fn default() -> Self {
        Self {
            intervals_ms: vec![2000, 1800, 1600, 1400, 1200, 1000, 850, 700],
            fallback_ms: 600,
        }
    }
}

impl SpawnTable {
    pub fn interval_ms(&self, level: u32) -> u32 {
        let index = level.saturating_sub(1) as usize;
        self.intervals_ms
            .get(index)
            .copied()
            .unwrap_or(self.fallback_ms)
    }
}

/// Parameters of a single spawned enemy
#[derive(Debug, Clone, PartialEq)]
pub struct EnemySpawn {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: Color,
}

impl EnemySpawn {
    /// Roll a new enemy just off one of the viewport edges, heading for the center
    pub fn roll(rng: &mut impl Rng, viewport: &Viewport) -> Self {
        let radius = rng.random_range(ENEMY_MIN_RADIUS..ENEMY_MAX_RADIUS);

        let pos = if rng.random_bool(0.5) {
            // Left or right edge
            let x = if rng.random_bool(0.5) {
                -radius
            } else {
                viewport.width + radius
            };
            Vec2::new(x, rng.random::<f32>() * viewport.height)
        } else {
            // Top or bottom edge
            let y = if rng.random_bool(0.5) {
                -radius
            } else {
                viewport.height + radius
            };
            Vec2::new(rng.random::<f32>() * viewport.width, y)
        };

        let vel = (viewport.center() - pos).normalize_or_zero() * ENEMY_SPEED;
        let color = Color::from_hue(rng.random_range(0.0..360.0));

        Self {
            pos,
            vel,
            radius,
            color,
        }
    }
}

/// Periodic enemy spawner
#[derive(Debug, Clone)]
pub struct SpawnScheduler {
    table: SpawnTable,
    rng: Pcg32,
    level: u32,
    interval_ms: f32,
    elapsed_ms: f32,
    active: bool,
}

impl SpawnScheduler {
    pub fn new(table: SpawnTable, seed: u64) -> Self {
        let interval_ms = table.interval_ms(1) as f32;
        Self {
            table,
            rng: Pcg32::seed_from_u64(seed),
            level: 1,
            interval_ms,
            elapsed_ms: 0.0,
            active: false,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn interval_ms(&self) -> f32 {
        self.interval_ms
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Cancel any running cadence and start a fresh one for `level`
    pub fn restart(&mut self, level: u32) {
        self.level = level;
        self.interval_ms = self.table.interval_ms(level) as f32;
        self.elapsed_ms = 0.0;
        self.active = true;
        log::debug!("Spawn cadence: level {} every {}ms", level, self.interval_ms);
    }

    /// Restart only when the level actually changed
    pub fn sync_level(&mut self, level: u32) {
        if level != self.level {
            self.restart(level);
        }
    }

    /// Stop spawning until the next `restart`
    pub fn cancel(&mut self) {
        self.active = false;
        self.elapsed_ms = 0.0;
    }

    /// Advance the timer; returns how many spawns came due
    pub fn poll(&mut self, dt_ms: f32) -> u32 {
        if !self.active || self.interval_ms <= 0.0 {
            return 0;
        }
        self.elapsed_ms += dt_ms;
        let mut due = 0;
        while self.elapsed_ms >= self.interval_ms {
            self.elapsed_ms -= self.interval_ms;
            due += 1;
        }
        due
    }

    /// Roll an enemy and add it to the state
    pub fn spawn_into(&mut self, state: &mut GameState, viewport: &Viewport) -> u32 {
        let spawn = EnemySpawn::roll(&mut self.rng, viewport);
        let id = state.push_enemy(spawn.pos, spawn.vel, spawn.radius, spawn.color);
        log::debug!(
            "Spawned enemy {} r={:.1} at ({:.0}, {:.0})",
            id,
            spawn.radius,
            spawn.pos.x,
            spawn.pos.y
        );
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport::new(800.0, 600.0)
    }

    #[test]
    fn test_interval_table_and_fallback() {
        let table = SpawnTable::default();
        assert_eq!(table.interval_ms(1), 2000);
        assert_eq!(table.interval_ms(8), 700);
        assert_eq!(table.interval_ms(9), 600);
        assert_eq!(table.interval_ms(0), 2000);
        // Higher levels never spawn slower
        for level in 1..12 {
            assert!(table.interval_ms(level + 1) <= table.interval_ms(level));
        }
    }

    #[test]
    fn test_spawn_is_off_screen_and_heads_to_center() {
        let mut rng = Pcg32::seed_from_u64(7);
        let vp = viewport();
        for _ in 0..200 {
            let spawn = EnemySpawn::roll(&mut rng, &vp);
            assert!(spawn.radius >= ENEMY_MIN_RADIUS && spawn.radius < ENEMY_MAX_RADIUS);

            let on_side = spawn.pos.x == -spawn.radius || spawn.pos.x == vp.width + spawn.radius;
            let on_cap = spawn.pos.y == -spawn.radius || spawn.pos.y == vp.height + spawn.radius;
            assert!(on_side || on_cap);

            assert!((spawn.vel.length() - ENEMY_SPEED).abs() < 1e-4);
            let to_center = (vp.center() - spawn.pos).normalize();
            assert!(spawn.vel.dot(to_center) > 0.999);
            assert!((0.0..360.0).contains(&spawn.color.hue));
        }
    }

    #[test]
    fn test_poll_counts_due_spawns() {
        let mut scheduler = SpawnScheduler::new(SpawnTable::default(), 1);
        assert_eq!(scheduler.poll(5000.0), 0, "inactive until restarted");

        scheduler.restart(1);
        assert_eq!(scheduler.poll(1999.0), 0);
        assert_eq!(scheduler.poll(1.0), 1);
        assert_eq!(scheduler.poll(4000.0), 2);
    }

    #[test]
    fn test_level_change_restarts_cadence() {
        let mut scheduler = SpawnScheduler::new(SpawnTable::default(), 1);
        scheduler.restart(1);
        assert_eq!(scheduler.poll(1500.0), 0);

        // Same level: timer keeps running
        scheduler.sync_level(1);
        assert_eq!(scheduler.poll(500.0), 1);

        scheduler.poll(1500.0);
        scheduler.sync_level(2);
        assert_eq!(scheduler.interval_ms(), 1800.0);
        // Old progress was discarded
        assert_eq!(scheduler.poll(1700.0), 0);
        assert_eq!(scheduler.poll(100.0), 1);
    }

    #[test]
    fn test_cancel_stops_spawning() {
        let mut scheduler = SpawnScheduler::new(SpawnTable::default(), 1);
        scheduler.restart(3);
        scheduler.cancel();
        assert!(!scheduler.is_active());
        assert_eq!(scheduler.poll(60_000.0), 0);
    }

    #[test]
    fn test_same_seed_same_enemies() {
        let vp = viewport();
        let mut a = SpawnScheduler::new(SpawnTable::default(), 42);
        let mut b = SpawnScheduler::new(SpawnTable::default(), 42);
        let mut sa = GameState::new(&vp);
        let mut sb = GameState::new(&vp);
        for _ in 0..10 {
            a.spawn_into(&mut sa, &vp);
            b.spawn_into(&mut sb, &vp);
        }
        for (ea, eb) in sa.enemies.iter().zip(&sb.enemies) {
            assert_eq!(ea.pos, eb.pos);
            assert_eq!(ea.radius, eb.radius);
        }
    }
}
