//! Fixed timestep simulation tick
//!
//! `step` is a pure transition: it reads the previous state and builds the
//! next one from fresh collections. Order of the passes is fixed:
//! particles, projectiles, enemies (movement + collisions), level, firing.

use glam::Vec2;

use super::collision::{enemy_reaches_player, first_overlapping};
use super::state::{Color, Enemy, GameEvent, GameState, Particle, Projectile, Viewport};
use crate::consts::*;
use crate::hash_unit;

/// Input for a single tick, already conditioned and debounced
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Aim target in viewport pixels
    pub target: Vec2,
    /// Fire one projectile this tick
    pub fire: bool,
}

/// How a tick ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Continue,
    /// An enemy reached the player; the returned state is the pre-tick state
    GameOver,
}

/// Advance the game state by one tick.
///
/// Events produced during the tick are appended to `events`. On game over the
/// tick's other events are discarded along with its mutations.
pub fn step(
    state: &GameState,
    input: &TickInput,
    viewport: &Viewport,
    events: &mut Vec<GameEvent>,
) -> (GameState, StepOutcome) {
    let events_mark = events.len();
    let level_before = state.level();

    // Particles fade and drift; position never removes them
    let mut particles: Vec<Particle> = state
        .particles
        .iter()
        .filter_map(|p| {
            let vel = p.vel * PARTICLE_DAMPING;
            let alpha = p.alpha - PARTICLE_FADE;
            (alpha > 0.0).then(|| Particle {
                pos: p.pos + vel,
                vel,
                alpha,
                ..p.clone()
            })
        })
        .collect();

    let mut projectiles: Vec<Projectile> = state
        .projectiles
        .iter()
        .map(|p| Projectile {
            pos: p.pos + p.vel,
            ..p.clone()
        })
        .filter(|p| viewport.contains(p.pos))
        .collect();

    let player = &state.player;
    let mut score = state.score;
    let mut enemies: Vec<Enemy> = Vec::with_capacity(state.enemies.len());

    for enemy in &state.enemies {
        let pos = enemy.pos + enemy.vel;

        if enemy_reaches_player(pos, enemy.radius, player.pos, player.radius) {
            events.truncate(events_mark);
            events.push(GameEvent::GameOver { score: state.score });
            return (state.clone(), StepOutcome::GameOver);
        }

        let hit = first_overlapping(
            pos,
            enemy.radius,
            projectiles.iter().map(|p| (p.pos, p.radius)),
        );
        let Some(index) = hit else {
            enemies.push(Enemy { pos, ..enemy.clone() });
            continue;
        };

        // Consumed on first hit; later enemies never see this projectile
        let shot = projectiles.remove(index);
        spawn_burst(
            &mut particles,
            shot.pos,
            enemy.radius,
            enemy.color,
            burst_seed(state.time_ticks, enemy.id),
        );

        if enemy.radius > ENEMY_SURVIVAL_RADIUS {
            let radius = enemy.radius - ENEMY_HIT_SHRINK;
            score += SCORE_HIT;
            events.push(GameEvent::EnemyHit {
                enemy_id: enemy.id,
                radius,
            });
            enemies.push(Enemy {
                pos,
                radius,
                ..enemy.clone()
            });
        } else {
            score += SCORE_KILL;
            events.push(GameEvent::EnemyDestroyed { enemy_id: enemy.id });
        }
    }

    let mut next = state.rebuilt(projectiles, enemies, particles);
    next.score = score;
    next.time_ticks += 1;

    if input.fire {
        let id = next.next_entity_id();
        next.projectiles
            .push(Projectile::aimed(id, next.player.pos, input.target));
        next.score = next.score.saturating_sub(SHOT_COST);
        events.push(GameEvent::Fired { projectile_id: id });
    }

    // Level is derived from score; report transitions (including the fire cost)
    let level_after = next.level();
    if level_after != level_before {
        events.push(GameEvent::LevelChanged { level: level_after });
    }

    (next, StepOutcome::Continue)
}

fn burst_seed(tick: u64, enemy_id: u32) -> u32 {
    (tick as u32)
        .wrapping_mul(2654435761)
        .wrapping_add(enemy_id.wrapping_mul(31337))
}

/// Emit `2 × radius` particles at `origin`, scattered in every direction
fn spawn_burst(particles: &mut Vec<Particle>, origin: Vec2, radius: f32, color: Color, seed: u32) {
    let count = (radius * PARTICLES_PER_RADIUS).max(0.0) as u32;
    particles.reserve(count as usize);
    for i in 0..count {
        let hash = seed.wrapping_add(i.wrapping_mul(104729));
        let angle = hash_unit(hash) * std::f32::consts::TAU;
        let speed = hash_unit(hash ^ 0x9e37_79b9) * PARTICLE_MAX_SPEED;
        particles.push(Particle {
            pos: origin,
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            color,
            alpha: 1.0,
            size: hash_unit(hash.rotate_left(13)) * PARTICLE_MAX_SIZE,
        });
    }
}
