//! Circle overlap tests
//!
//! Every entity is a circle, so collisions reduce to center distance versus
//! summed radii. The player check uses a shrunken hit box.

use glam::Vec2;

use crate::consts::PLAYER_COLLISION_MARGIN;

/// True when two circles strictly overlap
#[inline]
pub fn circles_overlap(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> bool {
    a_pos.distance(b_pos) < a_radius + b_radius
}

/// Enemy touching the player, with the hit box shrunk by the collision margin
#[inline]
pub fn enemy_reaches_player(
    enemy_pos: Vec2,
    enemy_radius: f32,
    player_pos: Vec2,
    player_radius: f32,
) -> bool {
    enemy_pos.distance(player_pos) < enemy_radius + player_radius - PLAYER_COLLISION_MARGIN
}

/// Index of the first projectile (in iteration order) overlapping the circle
pub fn first_overlapping<I>(pos: Vec2, radius: f32, projectiles: I) -> Option<usize>
where
    I: IntoIterator<Item = (Vec2, f32)>,
{
    projectiles
        .into_iter()
        .position(|(p_pos, p_radius)| circles_overlap(pos, radius, p_pos, p_radius))
}
