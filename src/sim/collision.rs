//! Canoe vs rock collision detection
//!
//! Both shapes are circles. The canoe's hit circle is much smaller than its
//! hull, so close shaves don't count.

use glam::Vec2;

use super::entity::Obstacle;
use super::player::Player;

/// Strict circle overlap: touching circles do not collide
#[inline]
pub fn circles_overlap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    a.distance(b) < a_radius + b_radius
}

/// Check the canoe against a single rock
pub fn collides(player: &Player, obstacle: &Obstacle) -> bool {
    circles_overlap(
        player.pos,
        player.collision_radius(),
        obstacle.pos,
        obstacle.radius(),
    )
}

/// Index of the first rock the canoe hits, if any
pub fn first_collision(player: &Player, obstacles: &[Obstacle]) -> Option<usize> {
    obstacles.iter().position(|rock| collides(player, rock))
}
