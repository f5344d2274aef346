//! Vertical obstacle motion

use super::state::{Obstacle, ObstacleKind};
use crate::consts::{ICICLE_GRAVITY, ICICLE_GROUND_HEIGHT};

/// Advance one obstacle by `dt` seconds.
///
/// Returns true on the frame an icicle lands.
pub fn integrate(obstacle: &mut Obstacle, dt: f32) -> bool {
    match obstacle.kind {
        ObstacleKind::Stone => false,
        ObstacleKind::Icicle if obstacle.grounded => false,
        ObstacleKind::Icicle => {
            // Semi-implicit Euler: velocity first, then position
            obstacle.vel.y += ICICLE_GRAVITY * dt;
            obstacle.pos.y += obstacle.vel.y * dt;

            if obstacle.pos.y <= ICICLE_GROUND_HEIGHT {
                obstacle.pos.y = ICICLE_GROUND_HEIGHT;
                obstacle.vel.y = 0.0;
                obstacle.grounded = true;
                return true;
            }
            false
        }
    }
}
