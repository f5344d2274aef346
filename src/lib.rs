//! Ruins Run - a frame-driven arcade world simulation
//!
//! Core modules:
//! - `sim`: Simulation (player motion, obstacle physics, collisions, level progression)
//! - `settings`: Runtime preferences loaded from JSON
//! - `assets`: Tolerant player mesh loading with a built-in fallback
//!
//! Rendering, windowing and audio belong to the host. The host calls
//! [`sim::Simulation::update`] once per frame and draws the returned snapshot.

pub mod assets;
pub mod settings;
pub mod sim;

pub use settings::Settings;
pub use sim::Simulation;

use glam::{Vec2, Vec3};

/// Game configuration constants
pub mod consts {
    /// Half extent of the square arena (world spans -36..36 on X and Z)
    pub const WORLD_HALF: f32 = 36.0;
    /// Arena wall height (presentation only)
    pub const WALL_HEIGHT: f32 = 7.0;
    /// Extra inset from the walls when clamping the player
    pub const WALL_SKIN: f32 = 0.1;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 0.6;
    pub const PLAYER_SPEED: f32 = 8.0;
    /// Player center height above the floor
    pub const PLAYER_GROUND_OFFSET: f32 = 1.0;

    /// Falling icicle acceleration (deliberately floaty)
    pub const ICICLE_GRAVITY: f32 = -4.2;
    /// Height at which a falling icicle comes to rest
    pub const ICICLE_GROUND_HEIGHT: f32 = 0.35;

    /// Slack added to collectible + player radius for pickup
    pub const PICKUP_EPSILON: f32 = 0.15;
    /// Score awarded per collectible
    pub const PICKUP_BONUS: u32 = 10;
    /// Slack added to the portal radius for level completion
    pub const PORTAL_APPROACH_EPSILON: f32 = 0.8;

    /// Remaining penetration tolerated after push-out before rolling back
    pub const ROLLBACK_EPSILON: f32 = 0.01;
    /// Minimum separation length treated as a real direction
    pub const SEPARATION_FLOOR: f32 = 1.0e-4;

    /// Spawn points keep this distance from the arena walls
    pub const PLACEMENT_MARGIN: f32 = 3.0;
    /// Rejection sampling gives up after this many draws
    pub const MAX_PLACEMENT_ATTEMPTS: u32 = 512;

    /// Delta time used for the very first frame
    pub const FIRST_FRAME_DT: f32 = 1.0 / 60.0;
    /// Longest frame the simulation will integrate in one step
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Look defaults
    pub const MOUSE_SENSITIVITY: f32 = 0.0045;
    pub const PITCH_LIMIT: f32 = 1.2;
}

/// Wrap an angle into [-π, π]
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    (angle + PI).rem_euclid(TAU) - PI
}

/// Project a world-space point onto the ground plane (x, z)
#[inline]
pub fn planar(p: Vec3) -> Vec2 {
    Vec2::new(p.x, p.z)
}

/// Euclidean distance ignoring the vertical axis
#[inline]
pub fn planar_distance(a: Vec3, b: Vec3) -> f32 {
    planar(a).distance(planar(b))
}

/// Unit forward and right vectors on the ground plane for a yaw angle
///
/// Yaw 0 faces -Z. Returned as (x, z) pairs.
#[inline]
pub fn yaw_basis(yaw: f32) -> (Vec2, Vec2) {
    let (sy, cy) = yaw.sin_cos();
    (Vec2::new(sy, -cy), Vec2::new(cy, sy))
}
