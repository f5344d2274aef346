//! Player collision response and collectible pickup
//!
//! Everything is tested as circles on the ground plane. Obstacle contact is
//! resolved in two phases: push the player straight out of each obstacle it
//! overlaps, then, if anything was pushed, re-test every obstacle and roll the
//! player back to the start-of-frame position when overlap remains.

use glam::{Vec2, Vec3};

use super::state::WorldState;
use crate::consts::*;
use crate::planar;

/// Result of a circle overlap check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether the circles overlap
    pub hit: bool,
    /// Unit direction from the obstacle toward the player (x, z)
    pub normal: Vec2,
    /// Overlap depth along `normal`
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check overlap between the player circle and an obstacle circle
pub fn circle_overlap(
    player_pos: Vec3,
    player_radius: f32,
    obstacle_pos: Vec3,
    obstacle_radius: f32,
) -> CollisionResult {
    let offset = planar(player_pos) - planar(obstacle_pos);
    let dist = offset.length();
    let min_dist = player_radius + obstacle_radius;

    if dist >= min_dist {
        return CollisionResult::miss();
    }

    // Coincident centers have no direction of their own
    let normal = if dist > SEPARATION_FLOOR {
        offset / dist
    } else {
        Vec2::X
    };

    CollisionResult {
        hit: true,
        normal,
        penetration: min_dist - dist,
    }
}

/// What happened during obstacle resolution this frame
#[derive(Debug, Clone, Default)]
pub struct ObstacleResolution {
    /// Indices of obstacles that pushed the player out
    pub contacts: Vec<usize>,
    /// Player was restored to the start-of-frame position
    pub rolled_back: bool,
}

/// Separate the player from every obstacle it overlaps.
///
/// Each push-out costs one point (score never drops below zero). If overlap
/// deeper than [`ROLLBACK_EPSILON`] survives the push-out pass, the player
/// is moved back to `last_safe_pos`.
pub fn resolve_obstacles(world: &mut WorldState) -> ObstacleResolution {
    let mut resolution = ObstacleResolution::default();
    let radius = world.player.radius;

    for (i, obstacle) in world.obstacles.iter().enumerate() {
        let result = circle_overlap(world.player.pos, radius, obstacle.pos, obstacle.radius);
        if !result.hit {
            continue;
        }

        world.player.pos.x += result.normal.x * result.penetration;
        world.player.pos.z += result.normal.y * result.penetration;
        world.score = world.score.saturating_sub(1);
        resolution.contacts.push(i);
    }

    if resolution.contacts.is_empty() {
        return resolution;
    }

    if max_penetration(world) > ROLLBACK_EPSILON {
        log::debug!(
            "Rollback after {} contact(s) to {:?}",
            resolution.contacts.len(),
            world.last_safe_pos
        );
        world.player.pos = world.last_safe_pos;
        resolution.rolled_back = true;
    }

    resolution
}

/// Deepest overlap between the player and any obstacle (0 if none)
pub fn max_penetration(world: &WorldState) -> f32 {
    world
        .obstacles
        .iter()
        .map(|o| circle_overlap(world.player.pos, world.player.radius, o.pos, o.radius))
        .filter(|r| r.hit)
        .map(|r| r.penetration)
        .fold(0.0, f32::max)
}

/// Mark every collectible in reach as collected and award its bonus.
///
/// Returns the indices picked up this frame.
pub fn collect_pickups(world: &mut WorldState) -> Vec<usize> {
    let player = world.player_planar();
    let reach = world.player.radius + PICKUP_EPSILON;
    let mut picked = Vec::new();

    for (i, c) in world.collectibles.iter_mut().enumerate() {
        if c.collected {
            continue;
        }
        if player.distance(planar(c.pos)) < c.radius + reach {
            c.collected = true;
            world.score += PICKUP_BONUS;
            picked.push(i);
        }
    }

    picked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Collectible, LevelId, Obstacle, Player, Portal};

    fn world_with(obstacles: Vec<Obstacle>, player_pos: Vec3, score: u32) -> WorldState {
        let player = Player::spawn(player_pos, 0.0);
        WorldState {
            level: LevelId::A,
            last_safe_pos: player.pos,
            player,
            obstacles,
            collectibles: Vec::new(),
            portal: Portal {
                pos: Vec3::new(0.0, 0.0, -32.0),
                radius: 2.8,
            },
            score,
        }
    }

    #[test]
    fn test_circle_overlap_miss() {
        let r = circle_overlap(Vec3::new(3.0, 1.0, 0.0), 0.6, Vec3::ZERO, 1.1);
        assert!(!r.hit);
    }

    #[test]
    fn test_circle_overlap_ignores_height() {
        // Icicle hanging overhead still blocks
        let r = circle_overlap(Vec3::new(1.0, 1.0, 0.0), 0.6, Vec3::new(0.0, 14.0, 0.0), 0.5);
        assert!(r.hit);
        assert!((r.penetration - 0.1).abs() < 1e-5);
        assert!((r.normal - Vec2::X).length() < 1e-6);
    }

    #[test]
    fn test_graze_pushes_out_exactly() {
        // Combined radius 1.0, player 0.5 away on a diagonal
        let dir = Vec2::new(3.0, 4.0).normalize();
        let mut world = world_with(
            vec![Obstacle::stone(Vec3::new(2.0, 1.0, 2.0), 0.4)],
            Vec3::new(2.0 + dir.x * 0.5, 1.0, 2.0 + dir.y * 0.5),
            5,
        );
        world.last_safe_pos = Vec3::new(10.0, 1.0, 10.0);

        let res = resolve_obstacles(&mut world);
        assert_eq!(res.contacts, vec![0]);
        assert!(!res.rolled_back);
        assert_eq!(world.score, 4);

        let offset = planar(world.player.pos) - Vec2::new(2.0, 2.0);
        assert!((offset.length() - 1.0).abs() < 1e-5);
        assert!((offset.normalize() - dir).length() < 1e-5);
    }

    #[test]
    fn test_score_floors_at_zero() {
        let mut world = world_with(
            vec![Obstacle::stone(Vec3::new(0.5, 1.0, 0.0), 1.1)],
            Vec3::new(0.0, 1.0, 0.0),
            0,
        );
        resolve_obstacles(&mut world);
        assert_eq!(world.score, 0);
    }

    #[test]
    fn test_wedged_between_stones_rolls_back() {
        // Two stones 2.0 apart; the player (radius 0.6) cannot fit between them
        let mut world = world_with(
            vec![
                Obstacle::stone(Vec3::new(-1.0, 1.0, 0.0), 1.1),
                Obstacle::stone(Vec3::new(1.0, 1.0, 0.0), 1.1),
            ],
            Vec3::new(0.0, 1.0, 0.1),
            3,
        );
        let safe = Vec3::new(0.0, 1.0, 6.0);
        world.last_safe_pos = safe;

        let res = resolve_obstacles(&mut world);
        assert!(res.rolled_back);
        assert_eq!(res.contacts.len(), 2);
        assert_eq!(world.player.pos, safe);
        assert_eq!(world.score, 1);
    }

    #[test]
    fn test_coincident_centers_push_along_x() {
        let mut world = world_with(
            vec![Obstacle::stone(Vec3::new(4.0, 1.0, 4.0), 1.1)],
            Vec3::new(4.0, 1.0, 4.0),
            0,
        );
        let res = resolve_obstacles(&mut world);
        assert!(!res.rolled_back);
        assert!((world.player.pos.x - 5.7).abs() < 1e-5);
        assert!((world.player.pos.z - 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_no_contact_no_change() {
        let mut world = world_with(
            vec![Obstacle::stone(Vec3::new(10.0, 1.0, 0.0), 1.1)],
            Vec3::new(0.0, 1.0, 0.0),
            2,
        );
        let res = resolve_obstacles(&mut world);
        assert!(res.contacts.is_empty());
        assert_eq!(world.score, 2);
        assert_eq!(world.player.pos, Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_pickup_awards_once() {
        let mut world = world_with(Vec::new(), Vec3::new(0.0, 1.0, 0.0), 0);
        world.collectibles = vec![
            Collectible {
                pos: Vec3::new(1.2, 1.4, 0.0),
                radius: 0.6,
                collected: false,
            },
            Collectible {
                pos: Vec3::new(1.4, 1.4, 0.0),
                radius: 0.6,
                collected: false,
            },
        ];

        // reach = 0.6 + 0.6 + 0.15 = 1.35
        assert_eq!(collect_pickups(&mut world), vec![0]);
        assert_eq!(world.score, PICKUP_BONUS);
        assert!(collect_pickups(&mut world).is_empty());
        assert_eq!(world.score, PICKUP_BONUS);
        assert!(!world.collectibles[1].collected);
    }
}
