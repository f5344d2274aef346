//! Data-driven level spawn table
//!
//! Both levels are built by the same generator; only the numbers differ.

use glam::Vec3;

use super::state::{LevelId, ObstacleKind};
use crate::consts::WORLD_HALF;

/// How obstacle spawn height is chosen
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeightRule {
    Fixed(f32),
    /// Uniform in `base - jitter ..= base + jitter`
    Jittered { base: f32, jitter: f32 },
}

/// Spawn parameters for one level
#[derive(Debug, Clone)]
pub struct LevelSpec {
    pub id: LevelId,
    /// HUD title
    pub name: &'static str,

    pub collectible_count: usize,
    pub collectible_radius: f32,
    pub collectible_height: f32,
    /// Minimum planar distance from previously placed entities
    pub collectible_spacing: f32,

    pub obstacle_count: usize,
    pub obstacle_kind: ObstacleKind,
    pub obstacle_radius: f32,
    pub obstacle_height: HeightRule,
    pub obstacle_spacing: f32,

    pub portal_pos: Vec3,
    pub portal_radius: f32,

    pub player_spawn: Vec3,
    pub player_yaw: f32,
}

const PORTAL_POS: Vec3 = Vec3::new(0.0, 0.0, -(WORLD_HALF - 4.0));
const PLAYER_SPAWN: Vec3 = Vec3::new(0.0, 1.0, 5.0);

static DESERT: LevelSpec = LevelSpec {
    id: LevelId::A,
    name: "DESERT TEMPLE RUINS",
    collectible_count: 10,
    collectible_radius: 0.6,
    collectible_height: 1.4,
    collectible_spacing: 4.5,
    obstacle_count: 8,
    obstacle_kind: ObstacleKind::Stone,
    obstacle_radius: 1.1,
    obstacle_height: HeightRule::Fixed(1.0),
    obstacle_spacing: 6.5,
    portal_pos: PORTAL_POS,
    portal_radius: 2.8,
    player_spawn: PLAYER_SPAWN,
    player_yaw: 0.0,
};

static SNOW: LevelSpec = LevelSpec {
    id: LevelId::B,
    name: "FROZEN CAVES (SNOW)",
    collectible_count: 10,
    collectible_radius: 0.6,
    collectible_height: 1.8,
    collectible_spacing: 4.5,
    obstacle_count: 9,
    obstacle_kind: ObstacleKind::Icicle,
    obstacle_radius: 0.5,
    obstacle_height: HeightRule::Jittered {
        base: 14.0,
        jitter: 1.5,
    },
    obstacle_spacing: 6.5,
    portal_pos: PORTAL_POS,
    portal_radius: 2.8,
    player_spawn: PLAYER_SPAWN,
    player_yaw: 0.0,
};

impl LevelSpec {
    pub fn for_level(id: LevelId) -> &'static LevelSpec {
        match id {
            LevelId::A => &DESERT,
            LevelId::B => &SNOW,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_matches_ids() {
        for id in [LevelId::A, LevelId::B] {
            let layout = LevelSpec::for_level(id);
            assert_eq!(layout.id, id);
            assert!(layout.collectible_radius > 0.0);
            assert!(layout.obstacle_radius > 0.0);
            assert!(layout.portal_radius > 0.0);
        }
    }

    #[test]
    fn test_spawn_counts() {
        assert_eq!(LevelSpec::for_level(LevelId::A).collectible_count, 10);
        assert_eq!(LevelSpec::for_level(LevelId::A).obstacle_count, 8);
        assert_eq!(LevelSpec::for_level(LevelId::B).collectible_count, 10);
        assert_eq!(LevelSpec::for_level(LevelId::B).obstacle_count, 9);
    }

    #[test]
    fn test_hud_titles() {
        assert_eq!(LevelSpec::for_level(LevelId::A).name, "DESERT TEMPLE RUINS");
        assert_eq!(LevelSpec::for_level(LevelId::B).name, "FROZEN CAVES (SNOW)");
    }
}
