//! Read-only view of the simulation handed to the renderer

use glam::Vec3;
use serde::Serialize;

use super::levels::LevelSpec;
use super::state::{Camera, LevelId, ObstacleKind, WorldState};

#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub pos: Vec3,
    pub yaw: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ObstacleView {
    pub kind: ObstacleKind,
    pub pos: Vec3,
    pub radius: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct CollectibleView {
    pub pos: Vec3,
    pub radius: f32,
    pub collected: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PortalView {
    pub pos: Vec3,
    pub radius: f32,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, Serialize)]
pub struct WorldSnapshot {
    pub level: LevelId,
    /// HUD title for the level
    pub level_name: &'static str,
    pub player: PlayerView,
    pub camera: Camera,
    pub obstacles: Vec<ObstacleView>,
    pub collectibles: Vec<CollectibleView>,
    pub portal: PortalView,
    pub score: u32,
    pub collected: usize,
    pub total: usize,
    /// Frames simulated since start
    pub frame: u64,
}

impl WorldSnapshot {
    pub fn capture(world: &WorldState, camera: &Camera, frame: u64) -> Self {
        Self {
            level: world.level,
            level_name: LevelSpec::for_level(world.level).name,
            player: PlayerView {
                pos: world.player.pos,
                yaw: world.player.yaw,
            },
            camera: *camera,
            obstacles: world
                .obstacles
                .iter()
                .map(|o| ObstacleView {
                    kind: o.kind,
                    pos: o.pos,
                    radius: o.radius,
                })
                .collect(),
            collectibles: world
                .collectibles
                .iter()
                .map(|c| CollectibleView {
                    pos: c.pos,
                    radius: c.radius,
                    collected: c.collected,
                })
                .collect(),
            portal: PortalView {
                pos: world.portal.pos,
                radius: world.portal.radius,
            },
            score: world.score,
            collected: world.collected_count(),
            total: world.collectibles.len(),
            frame,
        }
    }
}
