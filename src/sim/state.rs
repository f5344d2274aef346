//! World state and core simulation types
//!
//! Everything the renderer needs for one active level lives here. A level
//! transition throws the whole `WorldState` away and generates a fresh one.

use glam::{Vec2, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::levels::{HeightRule, LevelSpec};
use super::placement::{Bounds, sample};
use crate::consts::*;
use crate::planar;

/// The two levels, played alternately
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LevelId {
    /// Desert temple ruins (stones)
    #[default]
    A,
    /// Frozen caves (falling icicles)
    B,
}

impl LevelId {
    /// The level entered from this one through the portal
    pub fn next(self) -> Self {
        match self {
            LevelId::A => LevelId::B,
            LevelId::B => LevelId::A,
        }
    }
}

/// The player avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// World position (y pinned to the ground offset)
    pub pos: Vec3,
    /// Heading in radians, 0 faces -Z
    pub yaw: f32,
    pub radius: f32,
    /// Movement speed (world units per second)
    pub speed: f32,
}

impl Player {
    pub fn spawn(pos: Vec3, yaw: f32) -> Self {
        Self {
            pos: Vec3::new(pos.x, PLAYER_GROUND_OFFSET, pos.z),
            yaw,
            radius: PLAYER_RADIUS,
            speed: PLAYER_SPEED,
        }
    }

    /// Keep the player inside the arena walls
    pub fn clamp_to_arena(&mut self) {
        let bound = WORLD_HALF - self.radius - WALL_SKIN;
        self.pos.x = self.pos.x.clamp(-bound, bound);
        self.pos.z = self.pos.z.clamp(-bound, bound);
        self.pos.y = PLAYER_GROUND_OFFSET;
    }
}

/// Obstacle variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Resting boulder, never moves
    Stone,
    /// Starts high in the air and falls until it lands
    Icicle,
}

/// An obstacle the player bumps into
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub pos: Vec3,
    /// Only the vertical component is ever non-zero
    pub vel: Vec3,
    pub radius: f32,
    /// One-way flag: false -> true when an icicle lands
    pub grounded: bool,
}

impl Obstacle {
    pub fn stone(pos: Vec3, radius: f32) -> Self {
        Self {
            kind: ObstacleKind::Stone,
            pos,
            vel: Vec3::ZERO,
            radius,
            grounded: true,
        }
    }

    pub fn icicle(pos: Vec3, radius: f32) -> Self {
        Self {
            kind: ObstacleKind::Icicle,
            pos,
            vel: Vec3::ZERO,
            radius,
            grounded: false,
        }
    }

    pub fn new(kind: ObstacleKind, pos: Vec3, radius: f32) -> Self {
        match kind {
            ObstacleKind::Stone => Self::stone(pos, radius),
            ObstacleKind::Icicle => Self::icicle(pos, radius),
        }
    }
}

/// A gem the player picks up by walking near it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible {
    pub pos: Vec3,
    pub radius: f32,
    /// Monotonic within a level
    pub collected: bool,
}

/// Level exit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Portal {
    pub pos: Vec3,
    pub radius: f32,
}

/// Complete state of the active level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldState {
    pub level: LevelId,
    pub player: Player,
    /// Ordered as spawned
    pub obstacles: Vec<Obstacle>,
    /// Ordered as spawned
    pub collectibles: Vec<Collectible>,
    pub portal: Portal,
    pub score: u32,
    /// Player position captured at the start of the current frame
    pub last_safe_pos: Vec3,
}

impl WorldState {
    /// Generate a fresh level from its spawn table
    pub fn generate<R: Rng + ?Sized>(level: LevelId, rng: &mut R) -> Self {
        let layout = LevelSpec::for_level(level);
        let bounds = Bounds::square(WORLD_HALF);

        // Every placement keeps its distance from everything placed before it
        let mut occupied: Vec<Vec2> =
            Vec::with_capacity(layout.collectible_count + layout.obstacle_count + 1);
        let mut exhausted = 0usize;

        let mut collectibles = Vec::with_capacity(layout.collectible_count);
        for _ in 0..layout.collectible_count {
            let placement = sample(rng, &occupied, layout.collectible_spacing, bounds);
            exhausted += placement.exhausted as usize;
            occupied.push(placement.point);
            collectibles.push(Collectible {
                pos: Vec3::new(
                    placement.point.x,
                    layout.collectible_height,
                    placement.point.y,
                ),
                radius: layout.collectible_radius,
                collected: false,
            });
        }

        // Obstacles also keep clear of the player spawn point
        occupied.push(planar(layout.player_spawn));

        let mut obstacles = Vec::with_capacity(layout.obstacle_count);
        for _ in 0..layout.obstacle_count {
            let placement = sample(rng, &occupied, layout.obstacle_spacing, bounds);
            exhausted += placement.exhausted as usize;
            occupied.push(placement.point);
            let height = match layout.obstacle_height {
                HeightRule::Fixed(h) => h,
                HeightRule::Jittered { base, jitter } => {
                    base + rng.random_range(-jitter..=jitter)
                }
            };
            obstacles.push(Obstacle::new(
                layout.obstacle_kind,
                Vec3::new(placement.point.x, height, placement.point.y),
                layout.obstacle_radius,
            ));
        }

        if exhausted > 0 {
            log::warn!(
                "{}: {} spawn point(s) placed closer than their spacing",
                layout.name,
                exhausted
            );
        }
        log::info!(
            "Generated {}: {} collectibles, {} obstacles",
            layout.name,
            collectibles.len(),
            obstacles.len()
        );

        let player = Player::spawn(layout.player_spawn, layout.player_yaw);
        let last_safe_pos = player.pos;

        Self {
            level,
            player,
            obstacles,
            collectibles,
            portal: Portal {
                pos: layout.portal_pos,
                radius: layout.portal_radius,
            },
            score: 0,
            last_safe_pos,
        }
    }

    /// True once every collectible in the level has been picked up
    pub fn all_collected(&self) -> bool {
        self.collectibles.iter().all(|c| c.collected)
    }

    /// Number of collectibles picked up so far
    pub fn collected_count(&self) -> usize {
        self.collectibles.iter().filter(|c| c.collected).count()
    }

    /// Player position on the ground plane
    pub fn player_planar(&self) -> Vec2 {
        planar(self.player.pos)
    }
}

/// Camera presentation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CameraMode {
    #[default]
    ThirdPerson,
    FirstPerson,
}

/// Look direction, shared between both camera modes
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Camera {
    pub mode: CameraMode,
    pub yaw: f32,
    pub pitch: f32,
}

impl Camera {
    /// Flip between first and third person, snapping yaw to the player
    pub fn toggle_mode(&mut self, player_yaw: f32) {
        self.mode = match self.mode {
            CameraMode::ThirdPerson => CameraMode::FirstPerson,
            CameraMode::FirstPerson => CameraMode::ThirdPerson,
        };
        self.yaw = player_yaw;
    }

    /// Face the given yaw with a level horizon (mode is kept)
    pub fn reset_look(&mut self, yaw: f32) {
        self.yaw = yaw;
        self.pitch = 0.0;
    }
}
