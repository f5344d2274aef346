//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod clock;
pub mod collision;
pub mod input;
pub mod levels;
pub mod physics;
pub mod placement;
pub mod progression;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use clock::FrameClock;
pub use collision::{CollisionResult, circle_overlap, collect_pickups, resolve_obstacles};
pub use input::{Command, InputTranslator, KeyBinding, LookDelta, MoveKey};
pub use levels::{HeightRule, LevelSpec};
pub use placement::{Bounds, Placement, sample};
pub use progression::{LevelTransition, TransitionCause};
pub use snapshot::WorldSnapshot;
pub use state::{
    Camera, CameraMode, Collectible, LevelId, Obstacle, ObstacleKind, Player, Portal, WorldState,
};
pub use tick::{FrameEvent, Simulation};
