//! Level completion and level swaps

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{Camera, LevelId, WorldState};
use crate::consts::PORTAL_APPROACH_EPSILON;
use crate::planar_distance;

/// Why a level transition happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionCause {
    /// Every collectible taken and the player reached the portal
    PortalReached,
    /// Host asked for the other level
    Switch,
    /// Host asked to regenerate the current level
    Restart,
}

/// A completed level transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelTransition {
    pub from: LevelId,
    pub to: LevelId,
    pub cause: TransitionCause,
}

/// Whether the active level is finished
pub fn level_complete(world: &WorldState) -> bool {
    world.all_collected()
        && planar_distance(world.player.pos, world.portal.pos)
            < world.portal.radius + PORTAL_APPROACH_EPSILON
}

/// Replace the world with a freshly generated `target` level.
///
/// The old world is dropped as a whole; the camera keeps its mode but faces
/// the new spawn orientation.
pub fn enter_level<R: Rng + ?Sized>(
    world: &mut WorldState,
    camera: &mut Camera,
    target: LevelId,
    cause: TransitionCause,
    rng: &mut R,
) -> LevelTransition {
    let from = world.level;
    *world = WorldState::generate(target, rng);
    camera.reset_look(world.player.yaw);

    log::info!("Level {:?} -> {:?} ({:?})", from, target, cause);
    LevelTransition {
        from,
        to: target,
        cause,
    }
}

/// Run the automatic completion rule; transitions to the next level if met.
pub fn check_progression<R: Rng + ?Sized>(
    world: &mut WorldState,
    camera: &mut Camera,
    rng: &mut R,
) -> Option<LevelTransition> {
    if !level_complete(world) {
        return None;
    }
    let target = world.level.next();
    Some(enter_level(
        world,
        camera,
        target,
        TransitionCause::PortalReached,
        rng,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn finished_world(rng: &mut Pcg32) -> WorldState {
        let mut world = WorldState::generate(LevelId::A, rng);
        for c in &mut world.collectibles {
            c.collected = true;
        }
        world.score = 100;
        world
    }

    #[test]
    fn test_needs_every_collectible() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut world = finished_world(&mut rng);
        world.collectibles[3].collected = false;
        world.player.pos = world.portal.pos;
        assert!(!level_complete(&world));
    }

    #[test]
    fn test_needs_portal_proximity() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut world = finished_world(&mut rng);
        // Just outside 2.8 + 0.8
        world.player.pos = world.portal.pos + Vec3::new(0.0, 1.0, 3.61);
        assert!(!level_complete(&world));
        world.player.pos = world.portal.pos + Vec3::new(0.0, 1.0, 3.59);
        assert!(level_complete(&world));
    }

    #[test]
    fn test_portal_swaps_level_and_resets() {
        let mut rng = Pcg32::seed_from_u64(6);
        let mut world = finished_world(&mut rng);
        world.player.pos = world.portal.pos;
        world.player.yaw = 1.3;
        let mut camera = Camera {
            yaw: 1.3,
            pitch: -0.7,
            ..Default::default()
        };

        let t = check_progression(&mut world, &mut camera, &mut rng).expect("transition");
        assert_eq!(t.from, LevelId::A);
        assert_eq!(t.to, LevelId::B);
        assert_eq!(t.cause, TransitionCause::PortalReached);
        assert_eq!(world.level, LevelId::B);
        assert_eq!(world.score, 0);
        assert_eq!(world.obstacles.len(), 9);
        assert_eq!(world.collected_count(), 0);
        assert_eq!(world.player.pos, Vec3::new(0.0, 1.0, 5.0));
        assert_eq!(camera.yaw, 0.0);
        assert_eq!(camera.pitch, 0.0);
    }

    #[test]
    fn test_restart_keeps_level() {
        let mut rng = Pcg32::seed_from_u64(8);
        let mut world = WorldState::generate(LevelId::B, &mut rng);
        world.score = 40;
        let mut camera = Camera::default();
        let t = enter_level(&mut world, &mut camera, LevelId::B, TransitionCause::Restart, &mut rng);
        assert_eq!(t.from, LevelId::B);
        assert_eq!(t.to, LevelId::B);
        assert_eq!(world.score, 0);
    }
}
