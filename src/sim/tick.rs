//! Per-frame simulation update
//!
//! Frame order: commands, movement, obstacle physics, collision response,
//! pickups, level completion. A frame that starts with a forced level change
//! does nothing else.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::collision::{collect_pickups, resolve_obstacles};
use super::input::{Command, InputTranslator, KeyBinding};
use super::physics::integrate;
use super::progression::{LevelTransition, TransitionCause, check_progression, enter_level};
use super::snapshot::WorldSnapshot;
use super::state::{Camera, LevelId, WorldState};
use crate::consts::*;
use crate::normalize_angle;
use crate::settings::Settings;

/// Notable things that happened during one update
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum FrameEvent {
    /// Player was pushed out of an obstacle (one point lost)
    ObstacleContact { index: usize },
    /// Push-out was not enough; the frame's movement was discarded
    RolledBack,
    CollectiblePicked { index: usize },
    IcicleLanded { index: usize },
    LevelChanged(LevelTransition),
}

/// Owns the world and everything that mutates it
#[derive(Debug, Clone)]
pub struct Simulation {
    world: WorldState,
    camera: Camera,
    input: InputTranslator,
    rng: Pcg32,
    pitch_limit: f32,
    /// Commands waiting for the next update
    pending: Vec<Command>,
    frame: u64,
}

impl Simulation {
    /// Start on level A with default settings
    pub fn new(seed: u64) -> Self {
        Self::with_settings(seed, &Settings::default())
    }

    pub fn with_settings(seed: u64, settings: &Settings) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let world = WorldState::generate(LevelId::A, &mut rng);
        let camera = Camera {
            mode: settings.camera_mode,
            yaw: world.player.yaw,
            pitch: 0.0,
        };
        log::info!("Simulation started with seed {}", seed);

        Self {
            world,
            camera,
            input: InputTranslator::new(settings.mouse_sensitivity),
            rng,
            pitch_limit: settings.pitch_limit.abs(),
            pending: Vec::new(),
            frame: 0,
        }
    }

    pub fn world(&self) -> &WorldState {
        &self.world
    }

    /// Direct world access for tools and tests
    pub fn world_mut(&mut self) -> &mut WorldState {
        &mut self.world
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot::capture(&self.world, &self.camera, self.frame)
    }

    /// Host key press. Movement keys are held until released; command keys
    /// queue a command for the next update.
    pub fn key_down(&mut self, symbol: char) {
        match KeyBinding::from_symbol(symbol) {
            Some(KeyBinding::Move(key)) => self.input.set_held(key, true),
            Some(KeyBinding::Command(cmd)) => self.command(cmd),
            None => {}
        }
    }

    pub fn key_up(&mut self, symbol: char) {
        if let Some(KeyBinding::Move(key)) = KeyBinding::from_symbol(symbol) {
            self.input.set_held(key, false);
        }
    }

    /// Queue a command; it takes effect at the start of the next update
    pub fn command(&mut self, cmd: Command) {
        self.pending.push(cmd);
    }

    /// Absolute pointer position (the first one only sets the baseline)
    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        if let Some(look) = self.input.pointer_moved(x, y) {
            self.apply_look(look.yaw, look.pitch);
        }
    }

    /// Relative pointer motion in pixels (the first one after activation is
    /// dropped)
    pub fn pointer_delta(&mut self, dx: f32, dy: f32) {
        if let Some(look) = self.input.look(dx, dy) {
            self.apply_look(look.yaw, look.pitch);
        }
    }

    /// Pointer left the window or lost focus
    pub fn pointer_released(&mut self) {
        self.input.reset_pointer();
        self.input.release_all();
    }

    fn apply_look(&mut self, yaw: f32, pitch: f32) {
        self.world.player.yaw = normalize_angle(self.world.player.yaw + yaw);
        self.camera.yaw = self.world.player.yaw;
        self.camera.pitch = (self.camera.pitch + pitch).clamp(-self.pitch_limit, self.pitch_limit);
    }

    /// Advance the simulation by `dt` seconds
    pub fn update(&mut self, dt: f32) -> Vec<FrameEvent> {
        let dt = if dt.is_finite() { dt.clamp(0.0, MAX_FRAME_DT) } else { 0.0 };
        let mut events = Vec::new();
        self.frame += 1;

        for cmd in std::mem::take(&mut self.pending) {
            self.run_command(cmd, &mut events);
        }
        // A forced transition is the whole frame
        if !events.is_empty() {
            return events;
        }

        let world = &mut self.world;
        world.last_safe_pos = world.player.pos;

        // Player movement
        let step: Vec2 = self
            .input
            .displacement(world.player.yaw, world.player.speed, dt);
        world.player.pos.x += step.x;
        world.player.pos.z += step.y;
        world.player.clamp_to_arena();

        for (index, obstacle) in world.obstacles.iter_mut().enumerate() {
            if integrate(obstacle, dt) {
                events.push(FrameEvent::IcicleLanded { index });
            }
        }

        let resolution = resolve_obstacles(world);
        events.extend(
            resolution
                .contacts
                .iter()
                .map(|&index| FrameEvent::ObstacleContact { index }),
        );
        if resolution.rolled_back {
            events.push(FrameEvent::RolledBack);
        }

        events.extend(
            collect_pickups(world)
                .into_iter()
                .map(|index| FrameEvent::CollectiblePicked { index }),
        );

        if let Some(t) = check_progression(&mut self.world, &mut self.camera, &mut self.rng) {
            events.push(FrameEvent::LevelChanged(t));
        }

        events
    }

    fn run_command(&mut self, cmd: Command, events: &mut Vec<FrameEvent>) {
        let (target, cause) = match cmd {
            Command::ToggleCamera => {
                self.camera.toggle_mode(self.world.player.yaw);
                log::debug!("Camera mode: {:?}", self.camera.mode);
                return;
            }
            Command::SwitchLevel => (self.world.level.next(), TransitionCause::Switch),
            Command::RestartLevel => (self.world.level, TransitionCause::Restart),
        };
        let t = enter_level(&mut self.world, &mut self.camera, target, cause, &mut self.rng);
        events.push(FrameEvent::LevelChanged(t));
    }
}
