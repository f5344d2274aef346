//! Ruins Run entry point
//!
//! Headless host: loads settings and assets, then drives the simulation with a
//! scripted input sequence and logs what happens. A windowed host feeds the
//! same `Simulation` API from its own event loop.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use ruins_run::Settings;
use ruins_run::assets::{PlayerModel, load_player_model};
use ruins_run::settings::SETTINGS_FILE;
use ruins_run::sim::{FrameClock, FrameEvent, Simulation};

/// Frames simulated by the scripted session (20 s at 60 Hz)
const SCRIPT_FRAMES: u32 = 1200;
const FRAME_SECS: f64 = 1.0 / 60.0;

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x5eed)
}

/// Scripted input for frame `n`: walk while slowly turning, switch level once
fn drive(sim: &mut Simulation, n: u32) {
    match n {
        0 => {
            sim.pointer_moved(640.0, 400.0);
            sim.key_down('w');
        }
        600 => sim.key_down('l'),
        900 => sim.key_down('c'),
        _ => {}
    }
    if n % 30 == 0 {
        let x = 640.0 + (n as f32) * 0.5;
        sim.pointer_moved(x, 400.0);
    }
    if n % 240 == 120 {
        sim.key_down('d');
    }
    if n % 240 == 180 {
        sim.key_up('d');
    }
}

fn main() {
    env_logger::init();
    log::info!("Ruins Run (headless) starting...");

    let settings_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(SETTINGS_FILE));
    let settings = Settings::load_or_default(&settings_path);

    match load_player_model(&settings.player_mesh) {
        PlayerModel::Mesh(mesh) => log::info!("Player mesh: {} triangles", mesh.triangle_count()),
        PlayerModel::Fallback => log::info!("Player mesh: built-in figure"),
    }

    let seed = settings.seed.unwrap_or_else(time_seed);
    let mut sim = Simulation::with_settings(seed, &settings);
    let mut clock = FrameClock::new();

    let (mut contacts, mut pickups, mut rollbacks) = (0u32, 0u32, 0u32);
    for n in 0..SCRIPT_FRAMES {
        drive(&mut sim, n);
        let dt = clock.delta(f64::from(n) * FRAME_SECS);
        for event in sim.update(dt) {
            match event {
                FrameEvent::ObstacleContact { .. } => contacts += 1,
                FrameEvent::CollectiblePicked { index } => {
                    pickups += 1;
                    log::info!("Picked collectible {} (score {})", index, sim.world().score);
                }
                FrameEvent::RolledBack => rollbacks += 1,
                FrameEvent::IcicleLanded { index } => log::debug!("Icicle {} landed", index),
                FrameEvent::LevelChanged(t) => log::info!("Level changed: {:?}", t),
            }
        }
    }

    log::info!(
        "Session done: {} contacts, {} rollbacks, {} pickups",
        contacts,
        rollbacks,
        pickups
    );

    match serde_json::to_string_pretty(&sim.snapshot()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize snapshot: {}", e),
    }
}
