//! Tether Thrust headless runner
//!
//! Flies a short scripted sortie through the built-in levels with no renderer
//! attached. Set `RUST_LOG=info` (or `debug`) to watch the game's own log
//! output; the final state is printed as JSON.

use tether_thrust::scene::SceneMirror;
use tether_thrust::sim::{Game, LevelCatalog, tick};
use tether_thrust::ui::TextHud;
use tether_thrust::{Settings, Tuning};

/// Environment variable holding a JSON tuning document
const TUNING_ENV_KEY: &str = "TETHER_TUNING";

/// One minute of play at 60 Hz
const MAX_FRAMES: u64 = 3600;
/// Frames between stats log lines
const STATS_INTERVAL: u64 = 60;

/// Key events as (frame, key, pressed)
const SCRIPT: &[(u64, &str, bool)] = &[
    // Hop off the start ledge
    (5, "Control", true),
    (5, "a", true),
    (30, "a", false),
    (45, "Control", false),
    // Swing back round and open fire
    (60, "s", true),
    (95, "s", false),
    (100, "Enter", true),
    (102, "Enter", false),
    (130, "Enter", true),
    (132, "Enter", false),
    (160, "Enter", true),
    (162, "Enter", false),
    // Shield up and ride it out
    (200, " ", true),
    (200, "Ctrl", true),
    (230, "Ctrl", false),
    (400, " ", false),
];

fn load_tuning() -> Tuning {
    match std::env::var(TUNING_ENV_KEY) {
        Ok(json) => match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", TUNING_ENV_KEY);
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring unreadable {}: {}", TUNING_ENV_KEY, e);
                Tuning::default()
            }
        },
        Err(_) => Tuning::default(),
    }
}

fn main() {
    env_logger::init();
    log::info!("Tether Thrust (headless) starting...");

    let settings = Settings::load();
    let tuning = load_tuning();
    let mut scene = SceneMirror::new();
    let mut hud = TextHud::default();

    let mut game = match Game::new(LevelCatalog::builtin(), tuning, &settings, &mut scene) {
        Ok(game) => game,
        Err(e) => {
            log::error!("Could not start: {}", e);
            std::process::exit(1);
        }
    };

    for frame in 0..MAX_FRAMES {
        for &(_, key, pressed) in SCRIPT.iter().filter(|(at, ..)| *at == frame) {
            let button = if pressed {
                game.controls.key_down(key)
            } else {
                game.controls.key_up(key)
            };
            if button.is_none() {
                log::warn!("Key {:?} is not bound", key);
            }
        }

        tick(&mut game, &mut scene, &mut hud);

        if frame % STATS_INTERVAL == 0 {
            log::info!("[frame {}] {} ({} visuals)", frame, hud.stats, scene.len());
        }
        if !game.state.is_running() {
            break;
        }
    }

    if let Some(message) = &hud.message {
        log::info!("{}", message);
    }
    match serde_json::to_string_pretty(&game.state) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Could not serialize final state: {}", e),
    }
}
