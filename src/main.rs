//! Target Gallery headless entry point
//!
//! Drives the simulation at full speed with a synthetic sensor that sweeps the
//! stick around, feeding it through the same ingestion path a real controller
//! uses. Usage: `target-gallery [settings.json] [rounds]`

use std::time::{SystemTime, UNIX_EPOCH};

use glam::Vec2;

use target_gallery::platform::{Backend, LatestInput, Outbound, Reply, SensorSample};
use target_gallery::sim::{GameEvent, GameState, tick};
use target_gallery::Settings;

const DEFAULT_SETTINGS_PATH: &str = "gallery.json";
/// Viewport used when no host window exists
const HEADLESS_VIEWPORT: Vec2 = Vec2::new(1280.0, 720.0);
/// The synthetic sensor reports every few ticks
const SAMPLE_EVERY_TICKS: u64 = 3;

fn main() {
    env_logger::init();
    log::info!("Target Gallery (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings_path = args.next().unwrap_or_else(|| DEFAULT_SETTINGS_PATH.to_string());
    let rounds: u32 = match args.next().map(|s| s.parse()) {
        Some(Ok(n)) => n,
        Some(Err(e)) => {
            log::warn!("Invalid round count: {} - running 1 round", e);
            1
        }
        None => 1,
    };

    let settings = Settings::load(&settings_path);
    let start_ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let seed = settings.seed.unwrap_or(start_ms);
    log::info!("Game initialized with seed: {}", seed);

    let mut state = GameState::with_config(seed, HEADLESS_VIEWPORT, settings.round_config());
    state.input_mode = settings.input_mode;
    let mut backend = Backend::new(&settings);
    let mut input = LatestInput::new(settings.stale_input);
    log::debug!("{:?}", backend.on_connect());

    let ms_per_tick = 1000 / u64::from(settings.tick_rate.max(1));
    let mut completed = 0;
    let mut t: u64 = 0;
    while completed < rounds {
        let now_ms = start_ms + t * ms_per_tick;

        if t % SAMPLE_EVERY_TICKS == 0 {
            let query = synthetic_query(t);
            let handled = backend.handle("/api", &query, now_ms);
            for message in handled.broadcast {
                if let Outbound::Data(entry) = message {
                    match serde_json::to_value(&entry) {
                        Ok(value) => input.store(SensorSample::from_value(&value)),
                        Err(e) => log::warn!("Dropping sample: {}", e),
                    }
                }
            }
        }

        for event in tick(&mut state, &input.read_for_tick()) {
            match event {
                GameEvent::RoundOver { final_score } => {
                    println!("Game over! Your score is {}", final_score);
                    let payload = serde_json::json!({
                        "name": format!("bot-{}", completed + 1),
                        "score": final_score,
                    });
                    if let Err(e) = backend.submit_score(&payload.to_string()) {
                        log::warn!("Score not recorded: {}", e);
                    }
                    completed += 1;
                }
                GameEvent::TimeLabel { seconds } if seconds % 30 == 0 => {
                    log::info!("{} | score {}", target_gallery::sim::time_label(seconds), state.score.score());
                }
                other => log::trace!("{:?}", other),
            }
        }
        t += 1;
    }

    log::info!("{} samples ingested", input.received());
    if let Reply::Ok(body) = backend.handle("/scoreboard", "", start_ms + t * ms_per_tick).reply {
        println!("{}", body);
    }
}

/// Stick position the synthetic sensor reports at tick `t`, as a query string
fn synthetic_query(t: u64) -> String {
    let phase = t as f32;
    let x = (phase * 0.013).sin() * 0.9;
    let y = (phase * 0.021).cos() * 0.7;
    let z = (phase * 0.005).sin();
    format!("x={:.3}&y={:.3}&z={:.3}", x, y, z)
}
