//! Brick Breaker headless runner
//!
//! Plays the game with the demo autopilot at a fixed timestep and logs how
//! far it gets. Usage:
//!
//! ```text
//! brick-breaker [settings.json|-] [seed] [seconds]
//! ```

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    use std::process::ExitCode;

    use brick_breaker::Settings;
    use brick_breaker::consts::TICKS_PER_SECOND;
    use brick_breaker::sim::{GamePhase, GameState, TickInput, tick};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let settings = match args.next().filter(|arg| arg != "-") {
        Some(path) => match Settings::load(&path) {
            Ok(settings) => settings,
            Err(err) => {
                log::error!("Failed to load settings from {}: {}", path, err);
                return ExitCode::FAILURE;
            }
        },
        None => Settings::default(),
    };
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(0x5eed);
    let seconds: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(300);

    log::info!("Brick Breaker (headless) starting, seed {}", seed);
    let mut state = GameState::new(seed, settings);

    for _ in 0..seconds * u64::from(TICKS_PER_SECOND) {
        let input = TickInput::autopilot(&state);
        tick(&mut state, &input);
        if matches!(state.phase, GamePhase::Over { .. }) {
            break;
        }
    }

    let shapes = state.draw();
    log::info!(
        "Stopped after {} ticks: level {}, {:?}, {} bricks left, {} ball(s), {} shapes on screen",
        state.time_ticks,
        state.level,
        state.phase,
        state.remaining_bricks(),
        state.balls.len(),
        shapes.len()
    );
    ExitCode::SUCCESS
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No headless runner on the web; the library is driven by the host page
}
