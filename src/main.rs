//! Neon Runner entry point
//!
//! The browser build is driven from `platform::web` (`WebRunner`). Natively
//! this runs a headless autopilot session as a smoke test.
//!
//! Environment:
//! - `NEON_RUNNER_TUNING`: path to a tuning JSON file
//! - `NEON_RUNNER_SEED`: RNG seed (default 42)
//! - `NEON_RUNNER_SECONDS`: simulated duration (default 120)

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use neon_runner::Tuning;
    use neon_runner::platform::HeadlessSession;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Neon Runner (headless) starting...");

    let tuning = match std::env::var_os("NEON_RUNNER_TUNING") {
        Some(path) => match Tuning::from_path(&path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.to_string_lossy());
                tuning
            }
            Err(err) => {
                log::error!("{}", err);
                std::process::exit(1);
            }
        },
        None => Tuning::default(),
    };

    let seed = env_number("NEON_RUNNER_SEED").unwrap_or(42);
    let seconds = env_number("NEON_RUNNER_SECONDS").unwrap_or(120);

    let mut session = match HeadlessSession::new(seed, tuning, 1000.0 / 60.0) {
        Ok(session) => session,
        Err(err) => {
            log::error!("{}", err);
            std::process::exit(1);
        }
    };
    session.run(seconds * 60);

    log::info!(
        "Simulated {} frames: {} crashes, score {}, best {}, difficulty {:.2}",
        session.frames,
        session.crashes,
        session.state.score(),
        session.state.best_score(),
        session.state.difficulty()
    );
}

#[cfg(not(target_arch = "wasm32"))]
fn env_number(key: &str) -> Option<u64> {
    let value = std::env::var(key).ok()?;
    match value.parse() {
        Ok(n) => Some(n),
        Err(_) => {
            log::warn!("Ignoring non-numeric {}={:?}", key, value);
            None
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::init, this is just to satisfy the compiler
}
