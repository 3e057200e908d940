//! Tunnel Run entry point
//!
//! Runs a session on the headless platform. Pass a settings JSON path as the
//! first argument to override the defaults.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use glam::Vec2;
    use rand::Rng;
    use tunnel_run::Settings;
    use tunnel_run::platform::{HeadlessPlatform, run_session};

    env_logger::init();
    log::info!("Tunnel Run (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };
    let seed = settings.seed.unwrap_or_else(|| rand::rng().random());
    log::info!("Game initialized with seed: {seed}");

    let mut platform = HeadlessPlatform::new(Vec2::new(800.0, 600.0), 3).realtime(true);
    let summary = run_session(&mut platform, settings, seed);

    log::info!(
        "{} run(s) in {} ticks, {} quads drawn",
        summary.runs,
        summary.ticks,
        platform.quads_drawn
    );
    for (run, score) in summary.scores.iter().enumerate() {
        log::info!("Run {}: {score}", run + 1);
    }
    if let Some(best) = summary.best() {
        log::info!("Best: {best}");
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No headless host on the web
}
