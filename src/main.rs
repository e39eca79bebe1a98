//! Tile Mover demo entry point
//!
//! Generates a seeded terrain, walks a box across it and logs what happened.
//!
//! - `TILE_MOVER_SEED`: terrain and walker seed
//! - `TILE_MOVER_SETTINGS`: path to a mover settings JSON file
//! - `RUST_LOG=debug`: adds a collision trace summary

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use tile_mover::demo::{self, DemoConfig};
    use tile_mover::settings::MoverSettings;
    use tile_mover::sim::DebugTrace;

    env_logger::init();

    let mut config = DemoConfig::default();
    if let Ok(seed) = std::env::var("TILE_MOVER_SEED") {
        match seed.parse() {
            Ok(seed) => config.seed = seed,
            Err(err) => log::warn!("Ignoring TILE_MOVER_SEED={seed:?}: {err}"),
        }
    }

    let settings = match std::env::var("TILE_MOVER_SETTINGS") {
        Ok(path) => MoverSettings::load(path),
        Err(_) => MoverSettings::default(),
    };

    log::info!(
        "Tile Mover demo: seed {}, {}x{} tiles, {} frames",
        config.seed,
        config.columns,
        config.rows,
        config.frames
    );

    let mut trace = DebugTrace::new();
    let report = match demo::run_observed(&config, &settings, &mut trace) {
        Ok(report) => report,
        Err(err) => {
            log::error!("Demo failed: {err}");
            std::process::exit(1);
        }
    };

    log::info!(
        "Final position ({:.1}, {:.1}), lowest foot position {:.1}",
        report.final_position.x,
        report.final_position.y,
        report.max_bottom
    );
    log::debug!(
        "Collision trace: {} events, {} swept rects, {} hits, {} sticky slope holds",
        trace.events.len(),
        trace.swept_rects().count(),
        trace.hits().count(),
        trace.sticky_count()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No native entry point on wasm; the library is used directly
}
