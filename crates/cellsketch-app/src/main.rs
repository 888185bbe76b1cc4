//! Main application entry point (native).

#[cfg(feature = "native")]
fn main() {
    use cellsketch_app::{App, AppConfig, ShortcutRegistry};
    use cellsketch_core::GridConfig;
    use std::path::PathBuf;

    env_logger::init();
    log::info!("Starting CellSketch");

    // cellsketch [CONFIG.json]
    let grid = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => match GridConfig::load(&path) {
            Ok(grid) => grid,
            Err(e) => {
                log::error!("{}", e);
                eprintln!("cellsketch: {e}");
                std::process::exit(2);
            }
        },
        None => GridConfig::default(),
    };

    ShortcutRegistry::print_all();

    if let Err(e) = pollster::block_on(App::run(AppConfig::with_grid(grid))) {
        log::error!("{}", e);
        eprintln!("cellsketch: {e}");
        std::process::exit(1);
    }
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
