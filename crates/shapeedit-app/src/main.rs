//! Main application entry point.

use shapeedit_app::AppConfig;
use std::path::PathBuf;

fn main() {
    env_logger::init();
    log::info!("Starting shapeedit");

    let config = match AppConfig::resolve(std::env::args().nth(1).map(PathBuf::from)) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("shapeedit: {}", e);
            std::process::exit(1);
        }
    };

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    if let Err(e) = shapeedit_app::run(&config, stdin.lock(), stdout.lock()) {
        log::error!("Shell failed: {}", e);
        std::process::exit(1);
    }
}
