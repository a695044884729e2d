//! Salon Desk - operator command line for the salon back office

pub mod commands;
pub mod console;
pub mod logger;
pub mod render;

pub use logger::init_logger_with_file;

/// Load `.env` and install logging
///
/// | Variable | Default |
/// |----------|---------|
/// | LOG_LEVEL | warn |
/// | LOG_DIR | (stderr) |
pub fn setup_environment() {
    let dotenv_loaded = dotenv::dotenv().is_ok();

    let level = std::env::var("LOG_LEVEL").ok();
    let dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(level.as_deref(), dir.as_deref());

    if dotenv_loaded {
        tracing::debug!("Loaded .env");
    }
}
