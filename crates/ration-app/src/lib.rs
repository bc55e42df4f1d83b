pub mod commands;
pub mod config;
pub mod error;
pub mod ipc;
pub mod state;

use tracing_subscriber::{fmt, EnvFilter};

pub use crate::config::AppConfig;
pub use crate::error::{AppError, AppResult};
pub use crate::state::AppState;

/// Install the global subscriber.  Output goes to stderr; stdout carries
/// the JSON protocol.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("ration_app=info,ration_store=info,warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
