//! CLI command implementations.

mod config;
mod discover;
mod doctor;
mod mcp;
mod probe;
mod serve;

pub use config::run_config;
pub use discover::run_discover;
pub use doctor::run_doctor;
pub use mcp::run_mcp;
pub use probe::run_probe;
pub use serve::{router, run_serve, AppState};
