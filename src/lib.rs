pub mod cli;
pub mod config;
pub mod logging;
pub mod metrics;
pub mod redis;
pub mod server;

pub use config::Config;
pub use server::Server;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
