//! Server configuration from environment variables.

use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;
/// The shipped sample document, used when no override is set.
pub const DEFAULT_EVENTS_PATH: &str = "data/events.json";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub events_path: PathBuf,
}

impl ServerConfig {
    /// Read configuration from the environment, falling back to defaults:
    /// `AGENDA_EVENTS_PATH` for the event document, `AGENDA_PORT` for the
    /// listen port.
    pub fn from_env() -> Self {
        let events_path = std::env::var("AGENDA_EVENTS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_EVENTS_PATH));

        let port = std::env::var("AGENDA_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        ServerConfig { port, events_path }
    }
}
