use std::env;
use std::net::SocketAddr;

use canvas::{DEFAULT_RECENT_LIMIT, STATS_RECENT_LIMIT};
use tracing::warn;

const DEFAULT_ADDR: &str = "127.0.0.1:5000";

/// Runtime settings, read once from the environment at startup.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    /// Pre-fill the canvas with the sample city pixels.
    pub seed: bool,
    pub stats_recent_limit: usize,
    pub recent_default_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
            seed: true,
            stats_recent_limit: STATS_RECENT_LIMIT,
            recent_default_limit: DEFAULT_RECENT_LIMIT,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let addr = match env::var("PIXELS_ADDR") {
            Ok(raw) => raw.parse().unwrap_or_else(|err| {
                warn!("invalid PIXELS_ADDR {raw:?}: {err}; using {DEFAULT_ADDR}");
                default_addr()
            }),
            Err(_) => default_addr(),
        };

        Self {
            addr,
            seed: env_var_bool("PIXELS_SEED", true),
            stats_recent_limit: env_var_usize("PIXELS_STATS_RECENT", STATS_RECENT_LIMIT),
            recent_default_limit: env_var_usize("PIXELS_RECENT_LIMIT", DEFAULT_RECENT_LIMIT),
        }
    }
}

fn default_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 5000))
}

fn env_var_usize(key: &str, default: usize) -> usize {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_var_bool(key: &str, default: bool) -> bool {
    env::var(key)
        .ok()
        .and_then(|v| parse_bool(&v))
        .unwrap_or(default)
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
