//! TOML file configuration structures.
//!
//! These structs directly map to the `mevtax.toml` file format. Every
//! field has a default so the server can start with no config file at
//! all (demo mode out of the box).

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Root configuration structure as read from the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub feed: FeedConfig,
}

/// Server configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The address and port to listen on (e.g., "0.0.0.0:3001").
    #[serde(default = "default_listen_addr")]
    pub listen: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen_addr(),
        }
    }
}

fn default_listen_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 3001))
}

/// Capture feed configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Which event source feeds the capture ledger.
    #[serde(default)]
    pub mode: FeedMode,
    /// Shortest pause between synthetic captures, in milliseconds.
    #[serde(default = "default_min_interval_ms")]
    pub min_interval_ms: u64,
    /// Longest pause between synthetic captures, in milliseconds.
    #[serde(default = "default_max_interval_ms")]
    pub max_interval_ms: u64,
    /// Actor pool for synthetic captures; the built-in demo addresses
    /// are used when empty.
    #[serde(default)]
    pub actors: Vec<String>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            mode: FeedMode::default(),
            min_interval_ms: default_min_interval_ms(),
            max_interval_ms: default_max_interval_ms(),
            actors: Vec::new(),
        }
    }
}

fn default_min_interval_ms() -> u64 {
    5_000
}

fn default_max_interval_ms() -> u64 {
    15_000
}

/// Capture event source selection.
///
/// `demo` runs the synthetic generator; `off` starts no source, leaving
/// the capture channel for an external producer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedMode {
    #[default]
    Demo,
    Off,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config_parsing() {
        let toml_str = r#"
[server]
listen = "127.0.0.1:3000"

[feed]
mode = "demo"
min_interval_ms = 100
max_interval_ms = 250
actors = ["0x1234567890123456789012345678901234567890"]
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.listen.port(), 3000);
        assert_eq!(config.feed.mode, FeedMode::Demo);
        assert_eq!(config.feed.min_interval_ms, 100);
        assert_eq!(config.feed.actors.len(), 1);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.listen.port(), 3001);
        assert_eq!(config.feed.mode, FeedMode::Demo);
        assert_eq!(config.feed.min_interval_ms, 5_000);
        assert_eq!(config.feed.max_interval_ms, 15_000);
        assert!(config.feed.actors.is_empty());
    }

    #[test]
    fn test_feed_can_be_disabled() {
        let config: FileConfig = toml::from_str("[feed]\nmode = \"off\"\n").unwrap();
        assert_eq!(config.feed.mode, FeedMode::Off);
    }
}
