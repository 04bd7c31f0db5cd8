//! Configuration loading.
//!
//! The server reads `mevtax.toml` (path overridable via `--config`) and
//! applies CLI overrides on top. A missing file is not an error: the
//! defaults run the full demo setup.

pub mod file;

pub use file::{FeedConfig, FeedMode, FileConfig};

use mevtax_core::processors::DemoFeedConfig;
use mevtax_core::processors::demo_feed::default_actors;
use mevtax_sdk::objects::Address;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Loads the TOML config file and applies CLI overrides.
pub struct ConfigLoader {
    path: PathBuf,
    listen_override: Option<SocketAddr>,
}

impl ConfigLoader {
    pub fn new(path: &Path, listen_override: Option<SocketAddr>) -> Self {
        Self {
            path: path.to_path_buf(),
            listen_override,
        }
    }

    /// Load the configuration, falling back to defaults when the file
    /// does not exist.
    pub fn load(&self) -> anyhow::Result<FileConfig> {
        let mut config = if self.path.exists() {
            let raw = std::fs::read_to_string(&self.path)?;
            toml::from_str(&raw)?
        } else {
            tracing::warn!(path = %self.path.display(), "config file not found, using defaults");
            FileConfig::default()
        };

        if let Some(listen) = self.listen_override {
            config.server.listen = listen;
        }
        if config.feed.min_interval_ms > config.feed.max_interval_ms {
            anyhow::bail!(
                "feed.min_interval_ms ({}) exceeds feed.max_interval_ms ({})",
                config.feed.min_interval_ms,
                config.feed.max_interval_ms
            );
        }
        Ok(config)
    }
}

/// Convert the `[feed]` section into the demo feed's settings.
///
/// Unparseable actor addresses are logged and skipped; an empty pool
/// falls back to the built-in demo addresses.
pub fn demo_feed_config(feed: &FeedConfig) -> DemoFeedConfig {
    let mut actors: Vec<Address> = Vec::with_capacity(feed.actors.len());
    for raw in &feed.actors {
        match raw.parse() {
            Ok(addr) => actors.push(addr),
            Err(e) => tracing::warn!(actor = %raw, error = %e, "skipping invalid feed actor"),
        }
    }
    if actors.is_empty() {
        actors = default_actors();
    }

    DemoFeedConfig {
        actors,
        min_interval: Duration::from_millis(feed.min_interval_ms),
        max_interval: Duration::from_millis(feed.max_interval_ms),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feed_config_skips_bad_actors_and_falls_back() {
        let feed = FeedConfig {
            actors: vec!["not-an-address".into()],
            ..FeedConfig::default()
        };
        let config = demo_feed_config(&feed);
        assert_eq!(config.actors, default_actors());

        let feed = FeedConfig {
            actors: vec![
                "0x1111111111111111111111111111111111111111".into(),
                "bogus".into(),
            ],
            min_interval_ms: 10,
            max_interval_ms: 20,
            ..FeedConfig::default()
        };
        let config = demo_feed_config(&feed);
        assert_eq!(config.actors.len(), 1);
        assert_eq!(config.min_interval, Duration::from_millis(10));
        assert_eq!(config.max_interval, Duration::from_millis(20));
    }
}
