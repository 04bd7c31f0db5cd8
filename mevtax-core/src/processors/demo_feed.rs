//! DemoCaptureFeed processor.
//!
//! When no live contract deployment is available the backend fabricates
//! capture events so the dashboard has something to show. The feed picks
//! a random actor from a fixed pool on a randomized interval and emits a
//! synthetic capture whose tax rate tiers on the fabricated detection
//! confidence.

use std::time::Duration;

use mevtax_sdk::objects::Address;
use rand::Rng;
use rust_decimal::Decimal;
use tokio::sync::watch;
use tracing::{info, warn};
use uuid::Uuid;

use crate::entities::capture::CaptureEvent;
use crate::entities::unix_ms;
use crate::events::CaptureEventSender;

/// Settings for the synthetic capture generator.
#[derive(Debug, Clone)]
pub struct DemoFeedConfig {
    /// Actor pool captures are attributed to.
    pub actors: Vec<Address>,
    /// Shortest pause between captures.
    pub min_interval: Duration,
    /// Longest pause between captures.
    pub max_interval: Duration,
}

impl Default for DemoFeedConfig {
    fn default() -> Self {
        Self {
            actors: default_actors(),
            min_interval: Duration::from_secs(5),
            max_interval: Duration::from_secs(15),
        }
    }
}

/// The well-known demo bot addresses.
pub fn default_actors() -> Vec<Address> {
    [
        "0x1234567890123456789012345678901234567890",
        "0xabcdefabcdefabcdefabcdefabcdefabcdefabcd",
        "0xdeadbeefdeadbeefdeadbeefdeadbeefdeadbeef",
        "0xcafebabecafebabecafebabecafebabecafebabe",
        "0xfeedfacefeedfacefeedfacefeedfacefeedface",
    ]
    .iter()
    .filter_map(|s| s.parse().ok())
    .collect()
}

/// Emits synthetic capture events on a randomized interval.
pub struct DemoCaptureFeed {
    config: DemoFeedConfig,
    capture_tx: CaptureEventSender,
    shutdown_rx: watch::Receiver<bool>,
}

impl DemoCaptureFeed {
    pub fn new(
        config: DemoFeedConfig,
        capture_tx: CaptureEventSender,
        shutdown_rx: watch::Receiver<bool>,
    ) -> Self {
        Self {
            config,
            capture_tx,
            shutdown_rx,
        }
    }

    /// Run the DemoCaptureFeed until shutdown or channel closure.
    pub async fn run(mut self) {
        if self.config.actors.is_empty() {
            warn!("demo feed has no actors configured, not starting");
            return;
        }
        info!(
            actors = self.config.actors.len(),
            "DemoCaptureFeed started"
        );

        loop {
            let delay = {
                let mut rng = rand::rng();
                jitter(&mut rng, self.config.min_interval, self.config.max_interval)
            };

            tokio::select! {
                biased;

                _ = self.shutdown_rx.changed() => {
                    if *self.shutdown_rx.borrow() {
                        info!("DemoCaptureFeed received shutdown signal");
                        break;
                    }
                }

                _ = tokio::time::sleep(delay) => {
                    let capture = {
                        let mut rng = rand::rng();
                        synth_capture(&mut rng, &self.config.actors)
                    };
                    if let Some(capture) = capture {
                        if self.capture_tx.send(capture).await.is_err() {
                            info!("capture channel closed");
                            break;
                        }
                    }
                }
            }
        }

        info!("DemoCaptureFeed shutdown complete");
    }
}

/// Pick a pause duration in `[min, max]`.
fn jitter(rng: &mut impl Rng, min: Duration, max: Duration) -> Duration {
    let span = max.saturating_sub(min).as_millis() as u64;
    min + Duration::from_millis(rng.random_range(0..=span))
}

/// Fabricate one capture event.
///
/// Confidence lands in 60–99 and drives the tax rate tier (50% above 80,
/// 25% above 60, 10% otherwise, in basis points); the tax amount is an
/// exact four-decimal value between 0.0100 and 0.5099.
fn synth_capture(rng: &mut impl Rng, actors: &[Address]) -> Option<CaptureEvent> {
    if actors.is_empty() {
        return None;
    }
    let actor = actors.get(rng.random_range(0..actors.len()))?.clone();
    let confidence: u8 = 60 + rng.random_range(0..40u8);
    let tax_rate_bps = if confidence >= 80 {
        5000
    } else if confidence >= 60 {
        2500
    } else {
        1000
    };
    let tax_amount = Decimal::new(rng.random_range(100..5100i64), 4);

    Some(CaptureEvent {
        id: format!("demo-{}", Uuid::new_v4().simple()),
        actor,
        confidence,
        tax_rate_bps,
        tax_amount,
        tx_hash: format!(
            "0x{:032x}{:032x}",
            rng.random::<u128>(),
            rng.random::<u128>()
        ),
        block_number: (18_000_000 + rng.random_range(0..1_000_000u64)).to_string(),
        observed_at: unix_ms(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::capture_event_channel;

    #[test]
    fn synthetic_captures_are_well_formed() {
        let actors = default_actors();
        assert_eq!(actors.len(), 5);
        let mut rng = rand::rng();

        for _ in 0..200 {
            let capture = synth_capture(&mut rng, &actors).unwrap();
            assert!(capture.id.starts_with("demo-"));
            assert!((60..100).contains(&capture.confidence));
            let expected_rate = if capture.confidence >= 80 { 5000 } else { 2500 };
            assert_eq!(capture.tax_rate_bps, expected_rate);
            assert!(capture.tax_amount >= Decimal::new(100, 4));
            assert!(capture.tax_amount < Decimal::new(5100, 4));
            assert_eq!(capture.tx_hash.len(), 66);
            assert!(actors.contains(&capture.actor));
        }
    }

    #[test]
    fn synth_capture_handles_empty_pool() {
        let mut rng = rand::rng();
        assert!(synth_capture(&mut rng, &[]).is_none());
    }

    #[test]
    fn jitter_stays_in_bounds() {
        let mut rng = rand::rng();
        let min = Duration::from_millis(100);
        let max = Duration::from_millis(300);
        for _ in 0..100 {
            let d = jitter(&mut rng, min, max);
            assert!(d >= min && d <= max);
        }
        assert_eq!(jitter(&mut rng, min, min), min);
    }

    #[tokio::test]
    async fn feed_emits_captures_until_shutdown() {
        let (tx, mut rx) = capture_event_channel();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let config = DemoFeedConfig {
            min_interval: Duration::from_millis(1),
            max_interval: Duration::from_millis(2),
            ..DemoFeedConfig::default()
        };

        let handle = tokio::spawn(DemoCaptureFeed::new(config, tx, shutdown_rx).run());

        let first = rx.recv().await.unwrap();
        assert!(first.id.starts_with("demo-"));

        shutdown_tx.send(true).unwrap();
        handle.await.unwrap();
    }
}
