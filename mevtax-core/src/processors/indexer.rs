//! CaptureIndexer processor.
//!
//! The CaptureIndexer is responsible for:
//! - Receiving `CaptureEvent`s from the capture channel
//! - Applying each event to the shared capture ledger
//! - Logging and dropping events that fail validation
//!
//! The indexer is the single writer path into the capture ledger; API
//! handlers only read. Which source feeds the channel (demo feed or a
//! live log watcher) is invisible here.

use std::sync::Arc;

use tokio::sync::{RwLock, watch};
use tracing::{debug, info, warn};

use crate::events::CaptureEventReceiver;
use crate::ledger::CaptureLedger;

/// Shared handle to the capture ledger.
pub type SharedCaptureLedger = Arc<RwLock<CaptureLedger>>;

/// Drains the capture channel into the capture ledger.
pub struct CaptureIndexer {
    ledger: SharedCaptureLedger,
    capture_rx: CaptureEventReceiver,
    shutdown_rx: watch::Receiver<bool>,
}

impl CaptureIndexer {
    pub fn new(
        ledger: SharedCaptureLedger,
        capture_rx: CaptureEventReceiver,
        shutdown_rx: watch::Receiver<bool>,
    ) -> Self {
        Self {
            ledger,
            capture_rx,
            shutdown_rx,
        }
    }

    /// Run the CaptureIndexer until shutdown or channel closure.
    pub async fn run(mut self) {
        info!("CaptureIndexer started");

        loop {
            tokio::select! {
                biased;

                _ = self.shutdown_rx.changed() => {
                    if *self.shutdown_rx.borrow() {
                        info!("CaptureIndexer received shutdown signal");
                        break;
                    }
                }

                Some(event) = self.capture_rx.recv() => {
                    let actor = event.actor.clone();
                    debug!(%actor, id = %event.id, "received capture event");
                    if let Err(e) = self.ledger.write().await.ingest(event) {
                        warn!(%actor, error = %e, "rejected capture event");
                    }
                }

                else => {
                    info!("capture channel closed");
                    break;
                }
            }
        }

        info!("CaptureIndexer shutdown complete");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::capture::CaptureEvent;
    use crate::events::capture_event_channel;
    use mevtax_sdk::objects::Address;
    use rust_decimal::Decimal;

    fn capture(id: &str, confidence: u8) -> CaptureEvent {
        let actor: Address = "0x1234567890123456789012345678901234567890"
            .parse()
            .unwrap();
        CaptureEvent {
            id: id.to_owned(),
            actor,
            confidence,
            tax_rate_bps: 2500,
            tax_amount: Decimal::new(25, 2),
            tx_hash: String::new(),
            block_number: String::new(),
            observed_at: 0,
        }
    }

    #[tokio::test]
    async fn drains_channel_into_ledger_and_skips_invalid() {
        let ledger: SharedCaptureLedger = Arc::new(RwLock::new(CaptureLedger::new()));
        let (tx, rx) = capture_event_channel();
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);

        let handle = tokio::spawn(CaptureIndexer::new(ledger.clone(), rx, shutdown_rx).run());

        tx.send(capture("c1", 80)).await.unwrap();
        tx.send(capture("bad", 150)).await.unwrap();
        tx.send(capture("c2", 60)).await.unwrap();
        drop(tx); // closes the channel, ending the run loop

        handle.await.unwrap();

        let guard = ledger.read().await;
        let stats = guard.stats();
        assert_eq!(stats.capture_count, 2);
        assert_eq!(guard.recent(10)[0].id, "c2");
    }

    #[tokio::test]
    async fn stops_on_shutdown_signal() {
        let ledger: SharedCaptureLedger = Arc::new(RwLock::new(CaptureLedger::new()));
        let (_tx, rx) = capture_event_channel();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let handle = tokio::spawn(CaptureIndexer::new(ledger, rx, shutdown_rx).run());
        shutdown_tx.send(true).unwrap();
        handle.await.unwrap();
    }
}
