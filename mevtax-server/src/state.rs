//! Application state shared across all request handlers.

use mevtax_core::ledger::{CaptureLedger, ChannelLedger, SessionRegistry};
use mevtax_core::processors::SharedCaptureLedger;
use mevtax_sdk::objects::WsServerMessage;
use std::sync::Arc;
use tokio::sync::{RwLock, broadcast};

/// The tax channel ledger and its session registry, behind one lock so
/// that session close (settle, then remove) is a single critical
/// section.
pub struct ChannelHub {
    pub ledger: ChannelLedger,
    pub sessions: SessionRegistry,
}

/// Application state that is shared across all request handlers.
///
/// This is cloneable and cheap to pass around (everything is behind Arc).
/// Each ledger has its own lock; the single writer paths are the capture
/// indexer (captures) and the channel API handlers (channel).
#[derive(Clone)]
pub struct AppState {
    /// Capture feed and per-bot aggregates.
    pub captures: SharedCaptureLedger,
    /// Tax channel ledger plus session registry.
    pub channel: Arc<RwLock<ChannelHub>>,
    /// WebSocket fan-out channel; subscribers get every domain event.
    pub events_tx: broadcast::Sender<WsServerMessage>,
}

impl AppState {
    pub fn new(
        captures: CaptureLedger,
        channel: ChannelLedger,
        events_tx: broadcast::Sender<WsServerMessage>,
    ) -> Self {
        Self {
            captures: Arc::new(RwLock::new(captures)),
            channel: Arc::new(RwLock::new(ChannelHub {
                ledger: channel,
                sessions: SessionRegistry::new(),
            })),
            events_tx,
        }
    }
}
