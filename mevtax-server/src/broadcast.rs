//! WebSocket broadcast sink.
//!
//! Implements the core's [`EventSink`] by converting every domain event
//! into its wire frame and publishing it on a `tokio::sync::broadcast`
//! channel. Delivery is fire-and-forget: with no WebSocket client
//! connected the send simply finds no receivers.

use mevtax_core::events::{EventSink, ProtocolEvent};
use mevtax_sdk::objects::WsServerMessage;
use tokio::sync::broadcast;

use crate::views::event_frame;

/// Fans domain events out to WebSocket subscribers.
pub struct BroadcastSink {
    tx: broadcast::Sender<WsServerMessage>,
}

impl BroadcastSink {
    pub fn new(tx: broadcast::Sender<WsServerMessage>) -> Self {
        Self { tx }
    }
}

impl EventSink for BroadcastSink {
    fn emit(&self, event: ProtocolEvent) {
        // Err means no subscribers right now; that is fine.
        let _ = self.tx.send(event_frame(event));
    }
}
