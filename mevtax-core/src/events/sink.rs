//! Event sink abstraction.
//!
//! The ledgers emit [`ProtocolEvent`]s through a single registered
//! observer. Delivery is fire-and-forget: the core does not manage
//! subscriber lifecycles, buffer, or retry. Until a real sink is
//! registered the default [`NoopSink`] silently drops everything.

use super::types::ProtocolEvent;

/// Receives domain events emitted by ledger mutations.
///
/// Implementations must be cheap and non-blocking; `emit` is called from
/// inside ledger critical sections.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: ProtocolEvent);
}

/// The default sink: drops every event.
#[derive(Debug, Default)]
pub struct NoopSink;

impl EventSink for NoopSink {
    fn emit(&self, _event: ProtocolEvent) {}
}

/// Test sink that records every emitted event.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: std::sync::Mutex<Vec<ProtocolEvent>>,
}

#[cfg(test)]
impl RecordingSink {
    pub fn take(&self) -> Vec<ProtocolEvent> {
        match self.events.lock() {
            Ok(mut guard) => std::mem::take(&mut *guard),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

#[cfg(test)]
impl EventSink for RecordingSink {
    fn emit(&self, event: ProtocolEvent) {
        if let Ok(mut guard) = self.events.lock() {
            guard.push(event);
        }
    }
}
