//! Capture ledger.
//!
//! An append-only, size-bounded log of capture events plus derived
//! per-bot aggregates. The log keeps the most recent
//! [`CAPTURE_LOG_CAPACITY`] events (oldest evicted first); the
//! aggregates and the all-time totals are never evicted.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use mevtax_sdk::objects::Address;
use rust_decimal::Decimal;
use tracing::debug;

use crate::entities::capture::{BotAggregate, CaptureEvent, ProtocolStats};
use crate::error::LedgerError;
use crate::events::{EventSink, NoopSink, ProtocolEvent};

/// Maximum number of capture events retained in the feed.
pub const CAPTURE_LOG_CAPACITY: usize = 1000;

/// Maximum number of events a single `recent` query may return.
pub const MAX_RECENT_LIMIT: usize = 100;

/// The capture feed and its derived per-bot aggregates.
pub struct CaptureLedger {
    /// Most-recent-first bounded log.
    captures: VecDeque<CaptureEvent>,
    bots: HashMap<Address, BotAggregate>,
    /// All-time running sum; unlike the log it is never truncated.
    total_captured: Decimal,
    /// Fed by the external distribution source; zero until it reports.
    total_distributed: Decimal,
    current_epoch: u64,
    /// Next first-seen index handed to a new aggregate.
    next_seq: u64,
    sink: Arc<dyn EventSink>,
}

impl Default for CaptureLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureLedger {
    pub fn new() -> Self {
        Self {
            captures: VecDeque::with_capacity(CAPTURE_LOG_CAPACITY),
            bots: HashMap::new(),
            total_captured: Decimal::ZERO,
            total_distributed: Decimal::ZERO,
            current_epoch: 1,
            next_seq: 0,
            sink: Arc::new(NoopSink),
        }
    }

    /// Register the event sink. Events emitted before this are dropped.
    pub fn set_sink(&mut self, sink: Arc<dyn EventSink>) {
        self.sink = sink;
    }

    /// Ingest a capture event: append to the bounded log, update the
    /// actor's aggregate and the all-time total, then notify the sink.
    ///
    /// Validation happens before any mutation; a rejected event leaves
    /// the ledger untouched.
    pub fn ingest(&mut self, event: CaptureEvent) -> Result<(), LedgerError> {
        if event.confidence > 100 {
            return Err(LedgerError::InvalidCapture("confidence above 100"));
        }
        if event.tax_amount.is_sign_negative() {
            return Err(LedgerError::InvalidCapture("negative tax amount"));
        }

        self.captures.push_front(event.clone());
        if self.captures.len() > CAPTURE_LOG_CAPACITY {
            self.captures.pop_back();
        }

        self.total_captured += event.tax_amount;

        // Count and sum move together so no reader sees one without the
        // other.
        let seq = self.next_seq;
        let aggregate = self
            .bots
            .entry(event.actor.clone())
            .or_insert_with(|| BotAggregate {
                address: event.actor.clone(),
                is_licensed: false,
                total_tax_paid: Decimal::ZERO,
                capture_count: 0,
                seq,
            });
        if aggregate.seq == seq {
            self.next_seq += 1;
        }
        aggregate.total_tax_paid += event.tax_amount;
        aggregate.capture_count += 1;

        debug!(actor = %event.actor, tax = %event.tax_amount, id = %event.id, "capture ingested");
        self.sink.emit(ProtocolEvent::Capture(event));
        Ok(())
    }

    /// The most recent captures, newest first. `limit` is capped at
    /// [`MAX_RECENT_LIMIT`].
    pub fn recent(&self, limit: usize) -> Vec<CaptureEvent> {
        self.captures
            .iter()
            .take(limit.min(MAX_RECENT_LIMIT))
            .cloned()
            .collect()
    }

    pub fn stats(&self) -> ProtocolStats {
        ProtocolStats {
            total_captured: self.total_captured,
            total_distributed: self.total_distributed,
            current_epoch: self.current_epoch,
            capture_count: self.captures.len(),
            bot_count: self.bots.len(),
        }
    }

    /// All aggregates, descending by total tax paid. Ties break by
    /// first-seen order so the result is deterministic.
    pub fn leaderboard(&self) -> Vec<BotAggregate> {
        let mut board: Vec<BotAggregate> = self.bots.values().cloned().collect();
        board.sort_by(|a, b| {
            b.total_tax_paid
                .cmp(&a.total_tax_paid)
                .then(a.seq.cmp(&b.seq))
        });
        board
    }

    pub fn lookup(&self, address: &Address) -> Option<&BotAggregate> {
        self.bots.get(address)
    }

    /// Mark a bot as licensed, creating the aggregate if this is the
    /// first time the address is seen.
    pub fn mark_licensed(&mut self, address: Address) {
        let seq = self.next_seq;
        let aggregate = self
            .bots
            .entry(address.clone())
            .or_insert_with(|| BotAggregate {
                address: address.clone(),
                is_licensed: false,
                total_tax_paid: Decimal::ZERO,
                capture_count: 0,
                seq,
            });
        if aggregate.seq == seq {
            self.next_seq += 1;
        }
        aggregate.is_licensed = true;

        debug!(%address, "bot licensed");
        self.sink.emit(ProtocolEvent::BotLicensed { address });
    }

    /// Update the distribution figures reported by the external
    /// distribution source.
    pub fn record_distribution(&mut self, total_distributed: Decimal, epoch: u64) {
        self.total_distributed = total_distributed;
        self.current_epoch = epoch;
    }
}
