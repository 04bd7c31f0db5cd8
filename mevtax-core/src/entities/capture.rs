//! Capture feed domain types.

use mevtax_sdk::objects::Address;
use rust_decimal::Decimal;

/// One detected tax-triggering event.
///
/// Created by an event source (live log watcher or the demo feed),
/// appended to the capture ledger, and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureEvent {
    /// Unique id: transaction hash + log index for live events, a
    /// synthetic id for demo events.
    pub id: String,
    /// The taxed bot.
    pub actor: Address,
    /// Detection confidence, 0–100.
    pub confidence: u8,
    /// Applied tax rate in basis points (5000 = 50%).
    pub tax_rate_bps: u32,
    /// Tax collected, in human-readable token units. Always non-negative.
    pub tax_amount: Decimal,
    /// Originating transaction hash; may be empty in demo mode.
    pub tx_hash: String,
    /// Block number as an opaque string; may be empty in demo mode.
    pub block_number: String,
    /// Unix milliseconds when the capture was observed.
    pub observed_at: i64,
}

/// Per-bot running aggregate, one per distinct actor ever observed.
///
/// `total_tax_paid` is the all-time leaderboard statistic; unlike the
/// channel ledger's settled balance it is never reset.
#[derive(Debug, Clone, PartialEq)]
pub struct BotAggregate {
    pub address: Address,
    pub is_licensed: bool,
    pub total_tax_paid: Decimal,
    pub capture_count: u64,
    /// First-seen insertion index; the deterministic leaderboard
    /// tie-break for equal `total_tax_paid`.
    pub seq: u64,
}

/// Headline protocol statistics.
///
/// `total_distributed` and `current_epoch` are fed by an external
/// distribution source and default to zero / one until it reports.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolStats {
    pub total_captured: Decimal,
    pub total_distributed: Decimal,
    pub current_epoch: u64,
    pub capture_count: usize,
    pub bot_count: usize,
}
