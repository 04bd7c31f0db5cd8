//! Capture feed and leaderboard response types.
//!
//! These are the read-side DTOs for the public dashboard: the live
//! capture feed, the per-bot leaderboard, and the headline protocol
//! stats. Decimal amounts serialize as strings (rust_decimal default),
//! which is what the dashboard renders directly.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::address::Address;

/// One detected MEV capture, as shown in the live feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureResponse {
    /// Unique capture id (tx hash + log index, or synthetic in demo mode).
    pub id: String,
    /// The taxed bot.
    pub actor: Address,
    /// Detection confidence, 0–100.
    pub confidence: u8,
    /// Applied tax rate in basis points (5000 = 50%).
    pub tax_rate_bps: u32,
    /// Tax collected, in human-readable token units.
    pub tax_amount: Decimal,
    /// Originating transaction hash (may be empty in demo mode).
    pub tx_hash: String,
    /// Block number as an opaque string.
    pub block_number: String,
    /// Unix milliseconds when the capture was observed.
    pub observed_at: i64,
}

/// Leaderboard entry for a tracked bot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotResponse {
    pub address: Address,
    pub is_licensed: bool,
    /// All-time tax paid; never reset (display statistic, distinct from
    /// the channel ledger's settled balance).
    pub total_tax_paid: Decimal,
    pub capture_count: u64,
}

/// Headline protocol statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsResponse {
    pub total_captured: Decimal,
    pub total_distributed: Decimal,
    pub current_epoch: u64,
    /// Number of captures currently retained in the bounded feed.
    pub capture_count: usize,
    pub bot_count: usize,
}
