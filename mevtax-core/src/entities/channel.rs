//! Tax channel domain types.
//!
//! All amounts here are `u128` smallest-unit integers. Decimal display
//! formatting is a presentation concern and never happens in the ledger.

use mevtax_sdk::objects::Address;

/// A single off-chain tax accrual, created by `record_payment` and
/// consumed (cleared) by settlement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxPayment {
    pub participant: Address,
    pub amount: u128,
    /// Unix milliseconds when the accrual was recorded.
    pub recorded_at: i64,
    /// Transaction that triggered the tax, if known.
    pub source_tx_hash: Option<String>,
}

/// Per-participant running balance of tax owed vs. settled.
///
/// Invariant: `total_owed >= total_paid` at all times, so the pending
/// balance `total_owed - total_paid` never underflows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelEntry {
    pub participant: Address,
    /// Cumulative sum of every amount ever recorded.
    pub total_owed: u128,
    /// Cumulative sum settled so far.
    pub total_paid: u128,
    /// Unsettled payments, in insertion order.
    pub pending: Vec<TaxPayment>,
    /// Unix milliseconds of the last settlement (creation time until then).
    pub last_settlement_at: i64,
}

impl ChannelEntry {
    pub fn pending_balance(&self) -> u128 {
        self.total_owed - self.total_paid
    }
}

/// Result of settling a single participant.
///
/// `amount_settled == 0` with no reference means the settlement was a
/// no-op (unknown participant or nothing pending).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementOutcome {
    pub participant: Address,
    pub amount_settled: u128,
    pub settlement_ref: Option<String>,
}

/// One participant's share of an epoch settlement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementShare {
    pub participant: Address,
    pub amount_settled: u128,
}

/// Result of a bulk settlement across all participants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpochSettlementOutcome {
    pub total_settled: u128,
    pub participant_count: usize,
    pub settlements: Vec<SettlementShare>,
}

/// Aggregate channel statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelStats {
    /// Whether the settlement backend reports a live connection.
    pub is_connected: bool,
    /// Entries with at least one unsettled payment.
    pub active_channels: usize,
    pub active_sessions: usize,
    pub total_pending_tax: u128,
    pub total_settled_tax: u128,
    pub pending_payments: usize,
}
