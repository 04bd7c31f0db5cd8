//! Tax channel request and response types.
//!
//! The off-chain tax channel aggregates per-bot tax accruals and settles
//! them in bulk. These DTOs cover recording a tax payment, querying
//! pending balances, triggering settlements, and the session lifecycle.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::address::Address;
use super::amount::WeiAmount;

/// Request body for recording an off-chain tax accrual.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordTaxRequest {
    pub participant: Address,
    /// Amount in smallest units; must be positive.
    pub amount: WeiAmount,
    /// Transaction that triggered the tax, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_tx_hash: Option<String>,
}

/// A recorded, not-yet-settled tax payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxPaymentResponse {
    pub participant: Address,
    pub amount: WeiAmount,
    /// Unix milliseconds when the accrual was recorded.
    pub recorded_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_tx_hash: Option<String>,
}

/// Pending (owed minus settled) balance for one participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingBalanceResponse {
    pub participant: Address,
    pub pending: WeiAmount,
}

/// Result of settling a single participant.
///
/// A participant with nothing pending settles to zero with no reference;
/// that is a valid no-op, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementResponse {
    pub participant: Address,
    pub amount_settled: WeiAmount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settlement_ref: Option<String>,
}

/// Per-participant line item inside an epoch settlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementLine {
    pub participant: Address,
    pub amount_settled: WeiAmount,
}

/// Result of a bulk ("epoch") settlement across all participants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpochSettlementResponse {
    pub total_settled: WeiAmount,
    pub participant_count: usize,
    pub settlements: Vec<SettlementLine>,
}

/// Aggregate channel statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelStatsResponse {
    pub is_connected: bool,
    /// Entries with at least one unsettled payment.
    pub active_channels: usize,
    pub active_sessions: usize,
    pub total_pending_tax: WeiAmount,
    pub total_settled_tax: WeiAmount,
    pub pending_payments: usize,
}

/// Request body for opening a channel session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenSessionRequest {
    pub participant: Address,
    pub initial_deposit: WeiAmount,
}

/// An open (or historical) channel session between a bot and the vault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResponse {
    pub session_id: String,
    pub participant: Address,
    pub vault: String,
    /// Deposit allocation per logical participant (bot address and vault).
    pub allocations: HashMap<String, WeiAmount>,
    pub is_active: bool,
    pub created_at: i64,
}
