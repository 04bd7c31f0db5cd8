//! Channel session domain types.

use mevtax_sdk::objects::Address;
use std::collections::HashMap;

/// Logical identifier of the protocol vault inside session allocations.
pub const VAULT_PARTICIPANT: &str = "mevtax-vault";

/// A logical off-chain channel between a bot and the protocol vault.
///
/// Opened before tax accrual is tracked for a participant; closing it
/// forces a final settlement of the participant's ledger entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelSession {
    /// Unique id derived from the participant and a time-ordered suffix,
    /// unique even under same-millisecond opens.
    pub session_id: String,
    pub participant: Address,
    /// Deposit allocation per logical participant; the vault side starts
    /// at zero.
    pub allocations: HashMap<String, u128>,
    pub is_active: bool,
    /// Unix milliseconds when the session was opened.
    pub created_at: i64,
}
