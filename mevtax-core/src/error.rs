//! Ledger error taxonomy.
//!
//! Validation failures are rejected synchronously at the call boundary
//! and are never partially applied: a failed call leaves every ledger
//! exactly as it was. "Unknown participant" on read paths is an expected
//! case and is modeled as `Option` / zero results, not as an error.

use thiserror::Error;

/// Errors produced by ledger mutations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// A capture event failed validation and was not ingested.
    #[error("invalid capture event: {0}")]
    InvalidCapture(&'static str),

    /// Tax accruals must carry a positive amount.
    #[error("tax amount must be positive")]
    NonPositiveAmount,

    /// A cumulative balance would exceed the u128 range.
    #[error("balance overflow for participant {0}")]
    BalanceOverflow(String),
}
