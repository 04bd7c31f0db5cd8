//! Settlement backend abstraction.
//!
//! Settling a channel conceptually finalizes a payment on-chain. The
//! ledger only needs an opaque reference for the finalization, so the
//! actual submission lives behind a trait: the shipped implementation is
//! a mock that fabricates references, and a real state-channel client
//! can be dropped in without the ledger noticing.

use mevtax_sdk::objects::Address;
use rand::Rng;

/// Produces settlement references for reconciled balances.
///
/// `submit` is called from inside a ledger critical section and must not
/// block; a real client would enqueue the submission and return a
/// locally-derived reference.
pub trait SettlementBackend: Send + Sync {
    /// Submit a settlement and return its opaque reference.
    fn submit(&self, participant: &Address, amount: u128) -> String;

    /// Whether the backend currently reports a live connection.
    fn is_connected(&self) -> bool;
}

/// Demo backend: always connected, fabricates 32-byte hex references.
#[derive(Debug, Default)]
pub struct MockSettlementBackend;

impl SettlementBackend for MockSettlementBackend {
    fn submit(&self, participant: &Address, amount: u128) -> String {
        let mut rng = rand::rng();
        let reference = format!(
            "0x{:032x}{:032x}",
            rng.random::<u128>(),
            rng.random::<u128>()
        );
        tracing::debug!(%participant, amount, reference, "mock settlement submitted");
        reference
    }

    fn is_connected(&self) -> bool {
        true
    }
}
