//! Domain event definitions.
//!
//! Ledger mutations emit these events towards the registered
//! [`EventSink`](super::sink::EventSink). Events carry already-copied
//! data; the sink never reads back into the ledgers.

use mevtax_sdk::objects::Address;

use crate::entities::capture::CaptureEvent;

/// An event emitted by a ledger mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum ProtocolEvent {
    /// A capture was ingested into the feed.
    Capture(CaptureEvent),

    /// A bot registered as licensed.
    BotLicensed { address: Address },

    /// An off-chain tax accrual was recorded.
    Tax {
        participant: Address,
        amount: u128,
        timestamp: i64,
    },

    /// A participant's pending balance was settled.
    Settlement {
        participant: Address,
        amount: u128,
        settlement_ref: String,
    },

    /// A bulk settlement across all participants completed.
    EpochSettlement {
        total_settled: u128,
        participant_count: usize,
    },
}
