//! WebSocket frame types for the live event stream.
//!
//! The `GET /ws` endpoint upgrades to a WebSocket connection and pushes
//! [`WsServerMessage`] JSON frames.
//!
//! # Protocol
//!
//! 1. Immediately after the upgrade the server sends a
//!    [`WsServerMessage::Init`] frame with the most recent captures.
//! 2. Afterwards the server forwards every domain event as its own
//!    frame: `capture`, `bot_licensed`, `tax`, `settlement`,
//!    `epoch_settlement`.
//! 3. The stream has no terminal state; it ends when either side closes
//!    the connection.

use serde::{Deserialize, Serialize};

use super::address::Address;
use super::amount::WeiAmount;
use super::capture::CaptureResponse;

/// Server-to-client WebSocket message.
///
/// Serialized as an internally-tagged JSON object so the client can
/// dispatch on the `"type"` field:
///
/// ```json
/// {"type":"capture","capture":{ ... }}
/// {"type":"settlement","participant":"0x…","amount":"800","settlement_ref":"0x…"}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WsServerMessage {
    /// Snapshot of the most recent captures, sent once on connect.
    Init { captures: Vec<CaptureResponse> },

    /// A new capture was ingested into the feed.
    Capture { capture: CaptureResponse },

    /// A bot registered as licensed.
    BotLicensed { address: Address },

    /// An off-chain tax accrual was recorded.
    Tax {
        participant: Address,
        amount: WeiAmount,
        timestamp: i64,
    },

    /// A participant's pending balance was settled.
    Settlement {
        participant: Address,
        amount: WeiAmount,
        settlement_ref: String,
    },

    /// A bulk settlement across all participants completed.
    EpochSettlement {
        total_settled: WeiAmount,
        participant_count: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_are_tagged_by_type() {
        let frame = WsServerMessage::Tax {
            participant: "0x1234567890123456789012345678901234567890"
                .parse()
                .unwrap(),
            amount: WeiAmount(500),
            timestamp: 1_700_000_000_000,
        };
        let json = serde_json::to_value(&frame).unwrap();
        assert_eq!(json["type"], "tax");
        assert_eq!(json["amount"], "500");

        let back: WsServerMessage = serde_json::from_value(json).unwrap();
        assert_eq!(back, frame);
    }

    #[test]
    fn init_frame_shape() {
        let frame = WsServerMessage::Init { captures: vec![] };
        let json = serde_json::to_value(&frame).unwrap();
        assert_eq!(json["type"], "init");
        assert!(json["captures"].as_array().unwrap().is_empty());
    }
}
