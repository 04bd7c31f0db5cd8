//! Conversions from core domain types to wire DTOs.
//!
//! The core never serializes itself; these functions copy ledger
//! entities into the `mevtax-sdk` response shapes, including the
//! WebSocket frames published by the broadcast sink.

use mevtax_core::entities::capture::{BotAggregate, CaptureEvent, ProtocolStats};
use mevtax_core::entities::channel::{
    ChannelStats, EpochSettlementOutcome, SettlementOutcome, TaxPayment,
};
use mevtax_core::entities::session::ChannelSession;
use mevtax_core::events::ProtocolEvent;
use mevtax_sdk::objects::{
    BotResponse, CaptureResponse, ChannelStatsResponse, EpochSettlementResponse,
    PendingBalanceResponse, SessionResponse, SettlementLine, SettlementResponse, StatsResponse,
    TaxPaymentResponse, WeiAmount, WsServerMessage,
};
use mevtax_sdk::objects::Address;

pub fn capture_response(event: &CaptureEvent) -> CaptureResponse {
    CaptureResponse {
        id: event.id.clone(),
        actor: event.actor.clone(),
        confidence: event.confidence,
        tax_rate_bps: event.tax_rate_bps,
        tax_amount: event.tax_amount,
        tx_hash: event.tx_hash.clone(),
        block_number: event.block_number.clone(),
        observed_at: event.observed_at,
    }
}

pub fn bot_response(aggregate: &BotAggregate) -> BotResponse {
    BotResponse {
        address: aggregate.address.clone(),
        is_licensed: aggregate.is_licensed,
        total_tax_paid: aggregate.total_tax_paid,
        capture_count: aggregate.capture_count,
    }
}

pub fn stats_response(stats: ProtocolStats) -> StatsResponse {
    StatsResponse {
        total_captured: stats.total_captured,
        total_distributed: stats.total_distributed,
        current_epoch: stats.current_epoch,
        capture_count: stats.capture_count,
        bot_count: stats.bot_count,
    }
}

pub fn payment_response(payment: TaxPayment) -> TaxPaymentResponse {
    TaxPaymentResponse {
        participant: payment.participant,
        amount: WeiAmount(payment.amount),
        recorded_at: payment.recorded_at,
        source_tx_hash: payment.source_tx_hash,
    }
}

pub fn pending_response(participant: Address, pending: u128) -> PendingBalanceResponse {
    PendingBalanceResponse {
        participant,
        pending: WeiAmount(pending),
    }
}

pub fn settlement_response(outcome: SettlementOutcome) -> SettlementResponse {
    SettlementResponse {
        participant: outcome.participant,
        amount_settled: WeiAmount(outcome.amount_settled),
        settlement_ref: outcome.settlement_ref,
    }
}

pub fn epoch_settlement_response(outcome: EpochSettlementOutcome) -> EpochSettlementResponse {
    EpochSettlementResponse {
        total_settled: WeiAmount(outcome.total_settled),
        participant_count: outcome.participant_count,
        settlements: outcome
            .settlements
            .into_iter()
            .map(|s| SettlementLine {
                participant: s.participant,
                amount_settled: WeiAmount(s.amount_settled),
            })
            .collect(),
    }
}

pub fn channel_stats_response(stats: ChannelStats) -> ChannelStatsResponse {
    ChannelStatsResponse {
        is_connected: stats.is_connected,
        active_channels: stats.active_channels,
        active_sessions: stats.active_sessions,
        total_pending_tax: WeiAmount(stats.total_pending_tax),
        total_settled_tax: WeiAmount(stats.total_settled_tax),
        pending_payments: stats.pending_payments,
    }
}

pub fn session_response(session: ChannelSession) -> SessionResponse {
    SessionResponse {
        session_id: session.session_id,
        participant: session.participant,
        vault: mevtax_core::entities::session::VAULT_PARTICIPANT.to_owned(),
        allocations: session
            .allocations
            .into_iter()
            .map(|(k, v)| (k, WeiAmount(v)))
            .collect(),
        is_active: session.is_active,
        created_at: session.created_at,
    }
}

/// Convert a domain event into its WebSocket frame.
pub fn event_frame(event: ProtocolEvent) -> WsServerMessage {
    match event {
        ProtocolEvent::Capture(capture) => WsServerMessage::Capture {
            capture: capture_response(&capture),
        },
        ProtocolEvent::BotLicensed { address } => WsServerMessage::BotLicensed { address },
        ProtocolEvent::Tax {
            participant,
            amount,
            timestamp,
        } => WsServerMessage::Tax {
            participant,
            amount: WeiAmount(amount),
            timestamp,
        },
        ProtocolEvent::Settlement {
            participant,
            amount,
            settlement_ref,
        } => WsServerMessage::Settlement {
            participant,
            amount: WeiAmount(amount),
            settlement_ref,
        },
        ProtocolEvent::EpochSettlement {
            total_settled,
            participant_count,
        } => WsServerMessage::EpochSettlement {
            total_settled: WeiAmount(total_settled),
            participant_count,
        },
    }
}
