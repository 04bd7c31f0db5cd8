//! Tax channel handlers.
//!
//! These expose the off-chain tax channel: recording accruals, querying
//! pending balances, settlements (single and epoch), and the session
//! lifecycle. All mutations take the channel hub's write lock, so each
//! operation is one atomic critical section.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use mevtax_sdk::objects::{OpenSessionRequest, RecordTaxRequest};

use super::{ApiError, parse_address};
use crate::state::AppState;
use crate::views::{
    channel_stats_response, epoch_settlement_response, payment_response, pending_response,
    session_response, settlement_response,
};

/// `GET /api/channel/stats` — aggregate channel statistics.
pub(super) async fn get_channel_stats(state: State<AppState>) -> impl IntoResponse {
    let hub = state.channel.read().await;
    let active_sessions = hub.sessions.active_count();
    Json(channel_stats_response(hub.ledger.stats(active_sessions)))
}

/// `GET /api/channel/payments` — all unsettled payments, newest first.
pub(super) async fn get_all_pending(state: State<AppState>) -> impl IntoResponse {
    let hub = state.channel.read().await;
    let payments: Vec<_> = hub
        .ledger
        .all_pending()
        .into_iter()
        .map(payment_response)
        .collect();
    Json(payments)
}

/// `GET /api/channel/pending/{address}` — pending balance for one
/// participant (zero if unknown).
pub(super) async fn get_pending(
    state: State<AppState>,
    Path(address): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let address = parse_address(&address)?;
    let hub = state.channel.read().await;
    let pending = hub.ledger.pending_balance(&address);
    Ok(Json(pending_response(address, pending)))
}

/// `POST /api/channel/tax` — record an off-chain tax accrual.
pub(super) async fn record_tax(
    state: State<AppState>,
    Json(body): Json<RecordTaxRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let mut hub = state.channel.write().await;
    let payment = hub.ledger.record_payment(
        body.participant,
        body.amount.value(),
        body.source_tx_hash,
    )?;
    Ok((StatusCode::CREATED, Json(payment_response(payment))))
}

/// `POST /api/channel/settle/{address}` — settle one participant.
///
/// Settling a participant with nothing pending returns a zero-amount
/// result, not an error.
pub(super) async fn settle_participant(
    state: State<AppState>,
    Path(address): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let address = parse_address(&address)?;
    let mut hub = state.channel.write().await;
    let outcome = hub.ledger.settle(&address);
    Ok(Json(settlement_response(outcome)))
}

/// `POST /api/channel/settle` — epoch settlement across all
/// participants with a positive pending balance.
pub(super) async fn settle_all(state: State<AppState>) -> impl IntoResponse {
    let mut hub = state.channel.write().await;
    let outcome = hub.ledger.settle_all();
    Json(epoch_settlement_response(outcome))
}

/// `POST /api/channel/sessions` — open a channel session.
pub(super) async fn open_session(
    state: State<AppState>,
    Json(body): Json<OpenSessionRequest>,
) -> impl IntoResponse {
    let mut guard = state.channel.write().await;
    let hub = &mut *guard;
    let session = hub
        .sessions
        .open(&mut hub.ledger, body.participant, body.initial_deposit.value());
    (StatusCode::CREATED, Json(session_response(session)))
}

/// `DELETE /api/channel/sessions/{address}` — close every session for a
/// participant, settling their ledger entry first. No-op if none exist.
pub(super) async fn close_session(
    state: State<AppState>,
    Path(address): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let address = parse_address(&address)?;
    let mut guard = state.channel.write().await;
    let hub = &mut *guard;
    hub.sessions.close(&mut hub.ledger, &address);
    Ok(StatusCode::NO_CONTENT)
}
