//! Capture feed and leaderboard handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;

use super::{ApiError, parse_address};
use crate::state::AppState;
use crate::views::{bot_response, capture_response, stats_response};

/// Default number of captures returned when no limit is given.
const DEFAULT_CAPTURE_LIMIT: usize = 50;

/// `GET /api/stats` — headline protocol statistics.
pub(super) async fn get_stats(state: State<AppState>) -> impl IntoResponse {
    let ledger = state.captures.read().await;
    Json(stats_response(ledger.stats()))
}

#[derive(Debug, Deserialize)]
pub(super) struct CapturesQuery {
    limit: Option<String>,
}

/// `GET /api/captures?limit=` — recent captures, newest first.
///
/// Missing, non-integer or negative limits fall back to the default;
/// the ledger caps the result at its own maximum.
pub(super) async fn get_captures(
    state: State<AppState>,
    Query(query): Query<CapturesQuery>,
) -> impl IntoResponse {
    let limit = query
        .limit
        .and_then(|raw| raw.parse::<usize>().ok())
        .unwrap_or(DEFAULT_CAPTURE_LIMIT);
    let ledger = state.captures.read().await;
    let captures: Vec<_> = ledger.recent(limit).iter().map(capture_response).collect();
    Json(captures)
}

/// `GET /api/bots` — leaderboard, descending by total tax paid.
pub(super) async fn get_bots(state: State<AppState>) -> impl IntoResponse {
    let ledger = state.captures.read().await;
    let bots: Vec<_> = ledger.leaderboard().iter().map(bot_response).collect();
    Json(bots)
}

/// `GET /api/bots/{address}` — a single bot aggregate.
pub(super) async fn get_bot(
    state: State<AppState>,
    Path(address): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let address = parse_address(&address)?;
    let ledger = state.captures.read().await;
    let aggregate = ledger.lookup(&address).ok_or(ApiError::BotNotFound)?;
    Ok(Json(bot_response(aggregate)))
}
