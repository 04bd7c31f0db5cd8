//! Public dashboard API handlers.
//!
//! # Endpoints
//!
//! - `GET  /api/stats`                        – headline protocol stats
//! - `GET  /api/captures?limit=`              – recent captures, newest first
//! - `GET  /api/bots`                         – leaderboard
//! - `GET  /api/bots/{address}`               – single bot aggregate
//! - `GET  /api/channel/stats`                – tax channel statistics
//! - `GET  /api/channel/payments`             – all unsettled payments
//! - `GET  /api/channel/pending/{address}`    – pending balance
//! - `POST /api/channel/tax`                  – record a tax accrual
//! - `POST /api/channel/settle`               – epoch settlement
//! - `POST /api/channel/settle/{address}`     – settle one participant
//! - `POST /api/channel/sessions`             – open a channel session
//! - `DELETE /api/channel/sessions/{address}` – close sessions (settles first)
//!
//! The WebSocket feed lives at `GET /ws` (see [`ws`]).

use axum::{
    Router,
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use mevtax_core::error::LedgerError;
use mevtax_sdk::objects::{Address, AddressParseError};

use crate::state::AppState;

mod captures;
mod channel;
pub mod ws;

/// Build the dashboard API router (everything under `/api`).
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stats", get(captures::get_stats))
        .route("/captures", get(captures::get_captures))
        .route("/bots", get(captures::get_bots))
        .route("/bots/{address}", get(captures::get_bot))
        .route("/channel/stats", get(channel::get_channel_stats))
        .route("/channel/payments", get(channel::get_all_pending))
        .route("/channel/pending/{address}", get(channel::get_pending))
        .route("/channel/tax", post(channel::record_tax))
        .route("/channel/settle", post(channel::settle_all))
        .route("/channel/settle/{address}", post(channel::settle_participant))
        .route("/channel/sessions", post(channel::open_session))
        .route(
            "/channel/sessions/{address}",
            delete(channel::close_session),
        )
}

// ---------------------------------------------------------------------------
// Error handling
// ---------------------------------------------------------------------------

/// Errors that can occur in API handlers.
#[derive(Debug)]
pub(crate) enum ApiError {
    /// A path or body address failed validation.
    InvalidAddress(AddressParseError),
    /// The requested bot is not tracked.
    BotNotFound,
    /// A ledger mutation was rejected.
    Ledger(LedgerError),
}

impl From<LedgerError> for ApiError {
    fn from(e: LedgerError) -> Self {
        ApiError::Ledger(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::InvalidAddress(e) => {
                (StatusCode::BAD_REQUEST, format!("invalid address: {e}")).into_response()
            }
            ApiError::BotNotFound => (StatusCode::NOT_FOUND, "bot not found").into_response(),
            ApiError::Ledger(e @ LedgerError::BalanceOverflow(_)) => {
                tracing::error!(error = %e, "ledger invariant violation");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
            }
            ApiError::Ledger(e) => (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
        }
    }
}

/// Parse a path segment into a validated [`Address`].
pub(crate) fn parse_address(raw: &str) -> Result<Address, ApiError> {
    raw.parse().map_err(ApiError::InvalidAddress)
}
