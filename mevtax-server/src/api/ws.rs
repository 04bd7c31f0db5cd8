//! `GET /ws` — WebSocket live event stream.
//!
//! Pushes [`WsServerMessage`] JSON frames: an `init` snapshot of recent
//! captures on connect, then every domain event (`capture`,
//! `bot_licensed`, `tax`, `settlement`, `epoch_settlement`) as the
//! ledgers emit them.

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use mevtax_sdk::objects::WsServerMessage;

use crate::state::AppState;
use crate::views::capture_response;

/// Number of captures sent in the `init` frame.
const INIT_SNAPSHOT_SIZE: usize = 20;

pub(crate) async fn event_feed(state: State<AppState>, ws: WebSocketUpgrade) -> impl IntoResponse {
    let app_state = state.0.clone();
    ws.on_upgrade(move |socket| handle_event_ws(socket, app_state))
}

/// Background task that drives a single WebSocket connection.
///
/// 1. Sends the recent-captures snapshot as the first message.
/// 2. Forwards broadcast events until the client disconnects.
async fn handle_event_ws(mut socket: WebSocket, state: AppState) {
    // Subscribe *before* reading the snapshot so an event that races
    // with the read is still captured in the receiver's buffer.
    let mut events_rx = state.events_tx.subscribe();

    let snapshot: Vec<_> = {
        let ledger = state.captures.read().await;
        ledger
            .recent(INIT_SNAPSHOT_SIZE)
            .iter()
            .map(capture_response)
            .collect()
    };

    if send_json(&mut socket, &WsServerMessage::Init { captures: snapshot })
        .await
        .is_err()
    {
        return;
    }

    loop {
        tokio::select! {
            result = events_rx.recv() => {
                match result {
                    Ok(frame) => {
                        if send_json(&mut socket, &frame).await.is_err() {
                            return;
                        }
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(skipped = n, "WS: broadcast receiver lagged");
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => {
                        break;
                    }
                }
            }

            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => {
                        return;
                    }
                    Some(Ok(_)) => {
                        // Inbound frames are ignored; the stream is one-way.
                    }
                    Some(Err(_)) => {
                        return;
                    }
                }
            }
        }
    }

    let _ = socket.send(Message::Close(None)).await;
}

/// Serialize `value` as JSON and send it as a text WebSocket frame.
///
/// Returns `Err(())` if the send fails (client disconnected).
async fn send_json<T: serde::Serialize>(socket: &mut WebSocket, value: &T) -> Result<(), ()> {
    let json = serde_json::to_string(value).map_err(|_| ())?;
    socket
        .send(Message::Text(json.into()))
        .await
        .map_err(|_| ())
}
