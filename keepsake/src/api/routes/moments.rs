//! Timer, age and countdown routes.
//!
//! The snapshot gives the page its initial render; the WebSocket carries the
//! 1-second frames after that.

use axum::{
    Json, Router,
    extract::State,
    extract::ws::{Message, WebSocket, WebSocketUpgrade},
    response::Response,
    routing::get,
};
use chrono::Utc;
use tokio::sync::broadcast;
use tracing::debug;

use crate::api::server::AppState;
use crate::widgets::{FrameEvent, MomentsSnapshot};

/// Create the moments router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(snapshot))
        .route("/ws", get(stream))
}

/// Current state of every widget, computed on demand.
async fn snapshot(State(state): State<AppState>) -> Json<MomentsSnapshot> {
    Json(state.hub.snapshot(Utc::now()))
}

/// Stream widget frames as they tick.
async fn stream(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    let rx = state.hub.subscribe();
    ws.on_upgrade(move |socket| forward_frames(socket, rx))
}

async fn forward_frames(mut socket: WebSocket, mut rx: broadcast::Receiver<FrameEvent>) {
    loop {
        match rx.recv().await {
            Ok(event) => {
                let Ok(payload) = serde_json::to_string(&event) else {
                    continue;
                };
                if socket.send(Message::Text(payload.into())).await.is_err() {
                    // Client went away; the broadcast keeps running for others.
                    break;
                }
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                // Frames are derived from the wall clock, so dropped ones are
                // not worth replaying.
                debug!(skipped, "slow frame subscriber lagged");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}
