//! WebSocket transport.
//!
//! Deliberately thin: each accepted socket gets a connection id, a
//! state snapshot, a task forwarding hub broadcasts outward, and a read
//! loop that parses frames and delegates to the coordinator. All
//! decisions live behind [`SessionCoordinator`].
//!
//! [`SessionCoordinator`]: crate::session::SessionCoordinator

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
    routing::get,
    Router,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, info, warn};

use crate::events::{new_connection_id, ClientEvent, SharedEventBus};
use crate::session::SharedSessionCoordinator;

/// Shared handles for request handlers.
#[derive(Clone)]
pub struct AppState {
    pub coordinator: SharedSessionCoordinator,
    pub bus: SharedEventBus,
}

/// Build the router exposing the `/ws` endpoint.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ws", get(ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn serve(state: AppState, bind_addr: &str) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!(addr = bind_addr, "Debate server listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: AppState) {
    let connection_id = new_connection_id();
    info!(connection_id = %connection_id, "Client connected");

    let (mut sender, mut receiver) = socket.split();

    // Subscribe before the snapshot so nothing published in between is
    // missed; buffered broadcasts drain right after the snapshot.
    let mut events = state.bus.subscribe();

    for event in state.coordinator.join_snapshot().await {
        match serde_json::to_string(&event) {
            Ok(json) => {
                if sender.send(Message::Text(json.into())).await.is_err() {
                    debug!(connection_id = %connection_id, "Client left during join");
                    return;
                }
            }
            Err(e) => warn!(error = %e, "Failed to encode snapshot event"),
        }
    }

    // Forward hub broadcasts to this socket.
    let forward_id = connection_id.clone();
    let forward = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => match serde_json::to_string(&event) {
                    Ok(json) => {
                        if sender.send(Message::Text(json.into())).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => warn!(error = %e, "Failed to encode broadcast event"),
                },
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(connection_id = %forward_id, skipped, "Subscriber lagging; events dropped");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    // Read loop. Malformed frames are logged and dropped; they never
    // tear down the connection.
    while let Some(Ok(msg)) = receiver.next().await {
        match msg {
            Message::Text(text) => match serde_json::from_str::<ClientEvent>(&text) {
                Ok(event) => {
                    debug!(
                        connection_id = %connection_id,
                        event_type = event.event_type(),
                        "Event received"
                    );
                    state.coordinator.handle_event(&connection_id, event).await;
                }
                Err(e) => {
                    warn!(connection_id = %connection_id, error = %e, "Dropping malformed frame");
                }
            },
            Message::Close(_) => break,
            _ => {}
        }
    }

    forward.abort();
    state.coordinator.connection_closed(&connection_id).await;
    info!(connection_id = %connection_id, "Client disconnected");
}
