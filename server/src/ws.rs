use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use futures_util::{SinkExt, StreamExt};
use hoops_shared::protocol::{ClientMsg, ServerMsg};
use tokio::sync::{broadcast, mpsc, oneshot};
use tower_http::cors::CorsLayer;

use crate::game_loop::{GameBroadcast, GameCommand};

/// Shared app state passed to each WebSocket handler
#[derive(Clone)]
pub struct AppState {
    pub game_tx: mpsc::Sender<GameCommand>,
    pub broadcast_tx: broadcast::Sender<GameBroadcast>,
}

/// `GET /ws` with permissive CORS.
pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/ws", get(ws_handler))
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}

/// HTTP handler for WebSocket upgrade
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(app_state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, app_state))
}

async fn handle_socket(socket: WebSocket, app_state: AppState) {
    let (mut sink, mut stream) = socket.split();

    let (resp_tx, resp_rx) = oneshot::channel();
    if app_state
        .game_tx
        .send(GameCommand::ClientJoin { response: resp_tx })
        .await
        .is_err()
    {
        tracing::error!("Failed to send ClientJoin command");
        return;
    }

    let (my_id, welcome) = match resp_rx.await {
        Ok(result) => result,
        Err(_) => {
            tracing::error!("Failed to receive welcome");
            return;
        }
    };

    tracing::info!("Client {} connected", my_id);

    // Subscribe before the welcome goes out so no snapshot is missed
    let mut broadcast_rx = app_state.broadcast_tx.subscribe();

    let sent = match serde_json::to_string(&ServerMsg::Welcome(welcome)) {
        Ok(json) => sink.send(Message::Text(json.into())).await.is_ok(),
        Err(e) => {
            tracing::error!("Failed to encode welcome: {}", e);
            false
        }
    };

    if sent {
        loop {
            tokio::select! {
                // Client -> Server
                msg = stream.next() => {
                    match msg {
                        Some(Ok(Message::Text(text))) => {
                            let cmd = match serde_json::from_str::<ClientMsg>(&text) {
                                Ok(ClientMsg::Input(intents)) => GameCommand::Input { id: my_id, intents },
                                Ok(ClientMsg::Shoot) => GameCommand::Shoot,
                                Ok(ClientMsg::Reset) => GameCommand::Reset,
                                Err(e) => {
                                    tracing::debug!("Client {} sent malformed message: {}", my_id, e);
                                    continue;
                                }
                            };
                            if app_state.game_tx.send(cmd).await.is_err() {
                                tracing::error!("Game loop gone, closing client {}", my_id);
                                break;
                            }
                        }
                        Some(Ok(Message::Close(_))) | None => break,
                        Some(Err(e)) => {
                            tracing::debug!("Client {} socket error: {}", my_id, e);
                            break;
                        }
                        _ => {} // Ignore ping/pong/binary
                    }
                }

                // Server -> Client (broadcast)
                result = broadcast_rx.recv() => {
                    match result {
                        Ok(broadcast) => {
                            let msg = match broadcast {
                                GameBroadcast::Snapshot(snapshot) => ServerMsg::Snapshot(snapshot),
                                GameBroadcast::ShotResult(result) => ServerMsg::ShotResult(result),
                            };
                            if let Ok(json) = serde_json::to_string(&msg) {
                                if sink.send(Message::Text(json.into())).await.is_err() {
                                    break;
                                }
                            }
                        }
                        Err(broadcast::error::RecvError::Lagged(n)) => {
                            // Snapshots are full state, the next one catches up
                            tracing::warn!("Client {} lagged by {} messages", my_id, n);
                        }
                        Err(broadcast::error::RecvError::Closed) => break,
                    }
                }
            }
        }
    }

    let _ = app_state
        .game_tx
        .send(GameCommand::ClientLeave { id: my_id })
        .await;
    tracing::info!("Client {} disconnected", my_id);
}
