//! HTTP/WebSocket gateway.
//!
//! One websocket connection is one task run: the client sends a single
//! configuration message, the gateway streams step updates back as the
//! engine produces them, then sends exactly one terminal message and
//! closes. Any failure along the way is logged and the connection is
//! closed without a terminal payload.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message as WsMessage, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;
use taskpilot_agent::{run_task, AutomationEngine};
use taskpilot_core::{Error, Result, StepUpdate, TaskRequest};
use tokio::sync::mpsc;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

#[derive(Clone)]
pub struct GatewayState {
    pub engine: Arc<dyn AutomationEngine>,
}

pub fn router(state: GatewayState) -> Router {
    Router::new()
        .route("/ping", get(handle_ping))
        .route("/ws/agent", get(handle_ws_upgrade))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn handle_ping() -> impl IntoResponse {
    Json(json!({ "message": "Server is alive!" }))
}

async fn handle_ws_upgrade(
    ws: WebSocketUpgrade,
    State(state): State<GatewayState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_agent_connection(socket, state))
}

async fn handle_agent_connection(mut socket: WebSocket, state: GatewayState) {
    info!("agent client connected");

    // Uniform policy: every failure is logged locally and the connection
    // closes without a terminal payload. No detail reaches the client.
    match run_agent_session(&mut socket, state).await {
        Ok(()) => info!("agent session completed"),
        Err(e) => error!(error = %e, "agent session failed"),
    }

    let _ = socket.send(WsMessage::Close(None)).await;
}

async fn run_agent_session(socket: &mut WebSocket, state: GatewayState) -> Result<()> {
    let request = receive_config(socket).await?;
    let script = taskpilot_tasks::render_task(&request)?;

    let (steps_tx, mut steps_rx) = mpsc::channel::<StepUpdate>(32);
    let run = tokio::spawn(run_task(state.engine.clone(), script, steps_tx));

    // The engine run owns the only sender, so the channel closing means the
    // run is over and every step was relayed, in production order. If a send
    // fails we return early and drop the join handle: the client is gone but
    // the in-flight run keeps going detached.
    while let Some(step) = steps_rx.recv().await {
        send_text(socket, &serde_json::to_string(&step)?).await?;
    }

    let result = run
        .await
        .map_err(|e| Error::Other(format!("run task aborted: {e}")))??;

    send_text(socket, &serde_json::to_string(&result)?).await
}

async fn send_text(socket: &mut WebSocket, frame: &str) -> Result<()> {
    socket
        .send(WsMessage::Text(frame.to_string()))
        .await
        .map_err(|e| Error::Transport(e.to_string()))
}

/// Block on the single inbound configuration message.
async fn receive_config(socket: &mut WebSocket) -> Result<TaskRequest> {
    loop {
        let msg = socket
            .recv()
            .await
            .ok_or_else(|| Error::Transport("closed before configuration".to_string()))?
            .map_err(|e| Error::Transport(e.to_string()))?;

        match msg {
            WsMessage::Text(text) => return Ok(serde_json::from_str(&text)?),
            WsMessage::Close(_) => {
                return Err(Error::Transport("closed before configuration".to_string()))
            }
            // Ping/pong and binary frames are not configuration; keep waiting.
            _ => continue,
        }
    }
}
