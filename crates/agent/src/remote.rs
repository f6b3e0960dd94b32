//! Client for the external browser-automation engine sidecar.
//!
//! `POST {base}/v1/runs` starts a run; the response body is a stream of
//! newline-delimited JSON events until the run finishes:
//!
//! ```text
//! {"event":"step","next_goal":"Open Wolt"}
//! {"event":"done","urls":["https://wolt.com","https://track.wolt.com/x"]}
//! {"event":"error","message":"browser crashed"}
//! ```
//!
//! Retry, timeout and planning policy all live on the engine side; this
//! client only relays.

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use taskpilot_core::{EngineConfig, Error, Result, RunHistory, StepUpdate};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::engine::AutomationEngine;

#[derive(Debug, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum EngineEvent {
    Step {
        next_goal: String,
    },
    Done {
        #[serde(default)]
        urls: Vec<String>,
    },
    Error {
        message: String,
    },
}

fn parse_event(line: &str) -> Option<EngineEvent> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    match serde_json::from_str(line) {
        Ok(event) => Some(event),
        Err(e) => {
            debug!(error = %e, line = %line, "ignoring unparseable engine event");
            None
        }
    }
}

pub struct RemoteEngine {
    client: Client,
    config: EngineConfig,
}

impl RemoteEngine {
    pub fn new(config: EngineConfig) -> Self {
        // No overall request timeout: a run legitimately takes minutes.
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();
        Self { client, config }
    }
}

#[async_trait]
impl AutomationEngine for RemoteEngine {
    async fn run(&self, task: &str, steps: mpsc::Sender<StepUpdate>) -> Result<RunHistory> {
        let run_id = uuid::Uuid::new_v4();
        info!(%run_id, model = %self.config.model, "starting automation run");

        let response = self
            .client
            .post(format!("{}/v1/runs", self.config.url))
            .bearer_auth(&self.config.api_key)
            .json(&serde_json::json!({
                "task": task,
                "model": self.config.model,
            }))
            .send()
            .await
            .map_err(|e| Error::Engine(format!("engine request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Engine(format!("engine returned {status}")));
        }

        let mut stream = response.bytes_stream();
        let mut buf: Vec<u8> = Vec::new();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| Error::Engine(format!("engine stream failed: {e}")))?;
            buf.extend_from_slice(&chunk);

            while let Some(pos) = buf.iter().position(|&b| b == b'\n') {
                let line: Vec<u8> = buf.drain(..=pos).collect();
                match parse_event(&String::from_utf8_lossy(&line)) {
                    Some(EngineEvent::Step { next_goal }) => {
                        // The observer going away must not end the run.
                        if steps.send(StepUpdate { next_goal }).await.is_err() {
                            debug!(%run_id, "step observer dropped, run continues");
                        }
                    }
                    Some(EngineEvent::Done { urls }) => {
                        info!(%run_id, visited = urls.len(), "automation run finished");
                        return Ok(RunHistory { urls });
                    }
                    Some(EngineEvent::Error { message }) => {
                        return Err(Error::Engine(message));
                    }
                    None => {}
                }
            }
        }

        Err(Error::Engine(
            "engine stream ended without a terminal event".to_string(),
        ))
    }
}
