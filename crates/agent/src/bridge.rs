//! Adapts one engine run into the connection's message flow.

use std::sync::Arc;

use taskpilot_core::{Result, RunResult, StepUpdate};
use tokio::sync::mpsc;
use tracing::debug;

use crate::engine::AutomationEngine;

/// Run one instruction script to completion.
///
/// Step notifications flow through `steps` while the run is in flight; the
/// caller drains the matching receiver. The sender is dropped when the run
/// ends, so a closed receiver doubles as the completion signal. The result
/// is the last URL the run visited, absent when it visited none. Engine
/// failures propagate unchanged.
pub async fn run_task(
    engine: Arc<dyn AutomationEngine>,
    script: String,
    steps: mpsc::Sender<StepUpdate>,
) -> Result<RunResult> {
    let history = engine.run(&script, steps).await?;
    let result = history.last_url().map(str::to_string);
    debug!(visited = history.urls.len(), result = ?result, "run history collected");
    Ok(RunResult::done(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use taskpilot_core::{Error, RunHistory};

    /// Engine double that replays a fixed list of steps and URLs.
    struct ScriptedEngine {
        steps: Vec<&'static str>,
        urls: Vec<&'static str>,
        fail: bool,
    }

    #[async_trait]
    impl AutomationEngine for ScriptedEngine {
        async fn run(
            &self,
            _task: &str,
            steps: mpsc::Sender<StepUpdate>,
        ) -> Result<RunHistory> {
            for goal in &self.steps {
                steps
                    .send(StepUpdate {
                        next_goal: goal.to_string(),
                    })
                    .await
                    .ok();
            }
            if self.fail {
                return Err(Error::Engine("browser crashed".to_string()));
            }
            Ok(RunHistory {
                urls: self.urls.iter().map(|u| u.to_string()).collect(),
            })
        }
    }

    #[tokio::test]
    async fn test_steps_arrive_in_order_without_drops_or_duplicates() {
        let engine = Arc::new(ScriptedEngine {
            steps: vec!["Open Wolt", "Search restaurant", "Checkout"],
            urls: vec![],
            fail: false,
        });
        let (tx, mut rx) = mpsc::channel(8);

        let run = tokio::spawn(run_task(engine, "script".to_string(), tx));

        let mut seen = Vec::new();
        while let Some(step) = rx.recv().await {
            seen.push(step.next_goal);
        }
        assert_eq!(seen, vec!["Open Wolt", "Search restaurant", "Checkout"]);
        run.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_result_is_last_visited_url() {
        let engine = Arc::new(ScriptedEngine {
            steps: vec![],
            urls: vec!["https://a", "https://track.wolt.com/x"],
            fail: false,
        });
        let (tx, _rx) = mpsc::channel(8);

        let result = run_task(engine, "script".to_string(), tx).await.unwrap();
        assert_eq!(result.status, "done");
        assert_eq!(result.result.as_deref(), Some("https://track.wolt.com/x"));
    }

    #[tokio::test]
    async fn test_empty_history_yields_absent_result() {
        let engine = Arc::new(ScriptedEngine {
            steps: vec![],
            urls: vec![],
            fail: false,
        });
        let (tx, _rx) = mpsc::channel(8);

        let result = run_task(engine, "script".to_string(), tx).await.unwrap();
        assert_eq!(result.status, "done");
        assert_eq!(result.result, None);
    }

    #[tokio::test]
    async fn test_engine_failure_propagates() {
        let engine = Arc::new(ScriptedEngine {
            steps: vec!["Open Wolt"],
            urls: vec![],
            fail: true,
        });
        let (tx, mut rx) = mpsc::channel(8);

        let run = tokio::spawn(run_task(engine, "script".to_string(), tx));
        while rx.recv().await.is_some() {}

        let err = run.await.unwrap().unwrap_err();
        assert!(matches!(err, Error::Engine(_)));
    }
}
