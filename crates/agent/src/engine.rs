use async_trait::async_trait;
use taskpilot_core::{Result, RunHistory, StepUpdate};
use tokio::sync::mpsc;

/// The opaque browser-automation collaborator.
///
/// One call is one autonomous run: the engine plans and executes the given
/// instruction script against a live browser. Each planning step pushes the
/// engine's current "next goal" into `steps`, in order, at most once per
/// step. The returned history is the ordered list of URLs the run visited.
///
/// Implementations must not buffer or coalesce step notifications, and must
/// keep running even if the step receiver goes away (a disconnected client
/// does not cancel an in-flight run).
#[async_trait]
pub trait AutomationEngine: Send + Sync {
    async fn run(&self, task: &str, steps: mpsc::Sender<StepUpdate>) -> Result<RunHistory>;
}
