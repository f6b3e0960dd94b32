use serde::{Deserialize, Serialize};

/// The one configuration message a client sends after connecting.
///
/// `task_type` stays a raw string rather than an enum: an unrecognized
/// value is a defined fallback (empty instruction script), not a parse
/// failure. `details` is deserialized per task type by the dispatcher.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskRequest {
    #[serde(rename = "taskType")]
    pub task_type: String,
    #[serde(default)]
    pub details: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodDetails {
    pub address: String,
    pub restaurant_name: String,
    pub item: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightDetails {
    pub to_city: String,
    pub from_city: String,
    pub date: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: String,
    pub email: String,
    pub phone_number: String,
}

/// One progress notification: the engine's currently planned next action.
/// Serialized onto the socket exactly as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StepUpdate {
    pub next_goal: String,
}

/// Ordered log of URLs the engine navigated to during one run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunHistory {
    pub urls: Vec<String>,
}

impl RunHistory {
    /// The last visited URL, treated as the run's final result.
    pub fn last_url(&self) -> Option<&str> {
        self.urls.last().map(String::as_str)
    }
}

/// Terminal message sent exactly once per successful run.
/// `result: None` serializes to JSON `null`, never omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    pub status: String,
    pub result: Option<String>,
}

impl RunResult {
    pub fn done(result: Option<String>) -> Self {
        Self {
            status: "done".to_string(),
            result,
        }
    }
}
