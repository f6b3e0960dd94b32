//! Task-type dispatch: pick and parametrize the instruction template.

use serde_json::from_value;
use taskpilot_core::{Error, FlightDetails, FoodDetails, Result, TaskRequest};
use tracing::warn;

use crate::templates;

/// Render the instruction script for a parsed configuration message.
///
/// An unrecognized (or missing) `taskType` yields an empty script, not an
/// error: the run still happens, the engine just receives nothing to do.
/// A recognized type with incomplete `details` is rejected before any
/// automation run starts.
pub fn render_task(request: &TaskRequest) -> Result<String> {
    match request.task_type.as_str() {
        "food" => {
            let details: FoodDetails = from_value(request.details.clone())
                .map_err(|e| Error::Validation(format!("food details: {e}")))?;
            Ok(templates::food_order(&details))
        }
        "flight" => {
            let details: FlightDetails = from_value(request.details.clone())
                .map_err(|e| Error::Validation(format!("flight details: {e}")))?;
            Ok(templates::flight_booking(&details))
        }
        other => {
            warn!(task_type = %other, "unknown task type, rendering empty script");
            Ok(String::new())
        }
    }
}
