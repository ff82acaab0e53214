use serde_json::{Map, Value};
use tracing::debug;

use super::json_scan::json_object_spans;
use crate::domains::scouting::models::RawAgentOutput;

/// One way of pulling a candidate JSON object out of the agent's output.
///
/// Strategies are pure and independent; a `None` means "nothing here", and the
/// recoverer moves on to the next one.
pub trait CandidateStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn extract(&self, output: &RawAgentOutput) -> Option<Map<String, Value>>;
}

/// The last brace-balanced JSON object in the final text.
///
/// Models tend to reason first and answer last, so earlier objects are
/// ignored even when the last one fails to parse.
pub struct LastJsonBlockInText;

impl CandidateStrategy for LastJsonBlockInText {
    fn name(&self) -> &'static str {
        "last_json_block_in_text"
    }

    fn extract(&self, output: &RawAgentOutput) -> Option<Map<String, Value>> {
        let text = output.text.as_deref()?;
        let last = json_object_spans(text).pop()?;

        match serde_json::from_str::<Value>(last) {
            Ok(Value::Object(map)) => Some(map),
            Ok(_) => None,
            Err(e) => {
                debug!(error = %e, "Last JSON block in text did not parse");
                None
            }
        }
    }
}

/// The output payload of the most recent tool call.
pub struct LatestToolResult;

impl CandidateStrategy for LatestToolResult {
    fn name(&self) -> &'static str {
        "latest_tool_result"
    }

    fn extract(&self, output: &RawAgentOutput) -> Option<Map<String, Value>> {
        match &output.tool_results.last()?.output {
            Value::Object(map) => Some(map.clone()),
            // tools that return JSON as a string
            Value::String(s) => match serde_json::from_str::<Value>(s) {
                Ok(Value::Object(map)) => Some(map),
                _ => None,
            },
            _ => None,
        }
    }
}

/// A structured object the gateway parsed on the model's behalf.
pub struct NativeObject;

impl CandidateStrategy for NativeObject {
    fn name(&self) -> &'static str {
        "native_object"
    }

    fn extract(&self, output: &RawAgentOutput) -> Option<Map<String, Value>> {
        output.native_object.as_ref()?.as_object().cloned()
    }
}
