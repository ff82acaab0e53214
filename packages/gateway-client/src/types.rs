//! Types produced by an agent run.

use serde::{Deserialize, Serialize};

/// Token usage, summed across every model call of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}

impl Usage {
    pub(crate) fn add(&mut self, other: Usage) {
        self.prompt_tokens += other.prompt_tokens;
        self.completion_tokens += other.completion_tokens;
        self.total_tokens += other.total_tokens;
    }
}

/// Output of one executed tool call, in call order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResult {
    pub tool_call_id: String,
    pub tool_name: String,
    /// Arguments as the model sent them (`Null` when they were not valid JSON).
    pub args: serde_json::Value,
    /// The tool's output payload, or `{"error": ...}` when the call failed.
    pub output: serde_json::Value,
    pub is_error: bool,
}

/// Why the tool loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The model answered without requesting more tools.
    Completed,
    /// The step bound was hit while the model still wanted tools.
    StepLimit,
}

/// Everything the model emitted during a run, channel by channel.
///
/// None of the channels are validated; which one carries the answer is up
/// to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentRun {
    /// Final assistant text, if any non-blank text was produced.
    pub text: Option<String>,
    pub tool_results: Vec<ToolResult>,
    /// Structured object supplied by the gateway in the message's `parsed` field.
    pub object: Option<serde_json::Value>,
    pub steps: usize,
    pub stop_reason: StopReason,
    pub usage: Usage,
}

/// Truncate a string to at most `max_bytes` bytes at a character boundary.
pub fn truncate_to_char_boundary(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while !s.is_char_boundary(end) && end > 0 {
        end -= 1;
    }
    &s[..end]
}
