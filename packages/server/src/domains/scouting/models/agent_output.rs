use gateway_client::{AgentRun, ToolResult};
use serde::Serialize;
use serde_json::Value;

/// Everything the agent produced for one request, before any validation.
///
/// Three independent channels: final text, tool outputs in call order, and a
/// structured object when the gateway supplied one.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAgentOutput {
    pub text: Option<String>,
    pub tool_results: Vec<ToolResult>,
    pub native_object: Option<Value>,
}

impl RawAgentOutput {
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Append a tool result with a generated call id.
    pub fn with_tool_output(mut self, tool_name: &str, output: Value) -> Self {
        let id = format!("call_{}", self.tool_results.len() + 1);
        self.tool_results.push(ToolResult {
            tool_call_id: id,
            tool_name: tool_name.to_string(),
            args: Value::Object(Default::default()),
            output,
            is_error: false,
        });
        self
    }

    pub fn with_native_object(mut self, object: Value) -> Self {
        self.native_object = Some(object);
        self
    }
}

impl From<AgentRun> for RawAgentOutput {
    fn from(run: AgentRun) -> Self {
        Self {
            text: run.text,
            tool_results: run.tool_results,
            native_object: run.object,
        }
    }
}
