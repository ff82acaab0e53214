//! Tool calling traits and types.
//!
//! A [`Tool`] has typed arguments and output. The agent stores tools
//! type-erased behind [`ErasedTool`], which speaks JSON on both sides.
//!
//! # Example
//!
//! ```rust,ignore
//! #[derive(Deserialize, JsonSchema)]
//! struct FetchArgs {
//!     url: String,
//! }
//!
//! struct Fetch;
//!
//! #[async_trait]
//! impl Tool for Fetch {
//!     const NAME: &'static str = "fetch";
//!     type Args = FetchArgs;
//!     type Output = String;
//!     type Error = std::io::Error;
//!
//!     fn description(&self) -> &str {
//!         "Fetch a page"
//!     }
//!
//!     async fn call(&self, args: FetchArgs) -> Result<String, std::io::Error> {
//!         Ok(format!("contents of {}", args.url))
//!     }
//! }
//! ```

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::schema::ToolParameters;
use crate::types::ToolResult;

/// A capability the model may invoke.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Name the model uses to call this tool.
    const NAME: &'static str;

    type Args: ToolParameters + Send;
    type Output: Serialize + Send;
    type Error: std::error::Error + Send + Sync + 'static;

    fn description(&self) -> &str;

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error>;

    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: self.description().to_string(),
            parameters: Self::Args::parameters_schema(),
        }
    }
}

/// Declared name, description and parameter schema of a tool.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

impl ToolDefinition {
    /// Chat-completions `tools[]` entry.
    pub fn to_openai_format(&self) -> Value {
        serde_json::json!({
            "type": "function",
            "function": {
                "name": self.name,
                "description": self.description,
                "parameters": self.parameters
            }
        })
    }
}

/// A tool invocation requested by the model.
#[derive(Debug, Clone)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    /// Raw JSON argument string as sent by the model.
    pub arguments: String,
}

impl ToolCall {
    /// Parse one entry of an assistant message's `tool_calls` array.
    pub fn from_openai_value(value: &Value) -> Option<Self> {
        let function = value.get("function")?;
        Some(Self {
            id: value.get("id")?.as_str()?.to_string(),
            name: function.get("name")?.as_str()?.to_string(),
            arguments: function
                .get("arguments")
                .and_then(Value::as_str)
                .unwrap_or("{}")
                .to_string(),
        })
    }

    /// Arguments as JSON, `Null` when the model sent something unparsable.
    pub fn arguments_value(&self) -> Value {
        if self.arguments.trim().is_empty() {
            return Value::Object(Default::default());
        }
        serde_json::from_str(&self.arguments).unwrap_or(Value::Null)
    }
}

/// Error type for erased tool calls.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Failed to parse arguments: {0}")]
    ArgumentParse(String),

    #[error("Tool execution failed: {0}")]
    Execution(String),

    #[error("Failed to serialize output: {0}")]
    OutputSerialize(String),

    #[error("Unknown tool '{0}'")]
    Unknown(String),
}

/// Object-safe view of a [`Tool`].
#[async_trait]
pub trait ErasedTool: Send + Sync {
    fn name(&self) -> &str;

    fn definition(&self) -> ToolDefinition;

    /// Execute with the model's raw argument string, returning JSON output.
    async fn call_erased(&self, arguments: &str) -> Result<Value, ToolError>;
}

#[async_trait]
impl<T: Tool> ErasedTool for T {
    fn name(&self) -> &str {
        T::NAME
    }

    fn definition(&self) -> ToolDefinition {
        Tool::definition(self)
    }

    async fn call_erased(&self, arguments: &str) -> Result<Value, ToolError> {
        let arguments = if arguments.trim().is_empty() { "{}" } else { arguments };
        let args: T::Args = serde_json::from_str(arguments)
            .map_err(|e| ToolError::ArgumentParse(e.to_string()))?;

        let output = self
            .call(args)
            .await
            .map_err(|e| ToolError::Execution(e.to_string()))?;

        serde_json::to_value(&output).map_err(|e| ToolError::OutputSerialize(e.to_string()))
    }
}

impl ToolResult {
    pub fn success(call: &ToolCall, output: Value) -> Self {
        Self {
            tool_call_id: call.id.clone(),
            tool_name: call.name.clone(),
            args: call.arguments_value(),
            output,
            is_error: false,
        }
    }

    pub fn failure(call: &ToolCall, error: &ToolError) -> Self {
        Self {
            tool_call_id: call.id.clone(),
            tool_name: call.name.clone(),
            args: call.arguments_value(),
            output: serde_json::json!({ "error": error.to_string() }),
            is_error: true,
        }
    }

    /// Content of the `tool` message sent back to the model.
    pub fn message_content(&self) -> String {
        match &self.output {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}
