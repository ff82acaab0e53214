//! Agent with a bounded tool-calling loop.
//!
//! ```rust,ignore
//! let run = client
//!     .agent("berlin-scout-model")
//!     .system(INSTRUCTIONS)
//!     .tool(WebScraperTool::new(scraper))
//!     .max_steps(5)
//!     .temperature(0.0)
//!     .max_tokens(1500)
//!     .build()
//!     .generate("Scout https://example.org/event")
//!     .await?;
//! ```
//!
//! Unlike a plain chat helper the loop never fails because the model
//! misbehaves: when the step bound is hit it returns whatever channels exist
//! and lets the caller decide what is usable.

use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::tool::{ErasedTool, Tool, ToolCall, ToolError};
use crate::types::{truncate_to_char_boundary, AgentRun, StopReason, ToolResult, Usage};
use crate::{ChatBackend, GatewayError, Result};

const DEFAULT_MAX_STEPS: usize = 10;

/// Builder for an [`Agent`].
pub struct AgentBuilder<'a> {
    backend: &'a dyn ChatBackend,
    model: String,
    system_prompt: Option<String>,
    tools: Vec<Box<dyn ErasedTool>>,
    max_steps: usize,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl<'a> AgentBuilder<'a> {
    pub fn new(backend: &'a dyn ChatBackend, model: impl Into<String>) -> Self {
        Self {
            backend,
            model: model.into(),
            system_prompt: None,
            tools: Vec::new(),
            max_steps: DEFAULT_MAX_STEPS,
            temperature: None,
            max_tokens: None,
        }
    }

    pub fn system(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn tool<T: Tool + 'static>(mut self, tool: T) -> Self {
        self.tools.push(Box::new(tool));
        self
    }

    /// Maximum number of model calls in one run. Values below 1 are raised to 1.
    pub fn max_steps(mut self, max: usize) -> Self {
        self.max_steps = max.max(1);
        self
    }

    pub fn temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }

    /// Output token budget per model call.
    pub fn max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    pub fn build(self) -> Agent<'a> {
        Agent {
            backend: self.backend,
            model: self.model,
            system_prompt: self.system_prompt,
            tools: self.tools,
            max_steps: self.max_steps,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

/// A configured agent. Holds no conversation state between runs.
pub struct Agent<'a> {
    backend: &'a dyn ChatBackend,
    model: String,
    system_prompt: Option<String>,
    tools: Vec<Box<dyn ErasedTool>>,
    max_steps: usize,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl Agent<'_> {
    /// Run one session for `prompt` and return the raw output channels.
    pub async fn generate(&self, prompt: impl Into<String>) -> Result<AgentRun> {
        let mut messages = Vec::with_capacity(2);
        if let Some(ref system) = self.system_prompt {
            messages.push(json!({ "role": "system", "content": system }));
        }
        messages.push(json!({ "role": "user", "content": prompt.into() }));

        self.run_tool_loop(messages).await
    }

    async fn run_tool_loop(&self, mut messages: Vec<Value>) -> Result<AgentRun> {
        let tool_defs: Vec<Value> = self
            .tools
            .iter()
            .map(|t| t.definition().to_openai_format())
            .collect();

        let mut tool_results: Vec<ToolResult> = Vec::new();
        let mut usage = Usage::default();
        let mut last_text = None;
        let mut last_object = None;

        for step in 1..=self.max_steps {
            info!(
                step,
                max_steps = self.max_steps,
                model = %self.model,
                message_count = messages.len(),
                "Agent step starting"
            );

            let request = self.build_request(&messages, &tool_defs);
            let response = self.backend.send_chat(&request).await?;

            if let Some(step_usage) = response
                .get("usage")
                .and_then(|u| serde_json::from_value::<Usage>(u.clone()).ok())
            {
                usage.add(step_usage);
            }

            let message = response
                .get("choices")
                .and_then(|c| c.get(0))
                .and_then(|c| c.get("message"))
                .cloned()
                .ok_or_else(|| GatewayError::Parse("No message in response".into()))?;

            let text = message
                .get("content")
                .and_then(Value::as_str)
                .filter(|c| !c.trim().is_empty())
                .map(str::to_string);
            let object = message.get("parsed").filter(|p| p.is_object()).cloned();

            let tool_calls = message
                .get("tool_calls")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default();

            if tool_calls.is_empty() {
                info!(
                    steps = step,
                    tool_results = tool_results.len(),
                    text_len = text.as_ref().map_or(0, String::len),
                    has_object = object.is_some(),
                    "Agent finished"
                );
                if let Some(ref t) = text {
                    debug!(text = %truncate_for_log(t, 500), "Agent final text");
                }

                return Ok(AgentRun {
                    text,
                    tool_results,
                    object,
                    steps: step,
                    stop_reason: StopReason::Completed,
                    usage,
                });
            }

            info!(step, tool_call_count = tool_calls.len(), "Agent requested tools");

            last_text = text;
            last_object = object;
            messages.push(message);

            for raw_call in &tool_calls {
                let Some(call) = ToolCall::from_openai_value(raw_call) else {
                    warn!(tool_call = %raw_call, "Skipping malformed tool call");
                    continue;
                };

                let result = self.execute_tool(&call).await;

                info!(
                    tool = %call.name,
                    id = %call.id,
                    is_error = result.is_error,
                    preview = %truncate_for_log(&result.message_content(), 200),
                    "Tool call complete"
                );

                messages.push(json!({
                    "role": "tool",
                    "tool_call_id": call.id,
                    "content": result.message_content()
                }));
                tool_results.push(result);
            }
        }

        warn!(
            max_steps = self.max_steps,
            tool_results = tool_results.len(),
            "Agent reached step limit"
        );

        Ok(AgentRun {
            text: last_text,
            tool_results,
            object: last_object,
            steps: self.max_steps,
            stop_reason: StopReason::StepLimit,
            usage,
        })
    }

    fn build_request(&self, messages: &[Value], tool_defs: &[Value]) -> Value {
        let mut request = json!({
            "model": self.model,
            "messages": messages,
        });

        if !tool_defs.is_empty() {
            request["tools"] = Value::Array(tool_defs.to_vec());
            request["tool_choice"] = json!("auto");
        }
        if let Some(temp) = self.temperature {
            request["temperature"] = json!(temp);
        }
        if let Some(max) = self.max_tokens {
            request["max_tokens"] = json!(max);
        }

        request
    }

    async fn execute_tool(&self, call: &ToolCall) -> ToolResult {
        let Some(tool) = self.tools.iter().find(|t| t.name() == call.name) else {
            warn!(tool = %call.name, "Unknown tool requested");
            return ToolResult::failure(call, &ToolError::Unknown(call.name.clone()));
        };

        match tool.call_erased(&call.arguments).await {
            Ok(output) => ToolResult::success(call, output),
            Err(e) => {
                warn!(tool = %call.name, error = %e, "Tool execution failed");
                ToolResult::failure(call, &e)
            }
        }
    }
}

fn truncate_for_log(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!(
            "{}...[truncated {} bytes]",
            truncate_to_char_boundary(s, max_len),
            s.len() - max_len
        )
    }
}
