/// LLM Client — the single point of entry for all Claude API calls in Konsult.
///
/// ARCHITECTURAL RULE: No other module may call the Anthropic API directly.
/// All LLM interactions MUST go through this module.
///
/// Model: claude-sonnet-4-5 (hardcoded — do not make configurable to prevent drift)
use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// The model used for all LLM calls in Konsult.
/// This is intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "claude-sonnet-4-5";
const MAX_TOKENS: u32 = 4096;
const MAX_RETRIES: u32 = 3;
/// Cap on tool-use round trips within a single exchange.
const MAX_TOOL_ROUNDS: u32 = 4;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("Tool '{name}' failed: {message}")]
    Tool { name: String, message: String },

    #[error("Exchange exceeded {0} tool rounds without a final answer")]
    TooManyToolRounds(u32),
}

/// A tool declaration forwarded to the model alongside the prompt.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

/// Executes tool calls the model makes mid-exchange.
/// Results are serialized and fed back into the same exchange.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    async fn run(&self, name: &str, input: &Value) -> Result<Value>;
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: &'a [Message],
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<&'a [ToolDefinition]>,
}

#[derive(Debug, Clone, Serialize)]
struct Message {
    role: &'static str,
    content: MessageContent,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
enum MessageContent {
    Text(String),
    Blocks(Vec<RequestBlock>),
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum RequestBlock {
    Text {
        text: String,
    },
    ToolUse {
        id: String,
        name: String,
        input: Value,
    },
    ToolResult {
        tool_use_id: String,
        content: String,
    },
}

#[derive(Debug, Deserialize)]
pub struct LlmResponse {
    pub content: Vec<ContentBlock>,
    pub stop_reason: Option<String>,
    pub usage: Usage,
}

#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    pub text: Option<String>,
    pub id: Option<String>,
    pub name: Option<String>,
    pub input: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl LlmResponse {
    /// Extracts the text content from the first text block.
    pub fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
    }

    fn wants_tool(&self) -> bool {
        self.stop_reason.as_deref() == Some("tool_use")
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

/// The single LLM client used by all flows in Konsult.
/// Wraps the Anthropic Messages API with retry logic, structured output
/// helpers, and a tool-use exchange loop.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
}

impl LlmClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }

    /// Makes a single-turn call to the Claude API, returning the full response.
    pub async fn call(&self, prompt: &str, system: &str) -> Result<LlmResponse, LlmError> {
        let messages = vec![Message {
            role: "user",
            content: MessageContent::Text(prompt.to_string()),
        }];
        self.send(&messages, system, None).await
    }

    /// Convenience method that calls the LLM and deserializes the text response as JSON.
    /// The prompt must instruct the model to return valid JSON.
    pub async fn call_json<T: DeserializeOwned>(
        &self,
        prompt: &str,
        system: &str,
    ) -> Result<T, LlmError> {
        let response = self.call(prompt, system).await?;
        parse_json_response(&response)
    }

    /// Runs a tool-augmented exchange: the model may invoke any declared tool,
    /// the handler executes it, and the result is fed back into the same
    /// exchange until the model produces a final answer.
    pub async fn call_with_tools(
        &self,
        prompt: &str,
        system: &str,
        tools: &[ToolDefinition],
        handler: &dyn ToolHandler,
    ) -> Result<LlmResponse, LlmError> {
        let mut messages = vec![Message {
            role: "user",
            content: MessageContent::Text(prompt.to_string()),
        }];

        for _round in 0..MAX_TOOL_ROUNDS {
            let response = self.send(&messages, system, Some(tools)).await?;

            if !response.wants_tool() {
                return Ok(response);
            }

            let mut assistant_blocks = Vec::new();
            let mut result_blocks = Vec::new();

            for block in &response.content {
                match block.block_type.as_str() {
                    "text" => {
                        if let Some(text) = &block.text {
                            assistant_blocks.push(RequestBlock::Text { text: text.clone() });
                        }
                    }
                    "tool_use" => {
                        let (id, name, input) = match (&block.id, &block.name, &block.input) {
                            (Some(id), Some(name), Some(input)) => (id, name, input),
                            _ => continue,
                        };
                        debug!("LLM requested tool '{}' with input {}", name, input);
                        assistant_blocks.push(RequestBlock::ToolUse {
                            id: id.clone(),
                            name: name.clone(),
                            input: input.clone(),
                        });

                        let result =
                            handler
                                .run(name, input)
                                .await
                                .map_err(|e| LlmError::Tool {
                                    name: name.clone(),
                                    message: e.to_string(),
                                })?;
                        result_blocks.push(RequestBlock::ToolResult {
                            tool_use_id: id.clone(),
                            content: result.to_string(),
                        });
                    }
                    _ => {}
                }
            }

            messages.push(Message {
                role: "assistant",
                content: MessageContent::Blocks(assistant_blocks),
            });
            messages.push(Message {
                role: "user",
                content: MessageContent::Blocks(result_blocks),
            });
        }

        Err(LlmError::TooManyToolRounds(MAX_TOOL_ROUNDS))
    }

    /// Like `call_with_tools`, but deserializes the final text answer as JSON.
    pub async fn call_json_with_tools<T: DeserializeOwned>(
        &self,
        prompt: &str,
        system: &str,
        tools: &[ToolDefinition],
        handler: &dyn ToolHandler,
    ) -> Result<T, LlmError> {
        let response = self.call_with_tools(prompt, system, tools, handler).await?;
        parse_json_response(&response)
    }

    /// Posts one request to the Messages API.
    /// Retries on 429 (rate limit) and 5xx errors with exponential backoff.
    async fn send(
        &self,
        messages: &[Message],
        system: &str,
        tools: Option<&[ToolDefinition]>,
    ) -> Result<LlmResponse, LlmError> {
        let request_body = AnthropicRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            system,
            messages,
            tools,
        };

        let mut last_error: Option<LlmError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s, 4s
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "LLM call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(ANTHROPIC_API_URL)
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", ANTHROPIC_VERSION)
                .header("content-type", "application/json")
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("LLM API returned {}: {}", status, body);
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                // Try to parse error message
                let message = serde_json::from_str::<AnthropicError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let llm_response: LlmResponse = response.json().await?;

            debug!(
                "LLM call succeeded: input_tokens={}, output_tokens={}",
                llm_response.usage.input_tokens, llm_response.usage.output_tokens
            );

            return Ok(llm_response);
        }

        Err(last_error.unwrap_or(LlmError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }
}

fn parse_json_response<T: DeserializeOwned>(response: &LlmResponse) -> Result<T, LlmError> {
    let text = response.text().ok_or(LlmError::EmptyContent)?;

    // Strip markdown code fences if the model wraps JSON in them
    let text = strip_json_fences(text);

    serde_json::from_str(text).map_err(LlmError::Parse)
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_response_text_skips_tool_use_blocks() {
        let raw = serde_json::json!({
            "content": [
                {"type": "tool_use", "id": "tu_1", "name": "get_project_details",
                 "input": {"project_key": "PROJ"}},
                {"type": "text", "text": "final answer"}
            ],
            "stop_reason": "end_turn",
            "usage": {"input_tokens": 10, "output_tokens": 5}
        });
        let response: LlmResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(response.text(), Some("final answer"));
        assert!(!response.wants_tool());
    }

    #[test]
    fn test_tool_use_stop_reason_detected() {
        let raw = serde_json::json!({
            "content": [
                {"type": "tool_use", "id": "tu_1", "name": "get_project_details",
                 "input": {"project_key": "PROJ"}}
            ],
            "stop_reason": "tool_use",
            "usage": {"input_tokens": 10, "output_tokens": 5}
        });
        let response: LlmResponse = serde_json::from_value(raw).unwrap();
        assert!(response.wants_tool());
        assert_eq!(response.text(), None);
    }

    #[test]
    fn test_tool_result_block_serialization() {
        let block = RequestBlock::ToolResult {
            tool_use_id: "tu_1".to_string(),
            content: "{\"name\":\"Project PROJ\"}".to_string(),
        };
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["type"], "tool_result");
        assert_eq!(json["tool_use_id"], "tu_1");
    }
}
