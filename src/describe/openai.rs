//! OpenAI chat-completions description provider

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{build_prompt, Describe, Description};
use crate::describe::error::{DescribeError, DescribeResult};
use crate::types::Usage;

/// Chat-completions endpoint used unless overridden
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// Model requested unless overridden
pub const DEFAULT_MODEL: &str = "gpt-4";

/// Upper bound on a single description request
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const MAX_TOKENS: u32 = 150;
const TEMPERATURE: f32 = 0.3;
const SYSTEM_MESSAGE: &str = "You are ChatGPT, a large language model trained by OpenAI.";

/// Describer backed by the OpenAI chat-completions API
pub struct OpenAiDescriber {
    client: Client,
    api_key: String,
    endpoint: String,
    model: String,
    prompt: String,
}

impl OpenAiDescriber {
    /// Create a describer with the default endpoint and a 30 second timeout
    pub fn new(api_key: String, model: String, prompt_prefix: Option<&str>) -> DescribeResult<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            client,
            api_key,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model,
            prompt: build_prompt(prompt_prefix),
        })
    }

    /// Point the describer at a different endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// JSON payload for one file
    fn request_body(&self, content: &str) -> Value {
        json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_MESSAGE },
                {
                    "role": "user",
                    "content": format!("{}\n\n```python\n{}\n```", self.prompt, content)
                }
            ],
            "max_tokens": MAX_TOKENS,
            "temperature": TEMPERATURE
        })
    }
}

impl Describe for OpenAiDescriber {
    fn describe(&self, content: &str) -> DescribeResult<Description> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&self.request_body(content))
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .unwrap_or_else(|_| "Unable to read error message".to_string());
            return Err(DescribeError::Http { status, body });
        }

        let body = response.text()?;
        parse_response(&body)
    }
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Usage,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct Message {
    content: String,
}

/// Extract the description and usage from a chat-completions body
fn parse_response(body: &str) -> DescribeResult<Description> {
    let parsed: ChatResponse = serde_json::from_str(body)
        .map_err(|e| DescribeError::ResponseStructure(e.to_string()))?;

    let choice = parsed
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| DescribeError::ResponseStructure("no choices in response".to_string()))?;

    Ok(Description {
        text: choice.message.content.trim().to_string(),
        usage: parsed.usage,
    })
}
