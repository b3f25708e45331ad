use std::env;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::services::provider::ProviderError;

const COMPLETIONS_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
const MODEL: &str = "llama3-70b-8192";

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Clone)]
pub struct LlmService {
    client: Client,
    api_key: Option<String>,
}

impl LlmService {
    pub fn from_env() -> Self {
        Self {
            client: Client::new(),
            api_key: env::var("VY_GROQ_API_KEY").ok(),
        }
    }

    /// Single-turn chat completion; returns the raw reply text.
    pub async fn chat(&self, prompt: &str, max_tokens: u32) -> Result<String, ProviderError> {
        let key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingCredential("groq"))?;

        let request = CompletionRequest {
            model: MODEL,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
            max_tokens,
        };

        let response = self
            .client
            .post(COMPLETIONS_URL)
            .bearer_auth(key)
            .json(&request)
            .timeout(Duration::from_secs(30))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::from_response("groq", response).await);
        }

        let data: CompletionResponse = response.json().await.map_err(|e| {
            ProviderError::Decode {
                provider: "groq",
                detail: e.to_string(),
            }
        })?;

        data.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(ProviderError::Decode {
                provider: "groq",
                detail: "completion had no choices".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_response_wire_shape() {
        let raw = r#"{"choices":[{"message":{"role":"assistant","content":"hello"}}]}"#;
        let parsed: CompletionResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(
            parsed.choices[0].message.content.as_deref(),
            Some("hello")
        );
    }

    #[test]
    fn test_empty_choices_parse() {
        let parsed: CompletionResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.choices.is_empty());
    }
}
