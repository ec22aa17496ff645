//! OpenAI-compatible chat completions client
//!
//! Works against any server exposing the /chat/completions shape,
//! including the NVIDIA integrate endpoint and local inference servers.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{ChatMessage, LlmProvider};
use crate::config::LlmConfig;
use crate::error::{Error, Result};

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

pub struct OpenAiLlm {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

impl OpenAiLlm {
    pub fn new(config: &LlmConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl LlmProvider for OpenAiLlm {
    async fn complete(&self, messages: &[ChatMessage], max_tokens: u32) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);
        let request = CompletionRequest {
            model: &self.model,
            messages,
            max_tokens,
            temperature: 0.2,
        };

        let mut builder = self.client.post(&url).json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| Error::ModelUnavailable(format!("llm unreachable: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Llm(format!("completion returned {status}: {body}")));
        }

        let parsed: CompletionResponse = response
            .json()
            .await
            .map_err(|e| Error::Llm(format!("bad completion response: {e}")))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| Error::Llm("completion returned no choices".to_string()))
    }

    async fn health_check(&self) -> Result<()> {
        let url = format!("{}/models", self.base_url);
        let mut builder = self.client.get(&url);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| Error::ModelUnavailable(format!("llm unreachable: {e}")))?;

        if response.status().is_success() || response.status().as_u16() == 404 {
            // some compatible servers do not expose /models
            Ok(())
        } else {
            Err(Error::ModelUnavailable(format!(
                "llm models endpoint returned {}",
                response.status()
            )))
        }
    }

    fn name(&self) -> &str {
        "openai-compatible"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization() {
        let messages = vec![ChatMessage::system("sys"), ChatMessage::user("hi")];
        let request = CompletionRequest {
            model: "meta/llama-3.2-3b-instruct",
            messages: &messages,
            max_tokens: 512,
            temperature: 0.2,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "meta/llama-3.2-3b-instruct");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["max_tokens"], 512);
    }

    #[test]
    fn test_response_parsing() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"An answer."}}]}"#;
        let parsed: CompletionResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.choices[0].message.content, "An answer.");
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_model_unavailable() {
        let mut config = LlmConfig::default();
        config.base_url = "http://127.0.0.1:1/v1".to_string();
        config.timeout_secs = 1;
        let llm = OpenAiLlm::new(&config);
        let err = llm
            .complete(&[ChatMessage::user("hi")], 16)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ModelUnavailable(_)));
    }
}
