use crate::llm::client::{status_error, transport_error, LLMClient};
use crate::types::{AppError, Result};
use async_trait::async_trait;
use serde_json::{json, Value};

const PROVIDER: &str = "Ollama";

pub struct OllamaClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaClient {
    pub fn new(http: reqwest::Client, base_url: String, model: String) -> Self {
        Self {
            http,
            base_url,
            model,
        }
    }

    async fn chat(&self, messages: Vec<Value>) -> Result<String> {
        let url = format!("{}/api/chat", self.base_url.trim_end_matches('/'));
        let body = json!({
            "model": self.model,
            "messages": messages,
            "stream": false,
        });

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error(PROVIDER, e))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(status_error(PROVIDER, status, &text));
        }

        let response_json: Value = response
            .json()
            .await
            .map_err(|e| AppError::LLM(format!("Failed to parse Ollama response: {}", e)))?;

        // Non-streaming chat responses carry a single `message` object
        response_json
            .pointer("/message/content")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| AppError::LLM("No message in Ollama response".to_string()))
    }
}

#[async_trait]
impl LLMClient for OllamaClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.chat(vec![json!({"role": "user", "content": prompt})])
            .await
    }

    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String> {
        self.chat(vec![
            json!({"role": "system", "content": system}),
            json!({"role": "user", "content": prompt}),
        ])
        .await
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
