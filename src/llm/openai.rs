use crate::llm::client::{status_error, transport_error, LLMClient};
use crate::types::{AppError, Result};
use async_trait::async_trait;
use serde_json::{json, Value};

const PROVIDER: &str = "OpenAI";

pub struct OpenAIClient {
    http: reqwest::Client,
    api_key: String,
    api_base: String,
    model: String,
}

impl OpenAIClient {
    pub fn new(http: reqwest::Client, api_key: String, api_base: String, model: String) -> Self {
        Self {
            http,
            api_key,
            api_base,
            model,
        }
    }

    async fn chat(&self, messages: Vec<Value>) -> Result<String> {
        let url = format!("{}/chat/completions", self.api_base.trim_end_matches('/'));
        let body = json!({
            "model": self.model,
            "messages": messages,
        });

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
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
            .map_err(|e| AppError::LLM(format!("Failed to parse OpenAI response: {}", e)))?;

        response_json
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| AppError::LLM("No response from OpenAI".to_string()))
    }
}

#[async_trait]
impl LLMClient for OpenAIClient {
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
