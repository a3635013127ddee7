//! Google Gemini `generateContent` REST 调用

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::{debug, trace};
use ureq::Agent;

use super::provider::TextGenerator;
use crate::config::RewriteConfig;
use crate::errors::{FolioError, Result};

pub struct GeminiProvider {
    endpoint: String,
    model: String,
    api_key: String,
    agent: Agent,
}

impl GeminiProvider {
    pub fn new(api_base: &str, model: &str, api_key: &str, timeout: Duration) -> Self {
        let endpoint = format!(
            "{}/models/{}:generateContent",
            api_base.trim_end_matches('/'),
            model
        );
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .into();

        Self {
            endpoint,
            model: model.to_string(),
            api_key: api_key.to_string(),
            agent,
        }
    }

    /// 从配置创建，没有 API key 时报配置错误
    pub fn from_config(config: &RewriteConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| FolioError::config("GEMINI_API_KEY is not defined"))?;

        Ok(Self::new(
            &config.api_base,
            &config.model,
            api_key,
            Duration::from_secs(config.timeout_secs),
        ))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// 同步请求（在 spawn_blocking 中调用）
    fn generate_sync(agent: &Agent, endpoint: &str, api_key: &str, prompt: &str) -> Result<String> {
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let resp = agent
            .post(endpoint)
            .header("x-goog-api-key", api_key)
            .send_json(&body)
            .map_err(|e| FolioError::upstream(format!("Gemini request failed: {}", e)))?;

        let json: Value = resp
            .into_body()
            .read_json()
            .map_err(|e| FolioError::upstream(format!("Gemini response parse failed: {}", e)))?;

        extract_candidate_text(&json)
    }
}

/// 拼接 `candidates[0].content.parts[*].text`
pub fn extract_candidate_text(response: &Value) -> Result<String> {
    if let Some(reason) = response["promptFeedback"]["blockReason"].as_str() {
        return Err(FolioError::upstream(format!(
            "Gemini blocked the prompt: {}",
            reason
        )));
    }

    let text: String = response["candidates"][0]["content"]["parts"]
        .as_array()
        .map(|parts| {
            parts
                .iter()
                .filter_map(|p| p["text"].as_str())
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(FolioError::upstream("Gemini returned no text"));
    }
    Ok(text)
}

#[async_trait]
impl TextGenerator for GeminiProvider {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let agent = self.agent.clone();
        let endpoint = self.endpoint.clone();
        let api_key = self.api_key.clone();
        let prompt = prompt.to_string();

        debug!("Calling Gemini model {}", self.model);
        let text = tokio::task::spawn_blocking(move || {
            Self::generate_sync(&agent, &endpoint, &api_key, &prompt)
        })
        .await
        .map_err(|e| FolioError::upstream(format!("Gemini task failed: {}", e)))??;

        trace!("Gemini returned {} chars", text.len());
        Ok(text)
    }

    fn name(&self) -> &'static str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }
}
