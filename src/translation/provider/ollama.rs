//! 本地后端：Ollama `/api/generate`

use async_trait::async_trait;
use serde::Serialize;
use url::Url;

use crate::translation::config::{constants, normalize_ollama_host};
use crate::translation::error::{TranslationError, TranslationResult};

use super::{error_message, http_client, Provider};

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

/// Ollama 后端
#[derive(Debug, Clone)]
pub struct OllamaProvider {
    endpoint: Url,
    model: String,
    client: reqwest::Client,
}

impl OllamaProvider {
    /// 创建后端；地址与模型为空时使用默认值
    pub fn new(host: &str, model: &str) -> TranslationResult<Self> {
        let host = normalize_ollama_host(host);
        let endpoint = Url::parse(&format!("{}/api/generate", host)).map_err(|e| {
            TranslationError::ConfigError(format!("Invalid Ollama host {}: {}", host, e))
        })?;

        let model = match model.trim() {
            "" => constants::DEFAULT_OLLAMA_MODEL,
            model => model,
        };

        Ok(Self {
            endpoint,
            model: model.to_string(),
            client: http_client()?,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl Provider for OllamaProvider {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn generate(&self, prompt: &str) -> TranslationResult<String> {
        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        tracing::debug!("调用 Ollama 模型 {} @ {}", self.model, self.endpoint);
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let data = response.json::<serde_json::Value>().await.ok();

        if !status.is_success() {
            let message = error_message(data.as_ref(), status);
            tracing::error!("Ollama 请求失败: {}", message);
            return Err(TranslationError::NetworkError(message));
        }

        match data.as_ref().and_then(|data| data.get("response")) {
            Some(serde_json::Value::String(text)) => Ok(text.clone()),
            _ => Err(TranslationError::NetworkError(
                "Ollama response was empty".to_string(),
            )),
        }
    }
}
