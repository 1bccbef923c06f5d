//! 翻译后端
//!
//! 托管后端（Gemini）与本地后端（Ollama）共享同一个接口：
//! 接收一段提示词，返回原始文本回复。

pub mod gemini;
pub mod mock;
pub mod ollama;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::translation::config::{constants, ProviderKind, TranslatorConfig};
use crate::translation::error::{TranslationError, TranslationResult};

pub use gemini::GeminiProvider;
pub use mock::{MockProvider, MockReply};
pub use ollama::OllamaProvider;

/// 文本生成后端
#[async_trait]
pub trait Provider: Send + Sync {
    /// 后端名称，用于日志
    fn name(&self) -> &str;

    /// 提交提示词并返回回复文本
    async fn generate(&self, prompt: &str) -> TranslationResult<String>;
}

/// 在限定时间内等待后端回复
///
/// 计时器先到时返回超时错误；底层请求随 future 一起被丢弃
pub async fn generate_with_timeout(
    provider: &dyn Provider,
    prompt: &str,
    timeout: Duration,
) -> TranslationResult<String> {
    match tokio::time::timeout(timeout, provider.generate(prompt)).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!("{} 请求超时 ({:?})", provider.name(), timeout);
            Err(TranslationError::TimeoutError)
        }
    }
}

/// 根据设置构建后端
pub fn from_config(config: &TranslatorConfig) -> TranslationResult<Arc<dyn Provider>> {
    match config.provider {
        ProviderKind::Gemini => Ok(Arc::new(GeminiProvider::new(&config.api_key, &config.model)?)),
        ProviderKind::Ollama => Ok(Arc::new(OllamaProvider::new(
            &config.ollama_host,
            &config.ollama_model,
        )?)),
    }
}

/// 构建带超时的 HTTP 客户端
pub(crate) fn http_client() -> TranslationResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(constants::REQUEST_TIMEOUT)
        .build()
        .map_err(|e| TranslationError::NetworkError(format!("Failed to create HTTP client: {}", e)))
}

/// 从非 2xx 响应体中提取错误信息
pub(crate) fn error_message(body: Option<&serde_json::Value>, status: reqwest::StatusCode) -> String {
    body.and_then(|data| {
        ["error", "message"].iter().find_map(|field| match data.get(*field) {
            Some(serde_json::Value::String(message)) if !message.is_empty() => Some(message.clone()),
            Some(serde_json::Value::Object(inner)) => inner
                .get("message")
                .and_then(serde_json::Value::as_str)
                .map(str::to_string),
            _ => None,
        })
    })
    .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}
