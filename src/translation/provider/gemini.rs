//! 托管后端：Gemini `generateContent` REST 接口

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::translation::config::constants;
use crate::translation::error::{TranslationError, TranslationResult};

use super::{error_message, http_client, Provider};

#[derive(Debug, Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiReplyContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiReplyContent {
    #[serde(default)]
    parts: Vec<GeminiReplyPart>,
}

#[derive(Debug, Deserialize)]
struct GeminiReplyPart {
    text: Option<String>,
}

impl GeminiResponse {
    /// 拼接首个候选的全部文本片段
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();

        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// Gemini 后端
#[derive(Debug, Clone)]
pub struct GeminiProvider {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl GeminiProvider {
    /// 创建后端，API Key 为空时立即返回配置错误
    pub fn new(api_key: &str, model: &str) -> TranslationResult<Self> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(TranslationError::ConfigError(
                "Gemini API Key not configured. Please set it in preferences.".to_string(),
            ));
        }

        let model = match model.trim() {
            "" => constants::DEFAULT_MODEL,
            model => model,
        };

        Ok(Self {
            api_key: api_key.to_string(),
            model: model.to_string(),
            base_url: constants::GEMINI_API_BASE.to_string(),
            client: http_client()?,
        })
    }

    /// 替换接口地址（代理或测试服务器）
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> TranslationResult<Url> {
        let endpoint = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        Url::parse(&endpoint).map_err(|e| {
            TranslationError::ConfigError(format!("Invalid Gemini endpoint {}: {}", endpoint, e))
        })
    }
}

#[async_trait]
impl Provider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, prompt: &str) -> TranslationResult<String> {
        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart { text: prompt }],
            }],
        };

        tracing::debug!("调用 Gemini 模型 {}", self.model);
        let response = self
            .client
            .post(self.endpoint()?)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.json::<serde_json::Value>().await.ok();
            let message = error_message(body.as_ref(), status);
            tracing::error!("Gemini 请求失败: {}", message);
            return Err(TranslationError::NetworkError(message));
        }

        let reply: GeminiResponse = response
            .json()
            .await
            .map_err(|_| TranslationError::NetworkError("Gemini response was empty".to_string()))?;

        reply
            .text()
            .ok_or_else(|| TranslationError::NetworkError("Gemini response was empty".to_string()))
    }
}
