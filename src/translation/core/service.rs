//! 翻译服务
//!
//! 两个入口：
//!
//! - `translate`: 整段纯文本翻译（撰写邮件时使用）
//! - `translate_html_by_paragraph`: 按段落翻译 HTML，保留标签与属性
//!
//! 所有失败都以 `TranslationResponse { success: false, error }` 返回，不会向外抛出错误。
//!
//! 段落翻译在等待后端回复期间持有 `Rc` 文档树，返回的 future 不是 `Send`，
//! 应在单线程运行时或 `block_on` 中驱动。

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::translation::config::{constants, ConfigManager, TranslatorConfig};
use crate::translation::error::{TranslationError, TranslationResult};
use crate::translation::pipeline::{apply_translations, paragraph_prompt, segment, text_prompt};
use crate::translation::provider::{self, generate_with_timeout, Provider};

/// 翻译结果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translated_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translated_html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TranslationResponse {
    pub fn text(translated_text: String) -> Self {
        Self {
            success: true,
            translated_text: Some(translated_text),
            ..Default::default()
        }
    }

    pub fn html(translated_html: String) -> Self {
        Self {
            success: true,
            translated_html: Some(translated_html),
            ..Default::default()
        }
    }

    pub fn failure(error: &TranslationError) -> Self {
        let message = error.to_string();
        Self {
            success: false,
            error: Some(if message.is_empty() {
                "Translation failed".to_string()
            } else {
                message
            }),
            ..Default::default()
        }
    }
}

/// 翻译服务
pub struct TranslationService {
    config_manager: Arc<ConfigManager>,
    /// 指定后端时不再按设置构建
    provider: Option<Arc<dyn Provider>>,
    timeout: Duration,
}

impl TranslationService {
    pub fn new(config_manager: Arc<ConfigManager>) -> Self {
        Self {
            config_manager,
            provider: None,
            timeout: constants::REQUEST_TIMEOUT,
        }
    }

    /// 固定使用给定后端
    pub fn with_provider(mut self, provider: Arc<dyn Provider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn config_manager(&self) -> &Arc<ConfigManager> {
        &self.config_manager
    }

    pub fn get_config(&self) -> TranslatorConfig {
        self.config_manager.get_config()
    }

    /// 整段翻译纯文本
    pub async fn translate(&self, text: &str) -> TranslationResponse {
        match self.try_translate(text).await {
            Ok(translated) => TranslationResponse::text(translated),
            Err(e) => TranslationResponse::failure(&e),
        }
    }

    /// 按段落翻译 HTML
    pub async fn translate_html_by_paragraph(&self, html: &str) -> TranslationResponse {
        match self.try_translate_html(html).await {
            Ok(translated) => TranslationResponse::html(translated),
            Err(e) => TranslationResponse::failure(&e),
        }
    }

    async fn try_translate(&self, text: &str) -> TranslationResult<String> {
        if text.trim().is_empty() {
            return Err(TranslationError::NoContent("No text to translate".to_string()));
        }
        if text.chars().count() > constants::MAX_INPUT_CHARS {
            return Err(TranslationError::InputTooLarge);
        }

        let config = self.get_config();
        let provider = self.provider_for(&config)?;
        let prompt = text_prompt(config.language_name(), text);

        tracing::info!(
            "整段翻译: {} 字符 -> {} ({})",
            text.chars().count(),
            config.target_language,
            provider.name()
        );
        let output = self.generate(provider.as_ref(), &prompt).await?;

        Ok(output.trim().to_string())
    }

    async fn try_translate_html(&self, html: &str) -> TranslationResult<String> {
        if html.trim().is_empty() {
            return Err(TranslationError::NoContent("No content to translate".to_string()));
        }
        if html.chars().count() > constants::MAX_INPUT_CHARS {
            return Err(TranslationError::InputTooLarge);
        }

        let segmentation = segment(html);
        if segmentation.segments.is_empty() {
            return Err(TranslationError::NoTranslatableContent);
        }
        if segmentation.truncated {
            return Err(TranslationError::TruncatedContent);
        }

        let config = self.get_config();
        let provider = self.provider_for(&config)?;
        let prompt = paragraph_prompt(config.language_name(), &segmentation.segments)?;

        tracing::info!(
            "段落翻译: {} 段 -> {} ({})",
            segmentation.segments.len(),
            config.target_language,
            provider.name()
        );
        let output = self.generate(provider.as_ref(), &prompt).await?;

        apply_translations(&segmentation.document, &output)
    }

    fn provider_for(&self, config: &TranslatorConfig) -> TranslationResult<Arc<dyn Provider>> {
        match &self.provider {
            Some(provider) => Ok(Arc::clone(provider)),
            None => provider::from_config(config),
        }
    }

    async fn generate(&self, provider: &dyn Provider, prompt: &str) -> TranslationResult<String> {
        generate_with_timeout(provider, prompt, self.timeout)
            .await
            .inspect_err(|e| tracing::error!("{} 翻译失败: {}", provider.name(), e))
    }
}

impl std::fmt::Debug for TranslationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationService")
            .field("provider", &self.provider.as_ref().map(|p| p.name().to_string()))
            .field("timeout", &self.timeout)
            .finish()
    }
}
