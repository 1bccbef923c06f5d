//! 翻译模块统一错误处理
//!
//! 错误的 Display 文本就是最终呈现给调用方的失败信息

use thiserror::Error;

use crate::core::TranslatorError;

/// 翻译错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslationError {
    /// 配置错误（如缺少 API Key），原样呈现，不重试
    #[error("{0}")]
    ConfigError(String),

    /// 输入超出字符上限
    #[error("Content too large to translate")]
    InputTooLarge,

    /// 输入为空
    #[error("{0}")]
    NoContent(String),

    /// 文档中没有可翻译的段落
    #[error("No translatable paragraphs found")]
    NoTranslatableContent,

    /// 分段超出数量或字符预算
    #[error("Content too large to translate safely")]
    TruncatedContent,

    /// 网络错误、非 2xx 状态或响应体异常
    #[error("{0}")]
    NetworkError(String),

    /// 请求超时
    #[error("Translation request timed out")]
    TimeoutError,

    /// 回复中找不到或无法解析 JSON
    #[error("{0}")]
    ParseError(String),

    /// 回复缺少翻译数组
    #[error("Translation response missing data")]
    MissingData,

    /// 设置存储不可用
    #[error("Settings store error: {0}")]
    StoreError(String),
}

impl TranslationError {
    /// 回复中不存在 JSON 负载
    pub fn invalid_json() -> Self {
        TranslationError::ParseError("Translation response was not valid JSON".to_string())
    }

    /// JSON 负载解析失败
    pub fn unparsable_json() -> Self {
        TranslationError::ParseError("Failed to parse translation response".to_string())
    }

    /// 检查错误是否可重试（仅作提示，管道本身从不自动重试）
    pub fn is_retryable(&self) -> bool {
        match self {
            TranslationError::NetworkError(_) => true,
            TranslationError::TimeoutError => true,
            TranslationError::StoreError(_) => true,
            TranslationError::ConfigError(_) => false,
            TranslationError::InputTooLarge => false,
            TranslationError::NoContent(_) => false,
            TranslationError::NoTranslatableContent => false,
            TranslationError::TruncatedContent => false,
            TranslationError::ParseError(_) => false,
            TranslationError::MissingData => false,
        }
    }

    /// 获取错误类别
    pub fn category(&self) -> ErrorCategory {
        match self {
            TranslationError::ConfigError(_) => ErrorCategory::Configuration,
            TranslationError::InputTooLarge
            | TranslationError::NoContent(_)
            | TranslationError::NoTranslatableContent
            | TranslationError::TruncatedContent => ErrorCategory::Input,
            TranslationError::NetworkError(_) => ErrorCategory::Network,
            TranslationError::TimeoutError => ErrorCategory::Timeout,
            TranslationError::ParseError(_) | TranslationError::MissingData => {
                ErrorCategory::ResponseFormat
            }
            TranslationError::StoreError(_) => ErrorCategory::Storage,
        }
    }
}

/// 错误类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Network,
    Timeout,
    ResponseFormat,
    Storage,
}

/// 转换为 TranslatorError（供命令行入口使用）
impl From<TranslationError> for TranslatorError {
    fn from(error: TranslationError) -> Self {
        TranslatorError::new(&error.to_string())
    }
}

impl From<std::io::Error> for TranslationError {
    fn from(error: std::io::Error) -> Self {
        TranslationError::StoreError(format!("IO错误: {}", error))
    }
}

impl From<serde_json::Error> for TranslationError {
    fn from(error: serde_json::Error) -> Self {
        TranslationError::ParseError(format!("JSON错误: {}", error))
    }
}

impl From<toml::de::Error> for TranslationError {
    fn from(error: toml::de::Error) -> Self {
        TranslationError::StoreError(format!("TOML解析错误: {}", error))
    }
}

impl From<toml::ser::Error> for TranslationError {
    fn from(error: toml::ser::Error) -> Self {
        TranslationError::StoreError(format!("TOML序列化错误: {}", error))
    }
}

impl From<reqwest::Error> for TranslationError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            TranslationError::TimeoutError
        } else {
            TranslationError::NetworkError(error.to_string())
        }
    }
}

impl From<tokio::time::error::Elapsed> for TranslationError {
    fn from(_: tokio::time::error::Elapsed) -> Self {
        TranslationError::TimeoutError
    }
}

/// 错误结果类型别名
pub type TranslationResult<T> = Result<T, TranslationError>;
