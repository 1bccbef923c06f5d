//! 翻译模块
//!
//! 将富文本邮件切分为可独立翻译的段落，交给可替换的语言模型后端翻译，
//! 再把译文写回原文档，段落之外的节点保持不变。
//!
//! - **config**: 设置读写、默认值与硬性上限
//! - **language**: 目标语言与模型预设
//! - **pipeline**: 纯文本提取、段落切分、提示词、译文回填
//! - **provider**: 托管后端与本地后端
//! - **storage**: 翻译结果缓存
//! - **core**: 翻译服务与请求协调
//! - **error**: 错误处理
//!
//! # 基本用法
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use ai_translator::translation::{ConfigManager, TranslationService};
//!
//! # async fn example() {
//! let service = TranslationService::new(Arc::new(ConfigManager::in_memory()));
//! let response = service
//!     .translate_html_by_paragraph("<p>Hello</p><div><p>Nested</p></div>")
//!     .await;
//! println!("{:?}", response.translated_html);
//! # }
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod language;
pub mod pipeline;
pub mod provider;
pub mod storage;

pub use config::{constants, ConfigManager, ProviderKind, SettingsDraft, TranslatorConfig};
pub use self::core::{
    DraftSink, DraftTranslator, MessageTranslator, Phase, RequestOutcome, SubjectDocument,
    TranslationResponse, TranslationService,
};
pub use error::{ErrorCategory, TranslationError, TranslationResult};
pub use language::{TargetLanguage, MODEL_OPTIONS, TARGET_LANGUAGES};
pub use pipeline::{extract_plain_text, segment, Segment};
pub use provider::{GeminiProvider, MockProvider, OllamaProvider, Provider};
pub use storage::{CacheEntry, TranslationCache};
