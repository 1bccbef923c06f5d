//! # AI Translator Library
//!
//! 邮件翻译管道：按段落翻译 HTML 正文并保留原有结构，支持托管与本地语言模型后端。
//!
//! ## 模块组织
//!
//! - `core` - 对外错误类型与输入读取
//! - `env` - 环境变量
//! - `parsers` - HTML 解析、DOM 操作与序列化
//! - `translation` - 翻译管道、后端、缓存与请求协调

pub mod core;
pub mod env;
pub mod parsers;
pub mod translation;

// Re-export commonly used items for convenience
pub use self::core::*;
pub use translation::{TranslationResponse, TranslationService};
