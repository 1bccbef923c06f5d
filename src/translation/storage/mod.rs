//! 存储模块
//!
//! 进程内翻译结果缓存，不做持久化。

pub mod cache;

pub use cache::{content_hash, CacheEntry, CacheStats, TranslationCache};
