//! 翻译结果缓存
//!
//! 按文档 id 保存段落翻译结果。容量有上限，超出时淘汰最早写入的条目；
//! 读取不改变顺序。缓存本身不做有效性校验，由调用方比对设置摘要与内容哈希。

use std::num::NonZeroUsize;
use std::sync::RwLock;

use lru::LruCache;

use crate::translation::config::constants;

/// 缓存条目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub translated_html: String,
    /// 生成译文时的设置摘要
    pub fingerprint: String,
    /// 原文内容哈希
    pub content_hash: String,
    /// 写入时间（毫秒时间戳）
    pub timestamp: i64,
}

impl CacheEntry {
    pub fn new(translated_html: String, fingerprint: String, content_hash: String) -> Self {
        Self {
            translated_html,
            fingerprint,
            content_hash,
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }

    /// 设置摘要与内容哈希都一致时才可复用
    pub fn matches(&self, fingerprint: &str, content_hash: &str) -> bool {
        self.fingerprint == fingerprint && self.content_hash == content_hash
    }
}

/// 计算原文内容哈希
pub fn content_hash(body: &str) -> String {
    blake3::hash(body.as_bytes()).to_hex().to_string()
}

/// 缓存统计信息
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub insertions: u64,
    /// 因超出单条大小上限而拒绝写入的次数
    pub rejected: u64,
    pub evictions: u64,
}

/// 翻译缓存
pub struct TranslationCache {
    entries: RwLock<LruCache<String, CacheEntry>>,
    max_entry_chars: usize,
    stats: RwLock<CacheStats>,
}

impl TranslationCache {
    /// 使用默认上限（50 条，单条 120,000 字符）
    pub fn new() -> Self {
        Self::with_limits(constants::MAX_CACHE_ENTRIES, constants::MAX_CACHE_CHARS)
    }

    pub fn with_limits(max_entries: usize, max_entry_chars: usize) -> Self {
        let capacity = NonZeroUsize::new(max_entries).unwrap_or(NonZeroUsize::MIN);

        Self {
            entries: RwLock::new(LruCache::new(capacity)),
            max_entry_chars,
            stats: RwLock::new(CacheStats::default()),
        }
    }

    /// 读取条目
    pub fn get(&self, document_id: &str) -> Option<CacheEntry> {
        let entry = match self.entries.read() {
            Ok(entries) => entries.peek(document_id).cloned(),
            Err(e) => {
                tracing::warn!("缓存锁异常: {}", e);
                None
            }
        };

        self.update_stats(|stats| {
            if entry.is_some() {
                stats.hits += 1;
            } else {
                stats.misses += 1;
            }
        });

        entry
    }

    /// 写入条目，重复写入同一 id 会将其移到最新位置
    ///
    /// id 为空或译文超出单条上限时不写入，返回 `false`
    pub fn put(&self, document_id: &str, entry: CacheEntry) -> bool {
        if document_id.is_empty() {
            return false;
        }

        if entry.translated_html.chars().count() > self.max_entry_chars {
            tracing::debug!("译文过大，跳过缓存: {}", document_id);
            self.update_stats(|stats| stats.rejected += 1);
            return false;
        }

        let mut entries = match self.entries.write() {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("缓存锁异常: {}", e);
                return false;
            }
        };

        let displaced = entries.push(document_id.to_string(), entry);
        drop(entries);

        let evicted = matches!(displaced, Some((ref key, _)) if key != document_id);
        if let Some((key, _)) = displaced.filter(|_| evicted) {
            tracing::debug!("缓存已满，淘汰最早条目: {}", key);
        }

        self.update_stats(|stats| {
            stats.insertions += 1;
            if evicted {
                stats.evictions += 1;
            }
        });
        true
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
            .read()
            .map(|stats| stats.clone())
            .unwrap_or_default()
    }

    fn update_stats<F: FnOnce(&mut CacheStats)>(&self, update: F) {
        if let Ok(mut stats) = self.stats.write() {
            update(&mut stats);
        }
    }
}

impl Default for TranslationCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TranslationCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationCache")
            .field("len", &self.len())
            .field("max_entry_chars", &self.max_entry_chars)
            .finish()
    }
}
