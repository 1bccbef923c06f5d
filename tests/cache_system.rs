//! 缓存系统集成测试
//!
//! 测试缓存容量、淘汰顺序以及与协调器配合时的失效规则

use std::sync::Arc;

use ai_translator::translation::storage::{content_hash, CacheEntry, TranslationCache};
use ai_translator::translation::{
    MessageTranslator, MockProvider, Phase, SettingsDraft, SubjectDocument, TranslatorConfig,
};

#[allow(dead_code)]
mod common {
    include!("common/mod.rs");
}

use common::{empty_cache, mock_service, reply_json, SampleMail};

fn entry(html: &str, body: &str) -> CacheEntry {
    CacheEntry::new(
        html.to_string(),
        TranslatorConfig::default().fingerprint(),
        content_hash(body),
    )
}

/// 测试默认容量：第 51 条写入时淘汰最早的条目
#[test]
fn test_default_capacity_evicts_oldest() {
    let cache = TranslationCache::new();

    for i in 0..50 {
        assert!(cache.put(&format!("msg-{}", i), entry("<p>x</p>", "body")));
    }
    assert_eq!(cache.len(), 50);
    assert_eq!(cache.stats().evictions, 0);

    assert!(cache.put("msg-50", entry("<p>y</p>", "body")));

    assert_eq!(cache.len(), 50);
    assert!(cache.get("msg-0").is_none());
    assert!(cache.get("msg-1").is_some());
    assert!(cache.get("msg-50").is_some());
    assert_eq!(cache.stats().evictions, 1);
}

/// 测试读取不会刷新条目位置
#[test]
fn test_reads_do_not_protect_entries() {
    let cache = TranslationCache::with_limits(2, 1000);
    cache.put("a", entry("A", "a"));
    cache.put("b", entry("B", "b"));

    for _ in 0..5 {
        assert!(cache.get("a").is_some());
    }
    cache.put("c", entry("C", "c"));

    assert!(cache.get("a").is_none(), "oldest insert is evicted despite reads");
    assert!(cache.get("b").is_some());
}

/// 测试超出单条上限的译文不写入
#[test]
fn test_oversized_translation_is_rejected() {
    let cache = TranslationCache::new();
    let huge = "a".repeat(120_001);
    let exact = "b".repeat(120_000);

    assert!(!cache.put("huge", entry(&huge, "body")));
    assert!(cache.put("exact", entry(&exact, "body")));

    assert!(cache.get("huge").is_none());
    assert_eq!(cache.stats().rejected, 1);
    assert_eq!(cache.len(), 1);
}

/// 测试条目校验：设置指纹和正文哈希都必须一致
#[test]
fn test_entry_validation() {
    let config = TranslatorConfig::default();
    let cached = entry("<p>你好</p>", "<p>Hello</p>");

    assert!(cached.matches(&config.fingerprint(), &content_hash("<p>Hello</p>")));
    assert!(!cached.matches(&config.fingerprint(), &content_hash("<p>Hello!</p>")));

    let other = TranslatorConfig {
        target_language: "ja".to_string(),
        ..TranslatorConfig::default()
    };
    assert!(!cached.matches(&other.fingerprint(), &content_hash("<p>Hello</p>")));
}

/// 测试 API Key 不参与指纹
#[test]
fn test_api_key_does_not_affect_fingerprint() {
    let with_key = TranslatorConfig {
        api_key: "secret-key".to_string(),
        ..TranslatorConfig::default()
    };

    assert_eq!(with_key.fingerprint(), TranslatorConfig::default().fingerprint());
    assert!(!with_key.fingerprint().contains("secret-key"));
}

/// 测试翻译结果写入缓存，再次打开同一封邮件时直接恢复
#[tokio::test]
async fn test_translation_survives_view_remount() {
    let provider = Arc::new(MockProvider::replying(&reply_json(&[
        ("seg_1", "你好"),
        ("seg_2", "嵌套"),
    ])));
    let service = Arc::new(mock_service(&provider));
    let cache = empty_cache();

    let first = MessageTranslator::new(service.clone(), cache.clone());
    first.mount(SubjectDocument::new("msg-1", SampleMail::simple()));
    first.translate().await;
    first.unmount();
    assert_eq!(cache.len(), 1);

    let second = MessageTranslator::new(service, cache.clone());
    second.mount(SubjectDocument::new("msg-1", SampleMail::simple()));

    let state = second.state();
    assert_eq!(state.phase, Phase::Succeeded);
    assert_eq!(
        state.translation.as_deref(),
        Some("<p>你好</p><div><p>嵌套</p></div>")
    );
    assert_eq!(provider.calls(), 1, "restored from cache without calling the backend");
}

/// 测试目标语言变化后缓存不再可用
#[tokio::test]
async fn test_settings_change_invalidates_cached_translation() {
    let provider = Arc::new(MockProvider::replying(&reply_json(&[
        ("seg_1", "你好"),
        ("seg_2", "嵌套"),
    ])));
    let service = Arc::new(mock_service(&provider));
    let cache = empty_cache();

    let translator = MessageTranslator::new(service.clone(), cache.clone());
    translator.mount(SubjectDocument::new("msg-1", SampleMail::simple()));
    translator.translate().await;

    assert!(translator.save_settings(&SettingsDraft {
        target_language: Some("fr".to_string()),
        ..Default::default()
    }));
    assert!(translator.state().translation.is_none());

    let reopened = MessageTranslator::new(service, cache.clone());
    reopened.mount(SubjectDocument::new("msg-1", SampleMail::simple()));
    assert!(reopened.state().translation.is_none());
    assert_eq!(reopened.state().phase, Phase::Idle);
}

/// 测试正文变化后缓存不再可用
#[tokio::test]
async fn test_edited_body_invalidates_cached_translation() {
    let cache = empty_cache();
    cache.put("msg-1", entry("<p>旧译文</p>", "<p>Old body</p>"));

    let provider = Arc::new(MockProvider::new());
    let translator = MessageTranslator::new(Arc::new(mock_service(&provider)), cache.clone());
    translator.mount(SubjectDocument::new("msg-1", "<p>New body</p>"));

    assert!(translator.state().translation.is_none());

    translator.set_document(SubjectDocument::new("msg-2", "<p>Other</p>"));
    translator.set_document(SubjectDocument::new("msg-1", "<p>Old body</p>"));
    assert_eq!(
        translator.state().translation.as_deref(),
        Some("<p>旧译文</p>")
    );
}
