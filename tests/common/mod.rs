// 集成测试公共模块
//
// 提供测试辅助工具和共享功能

use std::sync::Arc;

use ai_translator::translation::config::{ConfigManager, MemoryStore, SettingsDraft};
use ai_translator::translation::{MockProvider, TranslationCache, TranslationService};

/// 测试邮件样本
pub struct SampleMail;

impl SampleMail {
    /// 两段普通正文，其中一段包在 div 中
    pub fn simple() -> &'static str {
        "<p>Hello</p><div><p>Nested</p></div>"
    }

    /// 带表格、列表、图片和脚本的营销邮件
    pub fn newsletter() -> &'static str {
        r#"<div class="wrapper">
  <h1>Weekly digest</h1>
  <table><tr><td>Top story of the week</td><td><img src="https://cdn.example.com/a.png"></td></tr></table>
  <ul><li>First item</li><li>Second <b>item</b></li></ul>
  <p>Read more <a href="https://example.com/more">here</a>.</p>
  <script>track()</script>
</div>"#
    }

    /// 生成 n 个段落
    pub fn paragraphs(count: usize) -> String {
        (1..=count)
            .map(|i| format!("<p>Paragraph number {}</p>", i))
            .collect()
    }
}

/// 构造回复 JSON 数组
pub fn reply_json(items: &[(&str, &str)]) -> String {
    let items: Vec<serde_json::Value> = items
        .iter()
        .map(|(id, html)| serde_json::json!({ "id": id, "html": html }))
        .collect();
    serde_json::Value::Array(items).to_string()
}

/// 默认设置（内存存储）
pub fn memory_manager() -> Arc<ConfigManager> {
    Arc::new(ConfigManager::in_memory())
}

/// 预先写入设置的管理器
pub fn manager_with(draft: SettingsDraft) -> Arc<ConfigManager> {
    let manager = ConfigManager::new(Arc::new(MemoryStore::new()));
    assert!(manager.save_config(&draft), "seeding settings should succeed");
    Arc::new(manager)
}

/// 使用测试后端的服务
pub fn mock_service(provider: &Arc<MockProvider>) -> TranslationService {
    TranslationService::new(memory_manager()).with_provider(provider.clone())
}

/// 使用测试后端和指定设置的服务
pub fn mock_service_with(
    provider: &Arc<MockProvider>,
    config_manager: Arc<ConfigManager>,
) -> TranslationService {
    TranslationService::new(config_manager).with_provider(provider.clone())
}

/// 默认容量的空缓存
pub fn empty_cache() -> Arc<TranslationCache> {
    Arc::new(TranslationCache::new())
}
