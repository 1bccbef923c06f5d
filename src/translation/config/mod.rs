//! 翻译配置管理模块
//!
//! 提供设置读写（存储后端可替换）、环境变量覆盖与默认值

pub mod manager;
pub mod store;

// 重新导出主要类型
pub use manager::{normalize_ollama_host, ConfigManager, ProviderKind, SettingsDraft, TranslatorConfig};
pub use store::{FileStore, MemoryStore, SettingsStore};

/// 配置常量
pub mod constants {
    use std::time::Duration;

    // 硬性上限，不可配置
    pub const MAX_INPUT_CHARS: usize = 120_000;
    pub const MAX_SEGMENTS: usize = 120;
    pub const MAX_TOTAL_SEGMENT_CHARS: usize = 80_000;
    pub const REQUEST_TIMEOUT: Duration = Duration::from_millis(60_000);

    // 缓存上限
    pub const MAX_CACHE_ENTRIES: usize = 50;
    pub const MAX_CACHE_CHARS: usize = 120_000;

    // 默认设置
    pub const DEFAULT_PROVIDER: &str = "gemini";
    pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
    pub const DEFAULT_TARGET_LANGUAGE: &str = "zh-CN";
    pub const DEFAULT_OLLAMA_HOST: &str = "http://127.0.0.1:11434";
    pub const DEFAULT_OLLAMA_MODEL: &str = "qwen3";

    // 托管后端
    pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";

    // 设置存储键
    pub const SETTINGS_NAMESPACE: &str = "ai-translator";
    pub const KEY_PROVIDER: &str = "provider";
    pub const KEY_API_KEY: &str = "apiKey";
    pub const KEY_MODEL: &str = "model";
    pub const KEY_TARGET_LANGUAGE: &str = "targetLanguage";
    pub const KEY_OLLAMA_HOST: &str = "ollamaHost";
    pub const KEY_OLLAMA_MODEL: &str = "ollamaModel";

    // 配置文件搜索路径
    pub const CONFIG_PATHS: &[&str] = &[
        "ai-translator.toml",
        ".ai-translator.toml",
        "~/.config/ai-translator/settings.toml",
    ];

    /// 未找到已有配置文件时写入的位置
    pub const DEFAULT_SETTINGS_PATH: &str = "~/.config/ai-translator/settings.toml";
}

/// 拼接带命名空间的存储键
pub fn settings_key(field: &str) -> String {
    format!("{}.{}", constants::SETTINGS_NAMESPACE, field)
}
