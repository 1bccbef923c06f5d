//! 翻译设置管理

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::env::TranslatorEnv;
use crate::translation::error::{TranslationError, TranslationResult};
use crate::translation::language;

use super::constants;
use super::settings_key;
use super::store::{FileStore, MemoryStore, SettingsStore};

/// 翻译后端类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// 托管后端
    #[default]
    Gemini,
    /// 本地后端
    Ollama,
}

impl ProviderKind {
    /// 解析后端名称，除 `ollama` 外一律视为托管后端
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("ollama") {
            ProviderKind::Ollama
        } else {
            ProviderKind::Gemini
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "gemini",
            ProviderKind::Ollama => "ollama",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 生效的翻译设置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslatorConfig {
    pub provider: ProviderKind,
    pub api_key: String,
    pub model: String,
    pub target_language: String,
    pub ollama_host: String,
    pub ollama_model: String,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            api_key: String::new(),
            model: constants::DEFAULT_MODEL.to_string(),
            target_language: constants::DEFAULT_TARGET_LANGUAGE.to_string(),
            ollama_host: constants::DEFAULT_OLLAMA_HOST.to_string(),
            ollama_model: constants::DEFAULT_OLLAMA_MODEL.to_string(),
        }
    }
}

impl TranslatorConfig {
    /// 影响译文内容的设置摘要，用于缓存校验；不包含 API Key
    pub fn fingerprint(&self) -> String {
        [
            self.provider.as_str(),
            self.model.as_str(),
            self.target_language.as_str(),
            self.ollama_host.as_str(),
            self.ollama_model.as_str(),
        ]
        .join("|")
    }

    /// 写入提示词的目标语言名称
    pub fn language_name(&self) -> &str {
        language::language_name(&self.target_language)
    }

    /// 以 API Key 前 4 位加掩码的形式展示，供日志与命令行输出
    pub fn masked_api_key(&self) -> String {
        if self.api_key.is_empty() {
            return String::new();
        }
        let prefix: String = self.api_key.chars().take(4).collect();
        format!("{}****", prefix)
    }

    fn apply_env(&mut self, env: &TranslatorEnv) {
        if let Some(provider) = &env.provider {
            self.provider = ProviderKind::parse(provider);
        }
        if let Some(api_key) = &env.api_key {
            self.api_key = api_key.clone();
        }
        if let Some(model) = &env.model {
            self.model = model.clone();
        }
        if let Some(target_language) = &env.target_language {
            self.target_language = target_language.clone();
        }
        if let Some(ollama_host) = &env.ollama_host {
            self.ollama_host = normalize_ollama_host(ollama_host);
        }
        if let Some(ollama_model) = &env.ollama_model {
            self.ollama_model = ollama_model.clone();
        }
    }
}

/// 设置表单草稿；为 `None` 的字段保持当前值
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsDraft {
    pub provider: Option<String>,
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub target_language: Option<String>,
    pub ollama_host: Option<String>,
    pub ollama_model: Option<String>,
}

impl SettingsDraft {
    /// 以当前设置为底，规范化草稿得到待保存的设置
    pub fn normalize(&self, current: &TranslatorConfig) -> TranslatorConfig {
        fn or_default(value: Option<&String>, current: &str, default: &str) -> String {
            match value {
                Some(value) if value.trim().is_empty() => default.to_string(),
                Some(value) => value.trim().to_string(),
                None => current.to_string(),
            }
        }

        TranslatorConfig {
            provider: self
                .provider
                .as_deref()
                .map(ProviderKind::parse)
                .unwrap_or(current.provider),
            api_key: self
                .api_key
                .as_deref()
                .map(|key| key.trim().to_string())
                .unwrap_or_else(|| current.api_key.clone()),
            model: or_default(self.model.as_ref(), &current.model, constants::DEFAULT_MODEL),
            target_language: or_default(
                self.target_language.as_ref(),
                &current.target_language,
                constants::DEFAULT_TARGET_LANGUAGE,
            ),
            ollama_host: self
                .ollama_host
                .as_deref()
                .map(normalize_ollama_host)
                .unwrap_or_else(|| current.ollama_host.clone()),
            ollama_model: or_default(
                self.ollama_model.as_ref(),
                &current.ollama_model,
                constants::DEFAULT_OLLAMA_MODEL,
            ),
        }
    }
}

impl From<&TranslatorConfig> for SettingsDraft {
    fn from(config: &TranslatorConfig) -> Self {
        Self {
            provider: Some(config.provider.as_str().to_string()),
            api_key: Some(config.api_key.clone()),
            model: Some(config.model.clone()),
            target_language: Some(config.target_language.clone()),
            ollama_host: Some(config.ollama_host.clone()),
            ollama_model: Some(config.ollama_model.clone()),
        }
    }
}

/// 规范化本地后端地址：去除首尾空白与末尾斜杠，空值使用默认地址
pub fn normalize_ollama_host(host: &str) -> String {
    let trimmed = host.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        constants::DEFAULT_OLLAMA_HOST.to_string()
    } else {
        trimmed.to_string()
    }
}

/// 设置管理器
pub struct ConfigManager {
    store: Arc<dyn SettingsStore>,
    env: Option<TranslatorEnv>,
}

impl ConfigManager {
    /// 基于给定存储创建管理器
    pub fn new(store: Arc<dyn SettingsStore>) -> Self {
        Self { store, env: None }
    }

    /// 使用内存存储
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// 从设置文件加载；未指定路径时按搜索路径查找
    pub fn load(path: Option<&Path>) -> TranslationResult<Self> {
        Self::load_dotenv();

        let store = match path {
            Some(path) => FileStore::open(path)?,
            None => FileStore::open(FileStore::resolve_path())?,
        };

        Ok(Self::new(Arc::new(store)))
    }

    /// 在存储的设置之上叠加环境变量
    pub fn with_env_overrides(mut self) -> TranslationResult<Self> {
        let env = TranslatorEnv::from_env()
            .map_err(|e| TranslationError::ConfigError(e.to_string()))?;

        if !env.is_empty() {
            tracing::debug!("应用环境变量覆盖: {:?}", env.provider);
            self.env = Some(env);
        }
        Ok(self)
    }

    /// 读取当前生效的设置
    pub fn get_config(&self) -> TranslatorConfig {
        let defaults = TranslatorConfig::default();
        let read = |field: &str, default: String| {
            self.store.read(&settings_key(field)).unwrap_or(default)
        };

        let mut config = TranslatorConfig {
            provider: self
                .store
                .read(&settings_key(constants::KEY_PROVIDER))
                .map(|value| ProviderKind::parse(&value))
                .unwrap_or(defaults.provider),
            api_key: read(constants::KEY_API_KEY, defaults.api_key),
            model: read(constants::KEY_MODEL, defaults.model),
            target_language: read(constants::KEY_TARGET_LANGUAGE, defaults.target_language),
            ollama_host: read(constants::KEY_OLLAMA_HOST, defaults.ollama_host),
            ollama_model: read(constants::KEY_OLLAMA_MODEL, defaults.ollama_model),
        };

        if let Some(env) = &self.env {
            config.apply_env(env);
        }

        config
    }

    /// 规范化并保存草稿，全部字段写入成功时返回 `true`
    pub fn save_config(&self, draft: &SettingsDraft) -> bool {
        let config = draft.normalize(&self.get_config());

        let writes = [
            (constants::KEY_PROVIDER, config.provider.as_str()),
            (constants::KEY_API_KEY, config.api_key.as_str()),
            (constants::KEY_MODEL, config.model.as_str()),
            (constants::KEY_TARGET_LANGUAGE, config.target_language.as_str()),
            (constants::KEY_OLLAMA_HOST, config.ollama_host.as_str()),
            (constants::KEY_OLLAMA_MODEL, config.ollama_model.as_str()),
        ];

        let mut all_saved = true;
        for (field, value) in writes {
            if let Err(e) = self.store.write(&settings_key(field), value) {
                tracing::warn!("保存设置 {} 失败: {}", field, e);
                all_saved = false;
            }
        }

        if all_saved {
            tracing::info!(
                "设置已保存: provider={}, model={}, target={}",
                config.provider,
                config.model,
                config.target_language
            );
        }
        all_saved
    }

    /// 加载 .env 文件
    fn load_dotenv() {
        let env_files = [".env.local", ".env"];

        for env_file in &env_files {
            if Path::new(env_file).exists() && dotenv::from_filename(env_file).is_ok() {
                tracing::info!("已加载环境变量文件: {}", env_file);
                break;
            }
        }
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl fmt::Debug for ConfigManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigManager")
            .field("env_overrides", &self.env.is_some())
            .finish()
    }
}
