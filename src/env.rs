//! 统一的环境变量管理系统
//!
//! 提供类型安全、可验证的环境变量访问；翻译相关变量作为持久化设置之上的覆盖层

use std::env;
use std::fmt;

/// 环境变量解析错误
#[derive(Debug, Clone)]
pub struct EnvError {
    pub variable: String,
    pub message: String,
}

impl fmt::Display for EnvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Environment variable '{}': {}", self.variable, self.message)
    }
}

impl std::error::Error for EnvError {}

pub type EnvResult<T> = Result<T, EnvError>;

/// 环境变量访问器特性
pub trait EnvVar<T> {
    const NAME: &'static str;
    const DEFAULT: Option<T>;
    const DESCRIPTION: &'static str;

    fn parse(value: &str) -> EnvResult<T>;

    fn get() -> EnvResult<T> {
        match Self::lookup()? {
            Some(value) => Ok(value),
            None => match Self::DEFAULT {
                Some(default) => Ok(default),
                None => Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Required environment variable not set".to_string(),
                }),
            },
        }
    }

    /// 读取并解析变量；未设置或为空时返回 `None`
    fn lookup() -> EnvResult<Option<T>> {
        match env::var(Self::NAME) {
            Ok(value) if !value.trim().is_empty() => Self::parse(&value).map(Some),
            _ => Ok(None),
        }
    }

    fn get_or_default(default: T) -> T {
        Self::get().unwrap_or(default)
    }
}

/// 核心环境变量定义
pub mod core {
    use super::*;

    /// 日志级别
    pub struct LogLevel;
    impl EnvVar<String> for LogLevel {
        const NAME: &'static str = "AI_TRANSLATOR_LOG_LEVEL";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Log level: trace, debug, info, warn, error";

        fn get() -> EnvResult<String> {
            Ok(Self::lookup()?.unwrap_or_else(|| "info".to_string()))
        }

        fn parse(value: &str) -> EnvResult<String> {
            match value.trim().to_lowercase().as_str() {
                level @ ("trace" | "debug" | "info" | "warn" | "error") => Ok(level.to_string()),
                _ => Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: format!(
                        "Invalid log level '{}'. Use: trace, debug, info, warn, error",
                        value
                    ),
                }),
            }
        }
    }

    /// 设置文件路径
    pub struct SettingsPath;
    impl EnvVar<String> for SettingsPath {
        const NAME: &'static str = "AI_TRANSLATOR_SETTINGS";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Path of the TOML settings file";

        fn parse(value: &str) -> EnvResult<String> {
            Ok(value.trim().to_string())
        }
    }
}

/// 翻译相关环境变量（覆盖持久化设置）
pub mod translation {
    use super::*;
    use crate::translation::language::is_supported_language;

    /// 翻译后端
    pub struct Provider;
    impl EnvVar<String> for Provider {
        const NAME: &'static str = "AI_TRANSLATOR_PROVIDER";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Translation backend: gemini, ollama";

        fn parse(value: &str) -> EnvResult<String> {
            match value.trim().to_lowercase().as_str() {
                provider @ ("gemini" | "ollama") => Ok(provider.to_string()),
                _ => Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: format!("Invalid provider '{}'. Use: gemini, ollama", value),
                }),
            }
        }
    }

    /// 托管后端 API Key
    pub struct ApiKey;
    impl EnvVar<String> for ApiKey {
        const NAME: &'static str = "AI_TRANSLATOR_API_KEY";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str =
            "API key for the hosted backend (GEMINI_API_KEY is used as a fallback)";

        fn lookup() -> EnvResult<Option<String>> {
            for name in [Self::NAME, "GEMINI_API_KEY"] {
                if let Ok(value) = env::var(name) {
                    if !value.trim().is_empty() {
                        return Self::parse(&value).map(Some);
                    }
                }
            }
            Ok(None)
        }

        fn parse(value: &str) -> EnvResult<String> {
            Ok(value.trim().to_string())
        }
    }

    /// 托管模型
    pub struct Model;
    impl EnvVar<String> for Model {
        const NAME: &'static str = "AI_TRANSLATOR_MODEL";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Hosted model identifier, e.g. gemini-2.5-flash";

        fn parse(value: &str) -> EnvResult<String> {
            Ok(value.trim().to_string())
        }
    }

    /// 目标语言
    pub struct TargetLang;
    impl EnvVar<String> for TargetLang {
        const NAME: &'static str = "AI_TRANSLATOR_TARGET_LANG";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Target language code, e.g. zh-CN, en, ja";

        fn parse(value: &str) -> EnvResult<String> {
            let code = value.trim();
            if is_supported_language(code) {
                Ok(code.to_string())
            } else {
                Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: format!("Unsupported target language '{}'", code),
                })
            }
        }
    }

    /// 本地后端地址
    pub struct OllamaHost;
    impl EnvVar<String> for OllamaHost {
        const NAME: &'static str = "AI_TRANSLATOR_OLLAMA_HOST";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Local backend base URL, e.g. http://127.0.0.1:11434";

        fn parse(value: &str) -> EnvResult<String> {
            let url = value.trim();
            if url.starts_with("http://") || url.starts_with("https://") {
                Ok(url.to_string())
            } else {
                Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Host must start with http:// or https://".to_string(),
                })
            }
        }
    }

    /// 本地模型
    pub struct OllamaModel;
    impl EnvVar<String> for OllamaModel {
        const NAME: &'static str = "AI_TRANSLATOR_OLLAMA_MODEL";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Local model name, e.g. qwen3";

        fn parse(value: &str) -> EnvResult<String> {
            Ok(value.trim().to_string())
        }
    }
}

/// 翻译设置的环境覆盖值
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslatorEnv {
    pub provider: Option<String>,
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub target_language: Option<String>,
    pub ollama_host: Option<String>,
    pub ollama_model: Option<String>,
}

impl TranslatorEnv {
    /// 从环境变量读取覆盖值
    pub fn from_env() -> EnvResult<Self> {
        Ok(Self {
            provider: translation::Provider::lookup()?,
            api_key: translation::ApiKey::lookup()?,
            model: translation::Model::lookup()?,
            target_language: translation::TargetLang::lookup()?,
            ollama_host: translation::OllamaHost::lookup()?,
            ollama_model: translation::OllamaModel::lookup()?,
        })
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// 生成环境变量文档
pub fn generate_env_docs() -> String {
    let mut docs = String::new();
    docs.push_str("# Environment Variables\n\n");

    docs.push_str("## Core Configuration\n\n");
    push_doc::<core::LogLevel>(&mut docs);
    push_doc::<core::SettingsPath>(&mut docs);

    docs.push_str("\n## Translation Configuration\n\n");
    push_doc::<translation::Provider>(&mut docs);
    push_doc::<translation::ApiKey>(&mut docs);
    push_doc::<translation::Model>(&mut docs);
    push_doc::<translation::TargetLang>(&mut docs);
    push_doc::<translation::OllamaHost>(&mut docs);
    push_doc::<translation::OllamaModel>(&mut docs);

    docs
}

fn push_doc<V: EnvVar<String>>(docs: &mut String) {
    docs.push_str(&format!(
        "- `{}`: {} (default: {:?})\n",
        V::NAME,
        V::DESCRIPTION,
        V::DEFAULT
    ));
}
