//! 设置存储后端
//!
//! 键为 `ai-translator.<字段>`，值一律为字符串

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::translation::error::{TranslationError, TranslationResult};

use super::constants;

/// 键值设置存储
pub trait SettingsStore: Send + Sync {
    /// 读取设置；未保存过时返回 `None`
    fn read(&self, key: &str) -> Option<String>;

    /// 写入设置
    fn write(&self, key: &str, value: &str) -> TranslationResult<()>;
}

/// 内存设置存储
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
    read_only: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 拒绝所有写入的存储，模拟宿主环境不允许保存设置
    pub fn read_only() -> Self {
        Self {
            values: RwLock::new(HashMap::new()),
            read_only: true,
        }
    }

    /// 预置若干设置
    pub fn with_values<I, K, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: RwLock::new(
                values
                    .into_iter()
                    .map(|(key, value)| (key.into(), value.into()))
                    .collect(),
            ),
            read_only: false,
        }
    }
}

impl SettingsStore for MemoryStore {
    fn read(&self, key: &str) -> Option<String> {
        self.values.read().ok()?.get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) -> TranslationResult<()> {
        if self.read_only {
            return Err(TranslationError::StoreError(format!(
                "store is read-only, cannot write {}",
                key
            )));
        }

        let mut values = self
            .values
            .write()
            .map_err(|e| TranslationError::StoreError(format!("lock poisoned: {}", e)))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// TOML 文件设置存储
///
/// 打开时整体读入内存，每次写入后整体落盘
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: RwLock<BTreeMap<String, String>>,
}

impl FileStore {
    /// 打开设置文件；文件不存在时以空设置开始，首次写入时创建
    pub fn open<P: AsRef<Path>>(path: P) -> TranslationResult<Self> {
        let path = PathBuf::from(shellexpand::tilde(&path.as_ref().to_string_lossy()).as_ref());

        let values = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let values: BTreeMap<String, String> = toml::from_str(&content)?;
            tracing::info!("加载设置文件: {}", path.display());
            values
        } else {
            tracing::debug!("设置文件不存在，使用默认设置: {}", path.display());
            BTreeMap::new()
        };

        Ok(Self {
            path,
            values: RwLock::new(values),
        })
    }

    /// 按搜索路径查找已有设置文件，找不到时使用默认位置
    pub fn resolve_path() -> PathBuf {
        for path in constants::CONFIG_PATHS {
            let expanded_path = shellexpand::tilde(path);
            if Path::new(expanded_path.as_ref()).exists() {
                return PathBuf::from(expanded_path.as_ref());
            }
        }

        PathBuf::from(shellexpand::tilde(constants::DEFAULT_SETTINGS_PATH).as_ref())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, values: &BTreeMap<String, String>) -> TranslationResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let content = toml::to_string_pretty(values)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

impl SettingsStore for FileStore {
    fn read(&self, key: &str) -> Option<String> {
        self.values.read().ok()?.get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) -> TranslationResult<()> {
        let mut values = self
            .values
            .write()
            .map_err(|e| TranslationError::StoreError(format!("lock poisoned: {}", e)))?;

        let previous = values.insert(key.to_string(), value.to_string());
        if let Err(error) = self.persist(&values) {
            // 落盘失败时回滚内存中的值
            match previous {
                Some(previous) => values.insert(key.to_string(), previous),
                None => values.remove(key),
            };
            return Err(error);
        }

        Ok(())
    }
}
