use crate::error::{CoreError, CoreResult};
use crate::storage::{DurableStorage, FileStorage, MemoryStorage};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const DEFAULT_PERMISSIONS_KEY: &str = "operator_permissions";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CoreConfig {
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

impl CoreConfig {
    /// Reads a JSON config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = fs::read_to_string(path)?;
        let cfg: CoreConfig = serde_json::from_str(&data)?;
        Ok(cfg)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageMode {
    #[default]
    Memory,
    File,
    /// Non-interactive rendering: no durable backend exists.
    Disabled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub mode: StorageMode,
    pub root_dir: Option<PathBuf>,
    pub permissions_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            mode: StorageMode::default(),
            root_dir: None,
            permissions_key: DEFAULT_PERMISSIONS_KEY.to_string(),
        }
    }
}

impl StorageConfig {
    /// Opens the configured backend, or `None` when persistence is disabled.
    pub fn open(&self) -> CoreResult<Option<Arc<dyn DurableStorage>>> {
        match self.mode {
            StorageMode::Disabled => Ok(None),
            StorageMode::Memory => Ok(Some(Arc::new(MemoryStorage::new()))),
            StorageMode::File => {
                let root = self.root_dir.clone().ok_or_else(|| {
                    CoreError::Config("storage.root_dir is required in file mode".to_string())
                })?;
                Ok(Some(Arc::new(FileStorage::new(root))))
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    pub filter: Option<String>,
}
