//! Storage Registry - 默认存储注册表
//!
//! 启动时构建一次，之后只读

use std::sync::Arc;

use super::{LocalFileStorage, LocalStorageConfig};
use crate::application::ports::{FileIndexPort, FileStoragePort, StorageRegistryPort};

/// 默认存储注册表
pub struct StorageRegistry {
    default_storage: Option<Arc<dyn FileStoragePort>>,
}

impl StorageRegistry {
    pub fn new(default_storage: Arc<dyn FileStoragePort>) -> Self {
        Self {
            default_storage: Some(default_storage),
        }
    }

    /// 没有默认存储：所有受保护请求都会返回 503
    pub fn unconfigured() -> Self {
        Self {
            default_storage: None,
        }
    }

    /// 根据配置构建本地存储，配置缺失或根目录不可用时不注册默认存储
    pub async fn from_local_config(
        config: Option<LocalStorageConfig>,
        index: Arc<dyn FileIndexPort>,
    ) -> Self {
        let Some(config) = config else {
            tracing::warn!("No default storage configured, protected files will not be served");
            return Self::unconfigured();
        };

        let name = config.name.clone();
        match LocalFileStorage::new(config, index).await {
            Ok(storage) => {
                tracing::info!(
                    storage = %name,
                    base_dir = %storage.base_dir().display(),
                    "Default storage registered"
                );
                Self::new(Arc::new(storage))
            }
            Err(e) => {
                tracing::warn!(storage = %name, error = %e, "Default storage is unavailable");
                Self::unconfigured()
            }
        }
    }
}

impl StorageRegistryPort for StorageRegistry {
    fn default_storage(&self) -> Option<Arc<dyn FileStoragePort>> {
        self.default_storage.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory::InMemoryFileIndex;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_missing_config_is_unconfigured() {
        let registry =
            StorageRegistry::from_local_config(None, Arc::new(InMemoryFileIndex::new())).await;
        assert!(registry.default_storage().is_none());
    }

    #[tokio::test]
    async fn test_missing_base_dir_is_unconfigured() {
        let temp_dir = tempdir().unwrap();
        let config = LocalStorageConfig::new("fileadmin", temp_dir.path().join("nope"));
        let registry =
            StorageRegistry::from_local_config(Some(config), Arc::new(InMemoryFileIndex::new()))
                .await;
        assert!(registry.default_storage().is_none());
    }

    #[tokio::test]
    async fn test_existing_base_dir_is_registered() {
        let temp_dir = tempdir().unwrap();
        let config = LocalStorageConfig::new("fileadmin", temp_dir.path());
        let registry =
            StorageRegistry::from_local_config(Some(config), Arc::new(InMemoryFileIndex::new()))
                .await;

        let storage = registry.default_storage().unwrap();
        assert_eq!(storage.name(), "fileadmin");
    }
}
