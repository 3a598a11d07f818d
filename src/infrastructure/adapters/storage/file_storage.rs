//! File Storage - 本地文件系统存储实现
//!
//! 实现 FileStoragePort trait：文件内容来自 base_dir，
//! 可见性与用户组来自 FileIndexPort

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;

use crate::application::ports::{
    ByteSource, FileIndexPort, FileMetadata, FileStoragePort, StorageError,
};
use crate::domain::{AccessGroups, FileIdentifier, FileRecord};

/// 默认处理目录名
pub const DEFAULT_PROCESSING_FOLDER: &str = "_processed_";

/// 本地存储配置
#[derive(Debug, Clone)]
pub struct LocalStorageConfig {
    /// 存储名称
    pub name: String,
    /// 存储根目录（必须已存在）
    pub base_dir: PathBuf,
    /// 处理目录（相对根目录的单段目录名）
    pub processing_folder: String,
}

impl LocalStorageConfig {
    pub fn new(name: impl Into<String>, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            base_dir: base_dir.into(),
            processing_folder: DEFAULT_PROCESSING_FOLDER.to_string(),
        }
    }
}

/// 本地文件系统存储
pub struct LocalFileStorage {
    name: String,
    /// 规范化后的根目录
    base_dir: PathBuf,
    processing_folder: String,
    index: Arc<dyn FileIndexPort>,
}

impl LocalFileStorage {
    /// 创建存储，根目录不存在时返回错误
    pub async fn new(
        config: LocalStorageConfig,
        index: Arc<dyn FileIndexPort>,
    ) -> Result<Self, StorageError> {
        let base_dir = fs::canonicalize(&config.base_dir).await.map_err(|e| {
            StorageError::IoError(format!("{}: {}", config.base_dir.display(), e))
        })?;

        if !fs::metadata(&base_dir)
            .await
            .map_err(|e| StorageError::IoError(e.to_string()))?
            .is_dir()
        {
            return Err(StorageError::IoError(format!(
                "{} is not a directory",
                base_dir.display()
            )));
        }

        Ok(Self {
            name: config.name,
            base_dir,
            processing_folder: config.processing_folder,
            index,
        })
    }

    /// 获取存储根目录
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// 解析文件的真实路径；不存在或逃逸出根目录（符号链接）时返回 None
    async fn resolve_path(
        &self,
        identifier: &FileIdentifier,
    ) -> Result<Option<PathBuf>, StorageError> {
        let candidate = self.base_dir.join(identifier.relative_path());

        match fs::canonicalize(&candidate).await {
            Ok(real) if real.starts_with(&self.base_dir) => Ok(Some(real)),
            Ok(real) => {
                tracing::debug!(
                    identifier = %identifier,
                    resolved = %real.display(),
                    "File resolves outside of storage root"
                );
                Ok(None)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::IoError(e.to_string())),
        }
    }

    async fn require_path(&self, identifier: &FileIdentifier) -> Result<PathBuf, StorageError> {
        self.resolve_path(identifier)
            .await?
            .ok_or_else(|| StorageError::FileNotFound(identifier.to_string()))
    }

    fn build_record(
        &self,
        identifier: &FileIdentifier,
        size: u64,
        metadata: Option<FileMetadata>,
    ) -> Result<FileRecord, StorageError> {
        // 未建立索引的文件：可见、无用户组限制
        let metadata = metadata.unwrap_or_default();

        let mime_type = metadata
            .mime_type
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| guess_mime_type(identifier));

        // 处理目录中的文件不做访问检查，其用户组数据也不解析
        let fe_groups = match metadata.fe_groups.as_deref() {
            _ if self.is_within_processing_folder(identifier) => AccessGroups::new(),
            Some(list) => list
                .parse::<AccessGroups>()
                .map_err(|source| StorageError::InvalidMetadata {
                    identifier: identifier.to_string(),
                    source,
                })?,
            None => AccessGroups::new(),
        };

        Ok(FileRecord::new(identifier.clone(), mime_type, size)
            .with_visible(metadata.visible.unwrap_or(true))
            .with_access_groups(fe_groups))
    }
}

#[async_trait]
impl FileStoragePort for LocalFileStorage {
    fn name(&self) -> &str {
        &self.name
    }

    async fn has_file(&self, identifier: &FileIdentifier) -> Result<bool, StorageError> {
        let Some(path) = self.resolve_path(identifier).await? else {
            return Ok(false);
        };

        let metadata = fs::metadata(&path)
            .await
            .map_err(|e| StorageError::IoError(e.to_string()))?;

        Ok(metadata.is_file())
    }

    async fn get_file(&self, identifier: &FileIdentifier) -> Result<FileRecord, StorageError> {
        let path = self.require_path(identifier).await?;

        let file_metadata = fs::metadata(&path)
            .await
            .map_err(|e| StorageError::IoError(e.to_string()))?;
        if !file_metadata.is_file() {
            return Err(StorageError::FileNotFound(identifier.to_string()));
        }

        let index_metadata = self.index.find_metadata(identifier).await?;

        self.build_record(identifier, file_metadata.len(), index_metadata)
    }

    fn is_within_processing_folder(&self, identifier: &FileIdentifier) -> bool {
        identifier.is_within_folder(&self.processing_folder)
    }

    async fn open_local(&self, record: &FileRecord) -> Result<ByteSource, StorageError> {
        let path = self.require_path(record.identifier()).await?;

        let file = fs::File::open(&path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => StorageError::FileNotFound(record.identifier().to_string()),
            _ => StorageError::IoError(e.to_string()),
        })?;

        Ok(Box::new(file))
    }
}

/// 根据扩展名推断 Content-Type
fn guess_mime_type(identifier: &FileIdentifier) -> String {
    identifier
        .extension()
        .map(|ext| mime_guess::from_ext(ext).first_or_octet_stream())
        .unwrap_or(mime_guess::mime::APPLICATION_OCTET_STREAM)
        .to_string()
}
