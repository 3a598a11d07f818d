//! File Storage Port - 出站端口
//!
//! 定义受管文件存储的抽象接口，具体实现在 infrastructure/adapters 层

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::io::AsyncRead;

use crate::domain::{FileIdentifier, FileRecord, GroupListError};

/// 存储错误
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid metadata for {identifier}: {source}")]
    InvalidMetadata {
        identifier: String,
        #[source]
        source: GroupListError,
    },

    #[error("Index error: {0}")]
    IndexError(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// 可本地读取的字节源
pub type ByteSource = Box<dyn AsyncRead + Send + Unpin>;

/// File Storage Port - 出站端口
///
/// 把文件标识解析为文件记录，并提供文件内容
#[async_trait]
pub trait FileStoragePort: Send + Sync {
    /// 存储名称（用于日志）
    fn name(&self) -> &str;

    /// 检查文件是否存在
    async fn has_file(&self, identifier: &FileIdentifier) -> Result<bool, StorageError>;

    /// 获取文件记录
    async fn get_file(&self, identifier: &FileIdentifier) -> Result<FileRecord, StorageError>;

    /// 标识是否位于处理目录（缩略图等衍生文件）之内
    fn is_within_processing_folder(&self, identifier: &FileIdentifier) -> bool;

    /// 打开文件内容
    async fn open_local(&self, record: &FileRecord) -> Result<ByteSource, StorageError>;
}

/// Storage Registry Port
///
/// 提供安装的默认存储；配置错误时返回 `None`
pub trait StorageRegistryPort: Send + Sync {
    fn default_storage(&self) -> Option<Arc<dyn FileStoragePort>>;
}
