//! File Index Port - 文件元数据索引
//!
//! 存储驱动只知道文件本身，可见性与用户组来自索引

use async_trait::async_trait;

use super::StorageError;
use crate::domain::FileIdentifier;

/// 索引中的文件元数据
///
/// 字段为 `None` 表示该属性缺失
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileMetadata {
    pub mime_type: Option<String>,
    pub visible: Option<bool>,
    /// 原始的逗号分隔组列表
    pub fe_groups: Option<String>,
}

impl FileMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = Some(visible);
        self
    }

    pub fn with_fe_groups(mut self, fe_groups: impl Into<String>) -> Self {
        self.fe_groups = Some(fe_groups.into());
        self
    }
}

#[async_trait]
pub trait FileIndexPort: Send + Sync {
    /// 查询文件元数据，未建立索引时返回 `None`
    async fn find_metadata(
        &self,
        identifier: &FileIdentifier,
    ) -> Result<Option<FileMetadata>, StorageError>;
}
