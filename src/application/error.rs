//! 应用层错误定义
//!
//! 网关内部的失败分类，最终映射为 `GateDecision`

use thiserror::Error;

use crate::application::ports::StorageError;
use crate::domain::FileError;

/// 网关错误
#[derive(Debug, Error)]
pub enum GateError {
    /// 无法确定默认存储
    #[error("Default storage cannot be determined, please check the configuration of the default file storage")]
    NoDefaultStorage,

    /// 文件元数据无法解析（例如 `fe_groups` 含非数字项）
    #[error("File storage is misconfigured: {0}")]
    Misconfigured(String),

    #[error("Malformed file identifier: {0}")]
    MalformedIdentifier(#[from] FileError),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl GateError {
    /// 配置错误会以 503 失败关闭，其余一律视为 404
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, Self::NoDefaultStorage | Self::Misconfigured(_))
    }
}

impl From<StorageError> for GateError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::InvalidMetadata { .. } => Self::Misconfigured(err.to_string()),
            StorageError::FileNotFound(identifier) => Self::FileNotFound(identifier),
            other => Self::Storage(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_errors() {
        assert!(GateError::NoDefaultStorage.is_configuration_error());
        assert!(GateError::Misconfigured("x".into()).is_configuration_error());
        assert!(!GateError::FileNotFound("/a.pdf".into()).is_configuration_error());
        assert!(!GateError::AccessDenied("/a.pdf".into()).is_configuration_error());
        assert!(!GateError::Storage("io".into()).is_configuration_error());
    }

    #[test]
    fn test_invalid_metadata_maps_to_misconfigured() {
        let source = "3,x"
            .parse::<crate::domain::AccessGroups>()
            .unwrap_err();
        let err = GateError::from(StorageError::InvalidMetadata {
            identifier: "/a.pdf".into(),
            source,
        });
        assert!(err.is_configuration_error());

        let err = GateError::from(StorageError::IoError("disk".into()));
        assert!(!err.is_configuration_error());
    }
}
