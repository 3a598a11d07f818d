//! File Context - Errors

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FileError {
    #[error("无效的受保护前缀: {0:?}")]
    InvalidPrefix(String),

    #[error("无效的文件标识: {0:?}")]
    InvalidIdentifier(String),
}
