//! Domain Layer - 领域层
//!
//! 包含两个限界上下文:
//! - File Context: 受保护前缀、文件标识、文件记录
//! - Access Context: 用户组与请求者身份

pub mod access;
pub mod file;

pub use access::{AccessGroups, GroupId, GroupListError, Identity};
pub use file::{FileError, FileIdentifier, FileRecord, ProtectedPrefix, Visibility};
