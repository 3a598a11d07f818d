//! File Context - 受管文件上下文
//!
//! 职责:
//! - 受保护前缀与文件标识的解析
//! - 文件记录（只读，每个请求由存储协作方构建）

mod errors;
mod record;
mod value_objects;

pub use errors::FileError;
pub use record::{FileRecord, Visibility};
pub use value_objects::{FileIdentifier, ProtectedPrefix};
