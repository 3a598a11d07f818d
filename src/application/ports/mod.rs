//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod file_index;
mod file_storage;
mod identity_resolver;

pub use file_index::{FileIndexPort, FileMetadata};
pub use file_storage::{ByteSource, FileStoragePort, StorageError, StorageRegistryPort};
pub use identity_resolver::{IdentityError, IdentityResolverPort};
