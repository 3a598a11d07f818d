//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（FileStorage、StorageRegistry、FileIndex、IdentityResolver）
//! - queries: 受保护文件访问查询及网关
//! - error: 应用层错误定义

pub mod error;
pub mod ports;
pub mod queries;

pub use error::GateError;

pub use ports::{
    ByteSource, FileIndexPort, FileMetadata, FileStoragePort, IdentityError,
    IdentityResolverPort, StorageError, StorageRegistryPort,
};

pub use queries::{handlers::AccessGate, AccessFileQuery, GateDecision, ServedFile};
