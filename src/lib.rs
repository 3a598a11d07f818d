//! filegate - 受保护上传目录的访问网关
//!
//! 拦截对上传目录下文件的直接 HTTP 请求，按文件的可见性与前台用户组
//! 判定当前访客能否查看，能则流式输出文件，否则统一返回 404。
//!
//! 架构设计: DDD + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - File Context: 受保护前缀、文件标识、文件记录
//! - Access Context: 用户组、请求者身份
//!
//! 应用层 (application/):
//! - Ports: FileStorage, StorageRegistry, FileIndex, IdentityResolver
//! - Queries: AccessGate（访问判定）
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: 网关中间件 + 静态文件服务
//! - Adapters: 本地文件存储、默认存储注册表
//! - Persistence: SQLite 文件元数据索引、前台会话
//! - Memory: 内存索引与会话（测试/嵌入）

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
