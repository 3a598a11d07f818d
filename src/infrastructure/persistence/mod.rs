//! Persistence Layer - 数据持久化
//!
//! SQLite 文件元数据索引与前台会话

pub mod sqlite;

pub use self::sqlite::{SqliteFileIndex, SqliteIdentityResolver};
