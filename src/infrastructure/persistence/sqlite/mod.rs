//! SQLite Persistence - SQLite 数据库持久化实现

mod database;
mod file_index;
mod identity_resolver;

pub use database::*;
pub use file_index::*;
pub use identity_resolver::*;
