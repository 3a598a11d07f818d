//! Memory Layer - In-Memory Adapters
//!
//! FileIndex 和 IdentityResolver 的内存实现，用于测试与嵌入式部署

mod file_index;
mod identity_resolver;

pub use file_index::InMemoryFileIndex;
pub use identity_resolver::InMemoryIdentityResolver;
