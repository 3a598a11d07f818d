//! Storage Adapters - 文件存储适配器

mod file_storage;
mod registry;

pub use file_storage::{LocalFileStorage, LocalStorageConfig, DEFAULT_PROCESSING_FOLDER};
pub use registry::StorageRegistry;
