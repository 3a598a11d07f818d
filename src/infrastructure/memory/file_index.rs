//! In-Memory File Index Implementation

use async_trait::async_trait;
use dashmap::DashMap;

use crate::application::ports::{FileIndexPort, FileMetadata, StorageError};
use crate::domain::FileIdentifier;

/// 内存文件元数据索引
pub struct InMemoryFileIndex {
    entries: DashMap<String, FileMetadata>,
}

impl InMemoryFileIndex {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    pub fn upsert(&self, identifier: &FileIdentifier, metadata: FileMetadata) {
        self.entries.insert(identifier.to_string(), metadata);
    }

    pub fn remove(&self, identifier: &FileIdentifier) -> Option<FileMetadata> {
        self.entries
            .remove(identifier.as_str())
            .map(|(_, metadata)| metadata)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for InMemoryFileIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FileIndexPort for InMemoryFileIndex {
    async fn find_metadata(
        &self,
        identifier: &FileIdentifier,
    ) -> Result<Option<FileMetadata>, StorageError> {
        Ok(self
            .entries
            .get(identifier.as_str())
            .map(|entry| entry.value().clone()))
    }
}
