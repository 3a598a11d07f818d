//! SQLite File Index

use async_trait::async_trait;
use sqlx::FromRow;

use super::DbPool;
use crate::application::ports::{FileIndexPort, FileMetadata, StorageError};
use crate::domain::FileIdentifier;

/// SQLite 文件元数据索引（`sys_file_metadata` 表）
pub struct SqliteFileIndex {
    pool: DbPool,
}

impl SqliteFileIndex {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// 写入或更新元数据
    pub async fn upsert(
        &self,
        identifier: &FileIdentifier,
        metadata: &FileMetadata,
    ) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            INSERT INTO sys_file_metadata (identifier, mime_type, visible, fe_groups)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(identifier) DO UPDATE SET
                mime_type = excluded.mime_type,
                visible = excluded.visible,
                fe_groups = excluded.fe_groups
            "#,
        )
        .bind(identifier.as_str())
        .bind(&metadata.mime_type)
        .bind(metadata.visible.map(i64::from))
        .bind(&metadata.fe_groups)
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::IndexError(e.to_string()))?;

        Ok(())
    }

    /// 删除元数据，返回是否存在
    pub async fn remove(&self, identifier: &FileIdentifier) -> Result<bool, StorageError> {
        let result = sqlx::query("DELETE FROM sys_file_metadata WHERE identifier = ?")
            .bind(identifier.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::IndexError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}

#[derive(FromRow)]
struct MetadataRow {
    mime_type: Option<String>,
    visible: Option<i64>,
    fe_groups: Option<String>,
}

impl From<MetadataRow> for FileMetadata {
    fn from(row: MetadataRow) -> Self {
        FileMetadata {
            mime_type: row.mime_type,
            visible: row.visible.map(|v| v != 0),
            fe_groups: row.fe_groups,
        }
    }
}

#[async_trait]
impl FileIndexPort for SqliteFileIndex {
    async fn find_metadata(
        &self,
        identifier: &FileIdentifier,
    ) -> Result<Option<FileMetadata>, StorageError> {
        let row: Option<MetadataRow> = sqlx::query_as(
            "SELECT mime_type, visible, fe_groups FROM sys_file_metadata WHERE identifier = ?",
        )
        .bind(identifier.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::IndexError(e.to_string()))?;

        Ok(row.map(FileMetadata::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::sqlite::{create_pool, run_migrations, DatabaseConfig};

    async fn index() -> SqliteFileIndex {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();
        SqliteFileIndex::new(pool)
    }

    #[tokio::test]
    async fn test_missing_row() {
        let index = index().await;
        let id = FileIdentifier::new("/a.pdf").unwrap();
        assert_eq!(index.find_metadata(&id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_upsert_and_find() {
        let index = index().await;
        let id = FileIdentifier::new("/members/a.pdf").unwrap();

        index
            .upsert(&id, &FileMetadata::new().with_visible(false))
            .await
            .unwrap();
        assert_eq!(
            index.find_metadata(&id).await.unwrap(),
            Some(FileMetadata::new().with_visible(false))
        );

        let updated = FileMetadata::new()
            .with_mime_type("application/pdf")
            .with_visible(true)
            .with_fe_groups("3,7");
        index.upsert(&id, &updated).await.unwrap();
        assert_eq!(index.find_metadata(&id).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn test_absent_properties_stay_absent() {
        let index = index().await;
        let id = FileIdentifier::new("/a.pdf").unwrap();

        index.upsert(&id, &FileMetadata::new()).await.unwrap();
        let metadata = index.find_metadata(&id).await.unwrap().unwrap();
        assert_eq!(metadata.visible, None);
        assert_eq!(metadata.fe_groups, None);
    }

    #[tokio::test]
    async fn test_remove() {
        let index = index().await;
        let id = FileIdentifier::new("/a.pdf").unwrap();

        index.upsert(&id, &FileMetadata::new()).await.unwrap();
        assert!(index.remove(&id).await.unwrap());
        assert!(!index.remove(&id).await.unwrap());
    }
}
