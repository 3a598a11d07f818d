//! SQLite Database - 数据库连接和迁移

use sqlx::{sqlite::SqlitePoolOptions, Pool, Sqlite};
use std::path::Path;

/// 数据库配置
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// 数据库文件路径
    pub database_url: String,
    /// 最大连接数
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite:./data/filegate.db?mode=rwc".to_string(),
            max_connections: 5,
        }
    }
}

impl DatabaseConfig {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            database_url: format!("sqlite:{}?mode=rwc", path.as_ref().display()),
            max_connections: 5,
        }
    }

    pub fn in_memory() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
        }
    }
}

/// 数据库连接池
pub type DbPool = Pool<Sqlite>;

/// 创建数据库连接池
pub async fn create_pool(config: &DatabaseConfig) -> Result<DbPool, sqlx::Error> {
    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;

    // 启用 WAL 模式，元数据维护与网关读取互不阻塞
    sqlx::query("PRAGMA journal_mode=WAL")
        .execute(&pool)
        .await?;

    // 设置 busy_timeout=5000ms，遇到锁时等待而不是立即失败
    sqlx::query("PRAGMA busy_timeout=5000")
        .execute(&pool)
        .await?;

    tracing::info!("SQLite pool created with WAL mode and busy_timeout=5000ms");

    Ok(pool)
}

/// 运行数据库迁移
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::Error> {
    // 文件元数据：visible / fe_groups 为 NULL 表示属性缺失
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sys_file_metadata (
            identifier TEXT PRIMARY KEY,
            mime_type TEXT,
            visible INTEGER,
            fe_groups TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    // 前台用户组，subgroup 为逗号分隔的子组列表
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS fe_groups (
            uid INTEGER PRIMARY KEY,
            title TEXT NOT NULL DEFAULT '',
            subgroup TEXT NOT NULL DEFAULT '',
            hidden INTEGER NOT NULL DEFAULT 0,
            deleted INTEGER NOT NULL DEFAULT 0
        )
        "#,
    )
    .execute(pool)
    .await?;

    // 前台用户，usergroup 为逗号分隔的组列表
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS fe_users (
            uid INTEGER PRIMARY KEY,
            username TEXT NOT NULL,
            usergroup TEXT NOT NULL DEFAULT '',
            disable INTEGER NOT NULL DEFAULT 0,
            deleted INTEGER NOT NULL DEFAULT 0
        )
        "#,
    )
    .execute(pool)
    .await?;

    // 前台会话
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS fe_sessions (
            ses_id TEXT PRIMARY KEY,
            ses_userid INTEGER NOT NULL,
            FOREIGN KEY (ses_userid) REFERENCES fe_users(uid) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_fe_sessions_userid
        ON fe_sessions(ses_userid)
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Database migrations completed");
    Ok(())
}
