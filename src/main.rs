//! filegate - 受保护上传目录访问网关
//!
//! 启动顺序: 配置 → 日志 → 数据库 → 存储/身份适配器 → 网关 → HTTP 服务器

use std::sync::Arc;

use filegate::application::AccessGate;
use filegate::config::{load_config, print_config};
use filegate::domain::ProtectedPrefix;
use filegate::infrastructure::adapters::StorageRegistry;
use filegate::infrastructure::http::{AppState, HttpServer, ServerConfig};
use filegate::infrastructure::persistence::sqlite::{
    create_pool, run_migrations, DatabaseConfig, SqliteFileIndex, SqliteIdentityResolver,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},filegate={},tower_http=debug",
        config.log.level, config.log.level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    tracing::info!("filegate - protected uploads gate");
    print_config(&config);

    // 确保数据目录存在
    if let Some(parent) = std::path::Path::new(&config.database.path).parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    // 初始化数据库
    let db_config = DatabaseConfig {
        database_url: config.database.database_url(),
        max_connections: config.database.max_connections,
    };
    let pool = create_pool(&db_config).await?;
    run_migrations(&pool).await?;

    // 默认存储：未配置或根目录不可用时不注册，受保护请求一律 503
    let file_index = Arc::new(SqliteFileIndex::new(pool.clone()));
    let registry = StorageRegistry::from_local_config(
        config.storage.as_ref().map(|s| s.to_local()),
        file_index,
    )
    .await;

    let identity_resolver = Arc::new(SqliteIdentityResolver::new(pool.clone()));

    // 已在加载配置时验证
    let prefix = ProtectedPrefix::new(&config.gate.protected_prefix)?;
    let gate = AccessGate::new(prefix, Arc::new(registry), identity_resolver);

    let server_config = ServerConfig::new(&config.server.host, config.server.port)
        .with_public_dir(&config.server.public_dir);
    let state = AppState::new(gate, &config.gate.session_cookie);
    let server = HttpServer::new(server_config, state);

    tracing::info!("Starting HTTP server...");

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
