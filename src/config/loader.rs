//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;
use crate::domain::ProtectedPrefix;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `FILEGATE_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `FILEGATE_SERVER__PORT=8080`
/// - `FILEGATE_GATE__PROTECTED_PREFIX=uploads/`
/// - `FILEGATE_STORAGE__BASE_DIR=/var/www/fileadmin`
/// - `FILEGATE_DATABASE__PATH=/data/filegate.db`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）；storage 段没有默认值
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8080)?
        .set_default("server.public_dir", "public")?
        .set_default("gate.protected_prefix", "fileadmin/")?
        .set_default("gate.session_cookie", "fe_typo_user")?
        .set_default("database.path", "data/filegate.db")?
        .set_default("database.max_connections", 5)?
        .set_default("log.level", "info")?;

    // 2. 配置文件
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级），例如 FILEGATE_GATE__PROTECTED_PREFIX=uploads/
    builder = builder.add_source(
        Environment::with_prefix("FILEGATE")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    ProtectedPrefix::new(&config.gate.protected_prefix)
        .map_err(|e| ConfigError::ValidationError(e.to_string()))?;

    if config.gate.session_cookie.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "Session cookie name cannot be empty".to_string(),
        ));
    }

    if config.database.path.is_empty() {
        return Err(ConfigError::ValidationError(
            "Database path cannot be empty".to_string(),
        ));
    }

    if let Some(storage) = &config.storage {
        if storage.base_dir.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "Storage base_dir cannot be empty".to_string(),
            ));
        }

        let folder = storage.processing_folder.as_str();
        if folder.is_empty() || folder.contains('/') || folder == "." || folder == ".." {
            return Err(ConfigError::ValidationError(format!(
                "Processing folder must be a single directory name: {:?}",
                folder
            )));
        }
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}", config.server.addr());
    tracing::info!("Public Directory: {:?}", config.server.public_dir);
    tracing::info!("Protected Prefix: {}", config.gate.protected_prefix);
    tracing::info!("Session Cookie: {}", config.gate.session_cookie);
    match &config.storage {
        Some(storage) => {
            tracing::info!("Default Storage: {} ({:?})", storage.name, storage.base_dir);
            tracing::info!("Processing Folder: {}", storage.processing_folder);
        }
        None => tracing::info!("Default Storage: <not configured>"),
    }
    tracing::info!("Database: {}", config.database.path);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
