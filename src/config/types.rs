//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

use crate::infrastructure::adapters::{LocalStorageConfig, DEFAULT_PROCESSING_FOLDER};
use crate::infrastructure::http::DEFAULT_SESSION_COOKIE;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 网关配置
    #[serde(default)]
    pub gate: GateConfig,

    /// 默认存储配置；缺失时所有受保护请求返回 503
    #[serde(default)]
    pub storage: Option<StorageConfig>,

    /// 数据库配置
    #[serde(default)]
    pub database: DatabaseConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 非受保护路径的静态文件目录
    #[serde(default = "default_public_dir")]
    pub public_dir: PathBuf,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_public_dir() -> PathBuf {
    PathBuf::from("public")
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            public_dir: default_public_dir(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 网关配置
#[derive(Debug, Clone, Deserialize)]
pub struct GateConfig {
    /// 受保护前缀，例如 "fileadmin/"
    #[serde(default = "default_protected_prefix")]
    pub protected_prefix: String,

    /// 前台会话 Cookie 名
    #[serde(default = "default_session_cookie")]
    pub session_cookie: String,
}

fn default_protected_prefix() -> String {
    "fileadmin/".to_string()
}

fn default_session_cookie() -> String {
    DEFAULT_SESSION_COOKIE.to_string()
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            protected_prefix: default_protected_prefix(),
            session_cookie: default_session_cookie(),
        }
    }
}

/// 默认存储配置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// 存储名称（用于日志）
    #[serde(default = "default_storage_name")]
    pub name: String,

    /// 存储根目录
    pub base_dir: PathBuf,

    /// 处理目录（缩略图等衍生文件）
    #[serde(default = "default_processing_folder")]
    pub processing_folder: String,
}

fn default_storage_name() -> String {
    "fileadmin".to_string()
}

fn default_processing_folder() -> String {
    DEFAULT_PROCESSING_FOLDER.to_string()
}

impl StorageConfig {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            name: default_storage_name(),
            base_dir: base_dir.into(),
            processing_folder: default_processing_folder(),
        }
    }

    /// 转换为本地存储适配器配置
    pub fn to_local(&self) -> LocalStorageConfig {
        LocalStorageConfig {
            name: self.name.clone(),
            base_dir: self.base_dir.clone(),
            processing_folder: self.processing_folder.clone(),
        }
    }
}

/// 数据库配置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// 数据库文件路径
    #[serde(default = "default_db_path")]
    pub path: String,

    /// 最大连接数
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_db_path() -> String {
    "data/filegate.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: default_max_connections(),
        }
    }
}

impl DatabaseConfig {
    /// 获取数据库 URL
    pub fn database_url(&self) -> String {
        format!("sqlite:{}?mode=rwc", self.path)
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.gate.protected_prefix, "fileadmin/");
        assert_eq!(config.gate.session_cookie, "fe_typo_user");
        assert!(config.storage.is_none());
        assert_eq!(config.database.path, "data/filegate.db");
    }

    #[test]
    fn test_server_addr() {
        let config = ServerConfig::default();
        assert_eq!(config.addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_database_url() {
        let config = DatabaseConfig::default();
        assert_eq!(config.database_url(), "sqlite:data/filegate.db?mode=rwc");
    }

    #[test]
    fn test_storage_to_local() {
        let local = StorageConfig::new("/srv/fileadmin").to_local();
        assert_eq!(local.name, "fileadmin");
        assert_eq!(local.base_dir, PathBuf::from("/srv/fileadmin"));
        assert_eq!(local.processing_folder, "_processed_");
    }
}
