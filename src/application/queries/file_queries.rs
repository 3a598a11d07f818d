//! File Queries - 受保护文件访问查询

use crate::application::error::GateError;
use crate::application::ports::ByteSource;

/// 访问受保护文件的查询
#[derive(Debug, Clone)]
pub struct AccessFileQuery {
    /// 请求路径（不含查询串）
    pub path: String,
    /// 前台会话令牌
    pub session_token: Option<String>,
}

impl AccessFileQuery {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            session_token: None,
        }
    }

    pub fn with_session_token(mut self, token: impl Into<String>) -> Self {
        self.session_token = Some(token.into());
        self
    }
}

/// 可输出的文件
pub struct ServedFile {
    pub mime_type: String,
    pub size: u64,
    pub body: ByteSource,
}

impl std::fmt::Debug for ServedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServedFile")
            .field("mime_type", &self.mime_type)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

/// 网关判定结果，不做持久化
#[derive(Debug)]
pub enum GateDecision {
    /// 输出文件内容（200）
    Serve(ServedFile),
    /// 文件不存在或无权访问（404）
    NotFound,
    /// 配置错误，失败关闭（503）
    ServiceUnavailable,
    /// 不在受保护前缀下，交给下一个处理器
    PassThrough,
}

impl From<GateError> for GateDecision {
    fn from(err: GateError) -> Self {
        if err.is_configuration_error() {
            GateDecision::ServiceUnavailable
        } else {
            GateDecision::NotFound
        }
    }
}
