//! Identity Resolver Port - 请求者身份解析
//!
//! 认证子系统的抽象：根据会话令牌得出当前访客的用户组

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::Identity;

/// 身份解析错误
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("Session lookup failed: {0}")]
    SessionLookup(String),

    #[error("Invalid group data: {0}")]
    InvalidGroupData(String),
}

#[async_trait]
pub trait IdentityResolverPort: Send + Sync {
    /// 解析身份；没有会话令牌或会话未知时返回匿名身份
    async fn resolve(&self, session_token: Option<&str>) -> Result<Identity, IdentityError>;
}
