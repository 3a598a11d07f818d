//! Application State
//!
//! 网关与请求层需要的共享状态，启动后只读

use crate::application::AccessGate;

/// 默认前台会话 Cookie 名
pub const DEFAULT_SESSION_COOKIE: &str = "fe_typo_user";

/// 应用状态
pub struct AppState {
    pub gate: AccessGate,
    /// 携带前台会话令牌的 Cookie 名
    pub session_cookie: String,
}

impl AppState {
    /// 创建应用状态
    pub fn new(gate: AccessGate, session_cookie: impl Into<String>) -> Self {
        Self {
            gate,
            session_cookie: session_cookie.into(),
        }
    }

    pub fn with_default_cookie(gate: AccessGate) -> Self {
        Self::new(gate, DEFAULT_SESSION_COOKIE)
    }
}
