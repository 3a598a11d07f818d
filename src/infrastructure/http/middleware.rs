//! HTTP Middleware
//!
//! 受保护文件网关中间件：拦截受保护前缀下的请求，
//! 其余请求原样交给下一个处理器

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tokio_util::io::ReaderStream;

use super::state::AppState;
use crate::application::{AccessFileQuery, GateDecision, ServedFile};

/// 受保护文件网关中间件
///
/// 404 与 503 响应体为空；拒绝访问与文件不存在对调用方不可区分
pub async fn file_gate_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let mut query = AccessFileQuery::new(request.uri().path());
    if let Some(token) = session_token(request.headers(), &state.session_cookie) {
        query = query.with_session_token(token);
    }

    match state.gate.handle(query).await {
        GateDecision::PassThrough => next.run(request).await,
        GateDecision::Serve(file) => serve_file(file),
        GateDecision::NotFound => StatusCode::NOT_FOUND.into_response(),
        GateDecision::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE.into_response(),
    }
}

/// 流式返回文件内容
fn serve_file(file: ServedFile) -> Response {
    let body = Body::from_stream(ReaderStream::new(file.body));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, file.mime_type)
        .header(header::CONTENT_LENGTH, file.size)
        .body(body)
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Invalid response headers for protected file");
            StatusCode::NOT_FOUND.into_response()
        })
}

/// 从 Cookie 头中取出会话令牌
fn session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == cookie_name)
        .map(|(_, value)| value.trim_matches('"').to_string())
        .filter(|value| !value.is_empty())
}
