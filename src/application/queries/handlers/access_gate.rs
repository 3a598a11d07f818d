//! Access Gate - 受保护文件访问网关
//!
//! 判定顺序:
//! 1. 路径不在受保护前缀下 → PassThrough（不调用任何协作方）
//! 2. 没有默认存储 → ServiceUnavailable（记录一条 error 日志）
//! 3. 标识非法或文件不存在 → NotFound
//! 4. 无权访问 → NotFound（不返回 403，避免泄露文件是否存在）
//! 5. 否则 → Serve

use std::sync::Arc;

use crate::application::error::GateError;
use crate::application::ports::{FileStoragePort, IdentityResolverPort, StorageRegistryPort};
use crate::application::queries::file_queries::{AccessFileQuery, GateDecision, ServedFile};
use crate::domain::{FileIdentifier, FileRecord, Identity, ProtectedPrefix, Visibility};

/// 访问网关
pub struct AccessGate {
    prefix: ProtectedPrefix,
    registry: Arc<dyn StorageRegistryPort>,
    identity_resolver: Arc<dyn IdentityResolverPort>,
}

impl AccessGate {
    pub fn new(
        prefix: ProtectedPrefix,
        registry: Arc<dyn StorageRegistryPort>,
        identity_resolver: Arc<dyn IdentityResolverPort>,
    ) -> Self {
        Self {
            prefix,
            registry,
            identity_resolver,
        }
    }

    pub fn prefix(&self) -> &ProtectedPrefix {
        &self.prefix
    }

    pub async fn handle(&self, query: AccessFileQuery) -> GateDecision {
        let Some(rest) = self.prefix.strip(&query.path) else {
            return GateDecision::PassThrough;
        };

        match self.resolve(rest, query.session_token.as_deref()).await {
            Ok(file) => GateDecision::Serve(file),
            Err(err) => {
                if err.is_configuration_error() {
                    tracing::error!(path = %query.path, error = %err, "Refusing protected file request");
                }
                err.into()
            }
        }
    }

    async fn resolve(
        &self,
        rest: &str,
        session_token: Option<&str>,
    ) -> Result<ServedFile, GateError> {
        // 未配置时阻断一切，而不是让管理员误以为配置正确
        let storage = self
            .registry
            .default_storage()
            .ok_or(GateError::NoDefaultStorage)?;

        let identifier = FileIdentifier::from_request_path(rest)?;
        if !storage.has_file(&identifier).await? {
            return Err(GateError::FileNotFound(identifier.to_string()));
        }

        let record = storage.get_file(&identifier).await?;

        // 只有受限文件才需要查询会话
        let identity = match record.visibility() {
            Visibility::Restricted(_) => self.resolve_identity(session_token).await,
            _ => Identity::empty(),
        };

        if !Self::is_accessible(storage.as_ref(), &record, &identity) {
            return Err(GateError::AccessDenied(identifier.to_string()));
        }

        let body = storage.open_local(&record).await?;

        Ok(ServedFile {
            mime_type: record.mime_type().to_string(),
            size: record.size(),
            body,
        })
    }

    async fn resolve_identity(&self, session_token: Option<&str>) -> Identity {
        self.identity_resolver
            .resolve(session_token)
            .await
            .unwrap_or_else(|err| {
                tracing::warn!(error = %err, "Identity lookup failed, treating requester as anonymous");
                Identity::empty()
            })
    }

    /// 当前身份能否访问给定文件
    pub fn is_accessible(
        storage: &dyn FileStoragePort,
        record: &FileRecord,
        identity: &Identity,
    ) -> bool {
        // Web 服务器正确配置时处理目录不会走到这里
        if storage.is_within_processing_folder(record.identifier()) {
            return true;
        }

        record.visibility().permits(identity)
    }
}
