//! In-Memory Identity Resolver Implementation

use async_trait::async_trait;
use dashmap::DashMap;

use crate::application::ports::{IdentityError, IdentityResolverPort};
use crate::domain::{GroupId, Identity};

/// 内存会话表：会话令牌 → 身份
pub struct InMemoryIdentityResolver {
    sessions: DashMap<String, Identity>,
}

impl InMemoryIdentityResolver {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    /// 登记一个已登录会话
    pub fn login(&self, token: impl Into<String>, groups: impl IntoIterator<Item = GroupId>) {
        let token = token.into();
        tracing::debug!(session = %token, "Session registered");
        self.sessions.insert(token, Identity::authenticated(groups));
    }

    pub fn logout(&self, token: &str) -> bool {
        self.sessions.remove(token).is_some()
    }
}

impl Default for InMemoryIdentityResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityResolverPort for InMemoryIdentityResolver {
    async fn resolve(&self, session_token: Option<&str>) -> Result<Identity, IdentityError> {
        Ok(session_token
            .and_then(|token| self.sessions.get(token).map(|entry| entry.value().clone()))
            .unwrap_or_else(Identity::anonymous))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_resolve() {
        let resolver = InMemoryIdentityResolver::new();
        resolver.login("abc", [GroupId::new(3)]);

        let identity = resolver.resolve(Some("abc")).await.unwrap();
        assert!(identity.group_ids().contains(&GroupId::new(3)));

        assert_eq!(resolver.resolve(None).await.unwrap(), Identity::anonymous());
        assert_eq!(
            resolver.resolve(Some("unknown")).await.unwrap(),
            Identity::anonymous()
        );

        assert!(resolver.logout("abc"));
        assert_eq!(resolver.resolve(Some("abc")).await.unwrap(), Identity::anonymous());
    }
}
