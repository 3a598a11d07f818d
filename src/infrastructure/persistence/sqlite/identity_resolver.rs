//! SQLite Identity Resolver
//!
//! 根据前台会话查出用户及其用户组，子组按传递闭包展开

use async_trait::async_trait;
use std::collections::{BTreeSet, VecDeque};

use super::DbPool;
use crate::application::ports::{IdentityError, IdentityResolverPort};
use crate::domain::{AccessGroups, GroupId, Identity};

/// SQLite 前台会话身份解析器
pub struct SqliteIdentityResolver {
    pool: DbPool,
}

impl SqliteIdentityResolver {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// 会话对应的有效用户的组列表
    async fn find_user_groups(&self, session_token: &str) -> Result<Option<String>, IdentityError> {
        sqlx::query_scalar(
            r#"
            SELECT u.usergroup
            FROM fe_sessions s
            JOIN fe_users u ON u.uid = s.ses_userid
            WHERE s.ses_id = ? AND u.disable = 0 AND u.deleted = 0
            "#,
        )
        .bind(session_token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| IdentityError::SessionLookup(e.to_string()))
    }

    /// 启用的组返回其子组列表，隐藏、删除或不存在的组返回 None
    async fn find_subgroups(&self, group: GroupId) -> Result<Option<String>, IdentityError> {
        sqlx::query_scalar(
            "SELECT subgroup FROM fe_groups WHERE uid = ? AND hidden = 0 AND deleted = 0",
        )
        .bind(group.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| IdentityError::SessionLookup(e.to_string()))
    }

    async fn expand_groups(&self, direct: AccessGroups) -> Result<BTreeSet<GroupId>, IdentityError> {
        let mut resolved = BTreeSet::new();
        let mut visited = BTreeSet::new();
        let mut queue: VecDeque<GroupId> = direct.iter().collect();

        while let Some(group) = queue.pop_front() {
            if !visited.insert(group) {
                continue;
            }

            let Some(subgroups) = self.find_subgroups(group).await? else {
                continue;
            };
            resolved.insert(group);

            let subgroups = parse_group_list(&subgroups)?;
            queue.extend(subgroups.iter().filter(|id| !visited.contains(id)));
        }

        Ok(resolved)
    }
}

fn parse_group_list(list: &str) -> Result<AccessGroups, IdentityError> {
    list.parse::<AccessGroups>()
        .map_err(|e| IdentityError::InvalidGroupData(e.to_string()))
}

#[async_trait]
impl IdentityResolverPort for SqliteIdentityResolver {
    async fn resolve(&self, session_token: Option<&str>) -> Result<Identity, IdentityError> {
        let Some(token) = session_token.filter(|t| !t.is_empty()) else {
            return Ok(Identity::anonymous());
        };

        let Some(usergroup) = self.find_user_groups(token).await? else {
            return Ok(Identity::anonymous());
        };

        let groups = self.expand_groups(parse_group_list(&usergroup)?).await?;

        Ok(Identity::authenticated(groups))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::sqlite::{create_pool, run_migrations, DatabaseConfig};

    async fn seeded_pool() -> DbPool {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();

        for sql in [
            "INSERT INTO fe_groups (uid, title, subgroup) VALUES (1, 'members', '2')",
            "INSERT INTO fe_groups (uid, title, subgroup) VALUES (2, 'readers', '1,3')",
            "INSERT INTO fe_groups (uid, title, subgroup, hidden) VALUES (3, 'archived', '4', 1)",
            "INSERT INTO fe_groups (uid, title) VALUES (4, 'staff')",
            "INSERT INTO fe_groups (uid, title) VALUES (7, 'editors')",
            "INSERT INTO fe_users (uid, username, usergroup) VALUES (10, 'alice', '1')",
            "INSERT INTO fe_users (uid, username, usergroup) VALUES (11, 'bob', '7,99')",
            "INSERT INTO fe_users (uid, username, usergroup, disable) VALUES (12, 'carol', '7', 1)",
            "INSERT INTO fe_users (uid, username, usergroup) VALUES (13, 'dave', 'x')",
            "INSERT INTO fe_sessions (ses_id, ses_userid) VALUES ('alice-session', 10)",
            "INSERT INTO fe_sessions (ses_id, ses_userid) VALUES ('bob-session', 11)",
            "INSERT INTO fe_sessions (ses_id, ses_userid) VALUES ('carol-session', 12)",
            "INSERT INTO fe_sessions (ses_id, ses_userid) VALUES ('dave-session', 13)",
        ] {
            sqlx::query(sql).execute(&pool).await.unwrap();
        }

        pool
    }

    fn ids(identity: &Identity) -> Vec<i32> {
        identity.group_ids().iter().map(GroupId::value).collect()
    }

    #[tokio::test]
    async fn test_anonymous_without_valid_session() {
        let resolver = SqliteIdentityResolver::new(seeded_pool().await);

        assert_eq!(resolver.resolve(None).await.unwrap(), Identity::anonymous());
        assert_eq!(resolver.resolve(Some("")).await.unwrap(), Identity::anonymous());
        assert_eq!(
            resolver.resolve(Some("unknown")).await.unwrap(),
            Identity::anonymous()
        );
        // 被禁用的用户
        assert_eq!(
            resolver.resolve(Some("carol-session")).await.unwrap(),
            Identity::anonymous()
        );
    }

    #[tokio::test]
    async fn test_subgroups_are_expanded_without_looping() {
        let resolver = SqliteIdentityResolver::new(seeded_pool().await);

        let identity = resolver.resolve(Some("alice-session")).await.unwrap();
        // 3 被隐藏，因此 3 及其子组 4 都不计入
        assert_eq!(ids(&identity), vec![-2, 0, 1, 2]);
    }

    #[tokio::test]
    async fn test_unknown_groups_are_dropped() {
        let resolver = SqliteIdentityResolver::new(seeded_pool().await);

        let identity = resolver.resolve(Some("bob-session")).await.unwrap();
        assert_eq!(ids(&identity), vec![-2, 0, 7]);
    }

    #[tokio::test]
    async fn test_corrupt_group_list_is_an_error() {
        let resolver = SqliteIdentityResolver::new(seeded_pool().await);

        let err = resolver.resolve(Some("dave-session")).await.unwrap_err();
        assert!(matches!(err, IdentityError::InvalidGroupData(_)));
    }
}
