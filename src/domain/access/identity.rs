//! Access Context - 请求者身份

use std::collections::BTreeSet;

use super::GroupId;

/// 请求者身份：当前请求关联的用户组集合
///
/// 每个请求临时构建，只读。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    group_ids: BTreeSet<GroupId>,
}

impl Identity {
    /// 不属于任何组（身份解析失败时使用）
    pub fn empty() -> Self {
        Self::default()
    }

    /// 未登录访客
    pub fn anonymous() -> Self {
        Self::from_groups([GroupId::EVERYONE, GroupId::HIDE_AT_LOGIN])
    }

    /// 已登录的前台用户，自动附加伪组
    pub fn authenticated(groups: impl IntoIterator<Item = GroupId>) -> Self {
        let mut identity = Self::from_groups([GroupId::EVERYONE, GroupId::ANY_LOGIN]);
        identity.group_ids.extend(groups);
        identity
    }

    /// 原样使用给定的组集合
    pub fn from_groups(groups: impl IntoIterator<Item = GroupId>) -> Self {
        Self {
            group_ids: groups.into_iter().collect(),
        }
    }

    pub fn group_ids(&self) -> &BTreeSet<GroupId> {
        &self.group_ids
    }

    pub fn is_empty(&self) -> bool {
        self.group_ids.is_empty()
    }
}
