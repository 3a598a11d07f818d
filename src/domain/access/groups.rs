//! Access Context - 用户组

use std::collections::BTreeSet;
use std::str::FromStr;

use thiserror::Error;

/// 前台用户组标识
///
/// 负数为伪组，由身份解析方附加到请求者身上。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupId(i32);

impl GroupId {
    /// 所有访客
    pub const EVERYONE: GroupId = GroupId(0);
    /// 仅未登录访客（"hide at login"）
    pub const HIDE_AT_LOGIN: GroupId = GroupId(-1);
    /// 任意已登录用户（"show at any login"）
    pub const ANY_LOGIN: GroupId = GroupId(-2);

    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

impl From<i32> for GroupId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for GroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("无效的用户组标识 {token:?}（组列表: {list:?}）")]
pub struct GroupListError {
    pub token: String,
    pub list: String,
}

/// 文件允许访问的用户组集合（`fe_groups`）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessGroups(BTreeSet<GroupId>);

impl AccessGroups {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, id: GroupId) -> bool {
        self.0.contains(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = GroupId> + '_ {
        self.0.iter().copied()
    }

    /// 与另一组集合是否存在交集
    pub fn intersects<'a>(&self, others: impl IntoIterator<Item = &'a GroupId>) -> bool {
        others.into_iter().any(|id| self.0.contains(id))
    }
}

impl FromIterator<GroupId> for AccessGroups {
    fn from_iter<T: IntoIterator<Item = GroupId>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// 逗号分隔的组列表，空项与首尾空白被忽略，非数字项报错
impl FromStr for AccessGroups {
    type Err = GroupListError;

    fn from_str(list: &str) -> Result<Self, Self::Err> {
        list.split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(|token| {
                token.parse::<i32>().map(GroupId).map_err(|_| GroupListError {
                    token: token.to_string(),
                    list: list.to_string(),
                })
            })
            .collect()
    }
}

impl std::fmt::Display for AccessGroups {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for id in &self.0 {
            if !first {
                f.write_str(",")?;
            }
            write!(f, "{}", id)?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_group_list() {
        let groups: AccessGroups = "3,7".parse().unwrap();
        assert_eq!(groups.len(), 2);
        assert!(groups.contains(GroupId::new(3)));
        assert!(groups.contains(GroupId::new(7)));
    }

    #[test]
    fn test_parse_skips_empty_tokens_and_whitespace() {
        let groups: AccessGroups = " 3, ,7,, -2 ".parse().unwrap();
        assert_eq!(groups.to_string(), "-2,3,7");

        let empty: AccessGroups = "".parse().unwrap();
        assert!(empty.is_empty());
        let commas: AccessGroups = ",,".parse().unwrap();
        assert!(commas.is_empty());
    }

    #[test]
    fn test_parse_rejects_non_numeric_token() {
        let err = "3,editors,7".parse::<AccessGroups>().unwrap_err();
        assert_eq!(err.token, "editors");
        assert!("3.5".parse::<AccessGroups>().is_err());
    }

    #[test]
    fn test_intersects() {
        let groups: AccessGroups = "3,7".parse().unwrap();
        assert!(groups.intersects(&[GroupId::new(7)]));
        assert!(!groups.intersects(&[GroupId::new(9)]));
        let none: [GroupId; 0] = [];
        assert!(!groups.intersects(&none));
    }
}
