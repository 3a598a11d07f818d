//! File Context - 文件记录

use super::FileIdentifier;
use crate::domain::access::{AccessGroups, Identity};

/// 受管文件记录
///
/// 由存储协作方按请求构建，网关只读使用。
/// `visible` 缺省为 `true`，`fe_groups` 缺省为空集合。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    identifier: FileIdentifier,
    mime_type: String,
    size: u64,
    visible: bool,
    fe_groups: AccessGroups,
}

impl FileRecord {
    pub fn new(identifier: FileIdentifier, mime_type: impl Into<String>, size: u64) -> Self {
        Self {
            identifier,
            mime_type: mime_type.into(),
            size,
            visible: true,
            fe_groups: AccessGroups::new(),
        }
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn with_access_groups(mut self, fe_groups: AccessGroups) -> Self {
        self.fe_groups = fe_groups;
        self
    }

    pub fn identifier(&self) -> &FileIdentifier {
        &self.identifier
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn access_groups(&self) -> &AccessGroups {
        &self.fe_groups
    }

    pub fn visibility(&self) -> Visibility<'_> {
        if !self.visible {
            Visibility::Hidden
        } else if self.fe_groups.is_empty() {
            Visibility::Public
        } else {
            Visibility::Restricted(&self.fe_groups)
        }
    }
}

/// 文件的可见性分类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility<'a> {
    /// `visible = false`
    Hidden,
    /// 可见且未限制用户组
    Public,
    /// 可见，仅限给定用户组
    Restricted(&'a AccessGroups),
}

impl Visibility<'_> {
    pub fn permits(&self, identity: &Identity) -> bool {
        match self {
            Visibility::Hidden => false,
            Visibility::Public => true,
            Visibility::Restricted(groups) => groups.intersects(identity.group_ids()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::access::GroupId;

    fn record() -> FileRecord {
        FileRecord::new(
            FileIdentifier::new("/docs/report.pdf").unwrap(),
            "application/pdf",
            1024,
        )
    }

    #[test]
    fn test_defaults_are_public() {
        let record = record();
        assert!(record.is_visible());
        assert!(record.access_groups().is_empty());
        assert_eq!(record.visibility(), Visibility::Public);
        assert!(record.visibility().permits(&Identity::empty()));
    }

    #[test]
    fn test_hidden_denies_everyone() {
        let record = record()
            .with_visible(false)
            .with_access_groups("3".parse().unwrap());
        assert_eq!(record.visibility(), Visibility::Hidden);
        assert!(!record
            .visibility()
            .permits(&Identity::from_groups([GroupId::new(3)])));
    }

    #[test]
    fn test_restricted_requires_intersection() {
        let record = record().with_access_groups("3,7".parse().unwrap());
        let visibility = record.visibility();

        assert!(visibility.permits(&Identity::from_groups([GroupId::new(7)])));
        assert!(visibility.permits(&Identity::from_groups([GroupId::new(3), GroupId::new(7)])));
        assert!(!visibility.permits(&Identity::from_groups([GroupId::new(9)])));
        assert!(!visibility.permits(&Identity::empty()));
    }

    #[test]
    fn test_any_login_pseudo_group() {
        let record = record().with_access_groups("-2".parse().unwrap());
        assert!(record
            .visibility()
            .permits(&Identity::authenticated([GroupId::new(5)])));
        assert!(!record.visibility().permits(&Identity::anonymous()));
    }
}
