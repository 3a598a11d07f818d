//! File Context - Value Objects

use std::borrow::Cow;

use super::FileError;

/// 受保护前缀
///
/// 内部存储为去除首尾 `/` 的形式，例如 `"fileadmin"` 或 `"media/uploads"`。
///
/// 不变量:
/// - 非空
/// - 不包含空段、`.` 或 `..` 段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtectedPrefix(String);

impl ProtectedPrefix {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, FileError> {
        let raw = raw.as_ref();
        let trimmed = raw.trim().trim_matches('/');

        if trimmed.is_empty()
            || trimmed
                .split('/')
                .any(|segment| segment.is_empty() || segment == "." || segment == "..")
        {
            return Err(FileError::InvalidPrefix(raw.to_string()));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 锚定在路径分隔符上的前缀匹配
    ///
    /// `/fileadmin/a/b.pdf` 返回 `Some("/a/b.pdf")`；
    /// `/fileadmin`、`/fileadminX/a.pdf` 返回 `None`。
    pub fn strip<'a>(&self, path: &'a str) -> Option<&'a str> {
        let rest = path.strip_prefix('/')?.strip_prefix(self.0.as_str())?;
        rest.starts_with('/').then_some(rest)
    }
}

impl std::fmt::Display for ProtectedPrefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/", self.0)
    }
}

/// 存储内的文件标识（以 `/` 开头）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileIdentifier(String);

impl FileIdentifier {
    pub fn new(identifier: impl Into<String>) -> Result<Self, FileError> {
        let identifier = identifier.into();
        if !Self::is_well_formed(&identifier) {
            return Err(FileError::InvalidIdentifier(identifier));
        }
        Ok(Self(identifier))
    }

    /// 从请求路径中前缀之后的部分构建（先做百分号解码）
    pub fn from_request_path(rest: &str) -> Result<Self, FileError> {
        let decoded: Cow<'_, str> = urlencoding::decode(rest)
            .map_err(|_| FileError::InvalidIdentifier(rest.to_string()))?;
        Self::new(decoded.into_owned())
    }

    fn is_well_formed(identifier: &str) -> bool {
        let Some(relative) = identifier.strip_prefix('/') else {
            return false;
        };
        if identifier.contains('\0') || identifier.contains('\\') {
            return false;
        }
        relative
            .split('/')
            .all(|segment| !segment.is_empty() && segment != "." && segment != "..")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 去掉开头 `/` 的相对路径
    pub fn relative_path(&self) -> &str {
        &self.0[1..]
    }

    pub fn extension(&self) -> Option<&str> {
        let file_name = self.0.rsplit('/').next()?;
        let (stem, ext) = file_name.rsplit_once('.')?;
        (!stem.is_empty() && !ext.is_empty()).then_some(ext)
    }

    /// 是否位于给定的顶层目录（单段目录名）之内
    pub fn is_within_folder(&self, folder: &str) -> bool {
        self.relative_path()
            .strip_prefix(folder)
            .is_some_and(|rest| rest.starts_with('/'))
    }
}

impl std::fmt::Display for FileIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
