//! Access Context - 访问控制上下文
//!
//! 职责:
//! - 前台用户组标识与组列表解析
//! - 请求者身份（组集合）

mod groups;
mod identity;

pub use groups::{AccessGroups, GroupId, GroupListError};
pub use identity::Identity;
