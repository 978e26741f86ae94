//! 用户偏好模型

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// 用户偏好
///
/// 偏好请求失败时使用 [`UserPreferences::default`]：收藏列表为空，
/// `username` 缺省，不回填为已解析的身份。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// 收藏菜品名称，线上格式为有序数组
    #[serde(default)]
    pub favorite_meals: Vec<String>,
}

impl UserPreferences {
    /// 收藏集合，用于成员判断
    pub fn favorite_set(&self) -> HashSet<&str> {
        self.favorite_meals.iter().map(String::as_str).collect()
    }
}
