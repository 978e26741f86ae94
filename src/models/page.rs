//! 页面数据模型

use serde::{Deserialize, Serialize};

use crate::models::meal::Meal;
use crate::models::recommendation::Recommendation;

/// 一次页面加载的聚合结果，交给展示层
///
/// 推荐缺失时序列化为 `null`。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PageData {
    pub meals: Vec<Meal>,
    pub recommendation: Option<Recommendation>,
}

impl PageData {
    /// 收藏菜品
    pub fn favorites(&self) -> impl Iterator<Item = &Meal> {
        self.meals.iter().filter(|m| m.favorite)
    }
}
