//! Mensa - 食堂页面数据聚合
//!
//! 每次页面加载先解析用户身份，再并发获取今日菜单、用户偏好和个性化推荐。
//! 任何一个资源失败都以默认值替代，最终输出带收藏标记的菜品列表和推荐。

pub mod backend;
pub mod config;
pub mod error;
pub mod identity;
pub mod models;
pub mod observability;
pub mod services;
