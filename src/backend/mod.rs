//! 后端服务接口
//!
//! 菜单、用户偏好、推荐三个资源，外加偏好的增删。

pub mod http;

use async_trait::async_trait;

use crate::config::BackendConfig;
use crate::error::Result;
use crate::models::{RawMeal, Recommendation, UserPreferences};

pub use http::{HttpMenuBackend, check_response};

#[async_trait]
pub trait MenuBackend: Send + Sync {
    /// 今日菜单，与身份无关
    async fn today_meals(&self) -> Result<Vec<RawMeal>>;

    /// 用户偏好
    async fn preferences(&self, identity: &str) -> Result<UserPreferences>;

    /// 个性化推荐
    async fn recommendation(&self, identity: &str) -> Result<Recommendation>;

    /// 添加收藏，返回更新后的偏好
    async fn add_favorite(&self, identity: &str, meal: &str) -> Result<UserPreferences>;

    /// 移除收藏，返回更新后的偏好
    async fn remove_favorite(&self, identity: &str, meal: &str) -> Result<UserPreferences>;
}

pub fn create_menu_backend(config: &BackendConfig) -> Result<Box<dyn MenuBackend>> {
    Ok(Box::new(HttpMenuBackend::new(config)?))
}
