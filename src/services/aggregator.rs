//! 页面聚合服务
//!
//! 并发请求菜单、偏好、推荐，失败的资源替换为默认值，再合并收藏标记。
//!
//! | 结果 | meals | preferences | recommendation |
//! |---|---|---|---|
//! | 成功 | 解析后的菜品列表 | 解析后的偏好 | `Some(推荐)` |
//! | 失败 | 空列表 | `favoriteMeals` 为空 | `None` |

use tracing::{debug, info};

use crate::backend::{MenuBackend, create_menu_backend};
use crate::config::BackendConfig;
use crate::error::Result;
use crate::models::{PageData, UserPreferences};
use crate::services::merge::merge_favorites;
use crate::services::settle::{PageSlot, settle3};

pub struct PageAggregator {
    backend: Box<dyn MenuBackend>,
}

impl PageAggregator {
    pub fn new(backend: Box<dyn MenuBackend>) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &dyn MenuBackend {
        self.backend.as_ref()
    }

    /// 聚合一次页面数据，不会失败
    pub async fn aggregate(&self, identity: &str) -> PageData {
        let (meals, preferences, recommendation) = settle3(
            self.backend.today_meals(),
            self.backend.preferences(identity),
            self.backend.recommendation(identity),
        )
        .await;

        let meals = meals.or_fallback(PageSlot::Meals, Vec::new);
        let preferences = preferences.or_fallback(PageSlot::Preferences, UserPreferences::default);
        let recommendation = recommendation
            .map(Some)
            .or_fallback(PageSlot::Recommendation, || None);

        debug!(
            meals = meals.len(),
            favorites = preferences.favorite_meals.len(),
            recommendation = recommendation.is_some(),
            "page resources settled"
        );

        let page = PageData {
            meals: merge_favorites(meals, &preferences),
            recommendation,
        };
        info!(
            meals = page.meals.len(),
            favorites = page.favorites().count(),
            "page data aggregated"
        );
        page
    }
}

pub fn create_page_aggregator(config: &BackendConfig) -> Result<PageAggregator> {
    Ok(PageAggregator::new(create_menu_backend(config)?))
}
