//! 收藏标记合并

use crate::models::{Meal, RawMeal, UserPreferences};

/// 按偏好为每个菜品计算收藏标记
///
/// 收藏列表先转成集合，顺序和重复项不影响结果。菜品顺序保持不变。
pub fn merge_favorites(meals: Vec<RawMeal>, preferences: &UserPreferences) -> Vec<Meal> {
    let favorites = preferences.favorite_set();
    meals
        .into_iter()
        .map(|raw| {
            let favorite = favorites.contains(raw.name.as_str());
            Meal::from_raw(raw, favorite)
        })
        .collect()
}
