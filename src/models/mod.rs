//! 数据模型
//!
//! 每次页面加载都从网络响应重新构建，合并完成后不再修改。

pub mod meal;
pub mod page;
pub mod preferences;
pub mod recommendation;

pub use meal::{Meal, RawMeal};
pub use page::PageData;
pub use preferences::UserPreferences;
pub use recommendation::Recommendation;
