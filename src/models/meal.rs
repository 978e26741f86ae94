//! 菜品模型

use serde::{Deserialize, Serialize};

/// 菜单服务返回的原始菜品
///
/// 源数据中如果带有 `favorite` 字段，会在反序列化时被丢弃。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMeal {
    /// 菜品名称，同一结果集中唯一
    pub name: String,
    /// 菜品类型
    #[serde(default)]
    pub dish_type: String,
    /// 标签，保持原有顺序
    #[serde(default)]
    pub labels: Vec<String>,
}

/// 合并后的菜品，带有收藏标记
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meal {
    pub name: String,
    pub dish_type: String,
    pub labels: Vec<String>,
    /// 由聚合器根据用户偏好计算
    pub favorite: bool,
}

impl Meal {
    /// 由原始菜品构造，并覆盖收藏标记
    pub fn from_raw(raw: RawMeal, favorite: bool) -> Self {
        Self {
            name: raw.name,
            dish_type: raw.dish_type,
            labels: raw.labels,
            favorite,
        }
    }
}

impl RawMeal {
    pub fn new(name: &str, dish_type: &str, labels: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            dish_type: dish_type.to_string(),
            labels: labels.iter().map(|l| l.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"[
        {
            "name": "Pasta Arrabiata",
            "dish_type": "Pasta",
            "labels": ["VEGAN", "GLUTEN"],
            "favorite": true
        },
        {
            "name": "Schweinebraten",
            "dish_type": "Fleisch",
            "labels": ["PORK"],
            "price": {"students": 3.5}
        }
    ]"#;

    #[test]
    fn test_parse_meal_list_discards_favorite() {
        let meals: Vec<RawMeal> = serde_json::from_str(FIXTURE).unwrap();
        assert_eq!(meals.len(), 2);
        assert_eq!(meals[0].name, "Pasta Arrabiata");
        assert_eq!(meals[0].labels, vec!["VEGAN", "GLUTEN"]);

        let merged = Meal::from_raw(meals[0].clone(), false);
        assert!(!merged.favorite);
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let meal: RawMeal = serde_json::from_str(r#"{"name": "Salad"}"#).unwrap();
        assert_eq!(meal.dish_type, "");
        assert!(meal.labels.is_empty());
    }

    #[test]
    fn test_missing_name_is_rejected() {
        let result = serde_json::from_str::<RawMeal>(r#"{"dish_type": "Pasta"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_meal_serializes_favorite() {
        let meal = Meal::from_raw(RawMeal::new("Pasta", "Pasta", &["VEGETARIAN"]), true);
        let value = serde_json::to_value(&meal).unwrap();
        assert_eq!(value["favorite"], true);
        assert_eq!(value["dish_type"], "Pasta");
    }
}
