use serde::{Deserialize, Serialize};

/// 个性化推荐
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub recommendation: String,
}

impl Recommendation {
    pub fn new(text: &str) -> Self {
        Self {
            recommendation: text.to_string(),
        }
    }
}
