//! 基于 reqwest 的后端客户端

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use crate::backend::MenuBackend;
use crate::config::BackendConfig;
use crate::error::{AppError, Result};
use crate::models::{RawMeal, Recommendation, UserPreferences};

/// 检查响应状态
///
/// - 204 → [`AppError::NoContent`]
/// - 其他非 2xx → [`AppError::Api`]，附带状态码和响应体
pub async fn check_response(resource: &str, resp: reqwest::Response) -> Result<reqwest::Response> {
    let status = resp.status();
    if status == StatusCode::NO_CONTENT {
        return Err(AppError::NoContent(resource.to_string()));
    }
    if !status.is_success() {
        return Err(AppError::Api {
            status: status.as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

/// HTTP 后端
pub struct HttpMenuBackend {
    client: reqwest::Client,
    base_url: String,
    canteen: String,
}

impl HttpMenuBackend {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout))
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            canteen: config.canteen.clone(),
        })
    }

    /// 拼接地址，每个路径段单独编码
    pub fn url(&self, segments: &[&str]) -> String {
        let mut url = self.base_url.clone();
        for segment in segments {
            url.push('/');
            url.push_str(&urlencoding::encode(segment));
        }
        url
    }

    async fn read_json<T: DeserializeOwned>(resource: &str, resp: reqwest::Response) -> Result<T> {
        let resp = check_response(resource, resp).await?;
        let body = resp.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| AppError::Parse(format!("{}: {}", resource, e)))
    }

    /// 与 [`Self::read_json`] 相同，但空响应体视为默认值
    async fn read_json_or_default<T: DeserializeOwned + Default>(
        resource: &str,
        resp: reqwest::Response,
    ) -> Result<T> {
        let resp = check_response(resource, resp).await?;
        let body = resp.bytes().await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            debug!(resource, "empty body, using default");
            return Ok(T::default());
        }
        serde_json::from_slice(&body).map_err(|e| AppError::Parse(format!("{}: {}", resource, e)))
    }

    async fn get_json<T: DeserializeOwned>(&self, resource: &str, url: String) -> Result<T> {
        debug!(resource, %url, "GET");
        let resp = self.client.get(&url).send().await?;
        Self::read_json(resource, resp).await
    }
}

#[async_trait]
impl MenuBackend for HttpMenuBackend {
    async fn today_meals(&self) -> Result<Vec<RawMeal>> {
        let url = self.url(&[self.canteen.as_str(), "today"]);
        self.get_json("meals", url).await
    }

    async fn preferences(&self, identity: &str) -> Result<UserPreferences> {
        let url = self.url(&["preferences", identity]);
        self.get_json("preferences", url).await
    }

    async fn recommendation(&self, identity: &str) -> Result<Recommendation> {
        let url = self.url(&["recommend", identity]);
        self.get_json("recommendation", url).await
    }

    async fn add_favorite(&self, identity: &str, meal: &str) -> Result<UserPreferences> {
        let url = self.url(&["preferences", identity]);
        debug!(%url, meal, "POST");
        let resp = self
            .client
            .post(&url)
            .query(&[("meal", meal)])
            .send()
            .await?;
        Self::read_json("preferences", resp).await
    }

    async fn remove_favorite(&self, identity: &str, meal: &str) -> Result<UserPreferences> {
        let url = self.url(&["preferences", identity]);
        debug!(%url, meal, "DELETE");
        let resp = self
            .client
            .delete(&url)
            .query(&[("meal", meal)])
            .send()
            .await?;
        // Unknown users get a 200 with no body
        Self::read_json_or_default("preferences", resp).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend(base_url: &str) -> HttpMenuBackend {
        HttpMenuBackend::new(&BackendConfig {
            base_url: base_url.into(),
            ..BackendConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_url_trims_trailing_slash() {
        let backend = backend("http://localhost:8080/api/");
        assert_eq!(
            backend.url(&["mensa-garching", "today"]),
            "http://localhost:8080/api/mensa-garching/today"
        );
    }

    #[test]
    fn test_url_encodes_identity_segment() {
        let backend = backend("http://localhost:8080");
        assert_eq!(
            backend.url(&["preferences", "max mustermann/admin"]),
            "http://localhost:8080/preferences/max%20mustermann%2Fadmin"
        );
    }
}
