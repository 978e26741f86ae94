use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 后端服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// 后端基础地址
    pub base_url: String,
    /// 食堂名称，用于今日菜单路径
    pub canteen: String,
    /// 请求超时（秒）
    pub request_timeout: u64,
    /// User-Agent 头
    pub user_agent: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".into(),
            canteen: "mensa-garching".into(),
            request_timeout: 10,
            user_agent: format!("mensa/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// 身份配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    /// 持久化身份使用的键名
    pub cookie_name: String,
    /// 身份保存天数
    pub ttl_days: u32,
    /// 身份文件路径
    pub store_path: PathBuf,
    /// 交互式提示文本
    pub prompt_message: String,
    /// 是否允许交互式输入
    pub interactive: bool,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            cookie_name: "username".into(),
            ttl_days: 30,
            store_path: default_store_path(),
            prompt_message: "Please enter your username:".into(),
            interactive: true,
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: String,
    /// 结构化日志格式
    pub structured: bool,
    /// 日志文件目录
    pub log_dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            structured: false,
            log_dir: None,
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// 后端配置
    pub backend: BackendConfig,
    /// 身份配置
    pub identity: IdentityConfig,
    /// 日志配置
    pub logging: LoggingConfig,
}

fn default_store_path() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("mensa").join("identity.json"))
        .unwrap_or_else(|| PathBuf::from(".mensa-identity.json"))
}
