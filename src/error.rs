//! 错误处理模块
//!
//! 定义应用程序的错误类型。页面加载核心（身份解析、聚合）不向调用方传播错误，
//! 这里的错误只在协作方内部流转，最终被降级策略吸收或由命令行入口报告。

use thiserror::Error;

/// 应用程序错误类型
#[derive(Error, Debug)]
pub enum AppError {
    /// HTTP 传输错误（连接失败、超时等）
    #[error("HTTP 错误: {0}")]
    Http(String),

    /// 后端返回非成功状态码
    #[error("后端错误 ({status}): {message}")]
    Api {
        /// HTTP 状态码
        status: u16,
        /// 响应体或错误描述
        message: String,
    },

    /// 后端返回 204，没有可用内容
    #[error("后端无内容: {0}")]
    NoContent(String),

    /// 响应体解析失败
    #[error("响应解析失败: {0}")]
    Parse(String),

    /// 身份存储错误
    #[error("身份存储错误: {0}")]
    Store(String),

    /// 交互式输入错误
    #[error("输入错误: {0}")]
    Prompt(String),

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(String),

    /// 序列化错误
    #[error("序列化错误: {0}")]
    Serialization(String),

    /// IO 错误
    #[error("IO 错误: {0}")]
    Io(String),
}

impl AppError {
    /// 是否属于“资源不可用”类错误（传输失败或解析失败）
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            AppError::Http(_) | AppError::Api { .. } | AppError::NoContent(_) | AppError::Parse(_)
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            AppError::Parse(e.to_string())
        } else {
            AppError::Http(e.to_string())
        }
    }
}

impl From<figment::Error> for AppError {
    fn from(e: figment::Error) -> Self {
        AppError::Config(e.to_string())
    }
}

/// 结果类型别名
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_classification() {
        assert!(AppError::Http("connection refused".into()).is_unavailable());
        assert!(
            AppError::Api {
                status: 503,
                message: String::new()
            }
            .is_unavailable()
        );
        assert!(AppError::NoContent("recommend".into()).is_unavailable());
        assert!(AppError::Parse("expected array".into()).is_unavailable());
        assert!(!AppError::Store("disk full".into()).is_unavailable());
        assert!(!AppError::Config("bad url".into()).is_unavailable());
    }

    #[test]
    fn test_serde_error_conversion() {
        let err = serde_json::from_str::<Vec<String>>("{").unwrap_err();
        let app: AppError = err.into();
        assert!(matches!(app, AppError::Serialization(_)));
    }

    #[test]
    fn test_api_error_display() {
        let err = AppError::Api {
            status: 500,
            message: "boom".into(),
        };
        assert_eq!(err.to_string(), "后端错误 (500): boom");
    }
}
