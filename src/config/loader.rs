use crate::config::config::AppConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml, Yaml},
};
use std::path::{Path, PathBuf};

/// 环境变量前缀
pub const ENV_PREFIX: &str = "MENSA_";

/// 身份保存天数上限
pub const MAX_TTL_DAYS: u32 = 36_500;

/// 配置加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 从默认路径加载配置
    ///
    /// 优先级（高者覆盖低者）：
    /// 1. `MENSA_*` 环境变量，`__` 分隔配置段
    /// 2. ./mensa.yaml
    /// 3. ./mensa.toml
    /// 4. 内置默认值
    pub fn load() -> Result<AppConfig, figment::Error> {
        Self::figment().extract()
    }

    /// 从指定路径加载配置，按扩展名选择格式
    pub fn load_from(path: PathBuf) -> Result<AppConfig, figment::Error> {
        Self::figment_for(&path).extract()
    }

    /// 默认配置来源
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file("mensa.toml"))
            .merge(Yaml::file("mensa.yaml"))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    fn figment_for(path: &Path) -> Figment {
        let base = Figment::from(Serialized::defaults(AppConfig::default()));
        let base = match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => base.merge(Yaml::file(path)),
            _ => base.merge(Toml::file(path)),
        };
        base.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// 验证配置
    pub fn validate(config: &AppConfig) -> Result<(), ConfigValidationError> {
        if config.backend.base_url.trim().is_empty() {
            return Err(ConfigValidationError::MissingBaseUrl);
        }

        if let Err(e) = reqwest::Url::parse(&config.backend.base_url) {
            return Err(ConfigValidationError::InvalidBaseUrl(e.to_string()));
        }

        if config.backend.canteen.trim().is_empty() {
            return Err(ConfigValidationError::MissingCanteen);
        }

        if config.backend.request_timeout == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }

        if config.identity.cookie_name.trim().is_empty() {
            return Err(ConfigValidationError::MissingCookieName);
        }

        if config.identity.ttl_days == 0 || config.identity.ttl_days > MAX_TTL_DAYS {
            return Err(ConfigValidationError::InvalidTtl);
        }

        Ok(())
    }
}

/// 配置验证错误
#[derive(thiserror::Error, Debug)]
pub enum ConfigValidationError {
    #[error("后端地址未配置")]
    MissingBaseUrl,

    #[error("后端地址无效: {0}")]
    InvalidBaseUrl(String),

    #[error("食堂名称未配置")]
    MissingCanteen,

    #[error("请求超时无效，必须大于 0")]
    InvalidTimeout,

    #[error("身份键名未配置")]
    MissingCookieName,

    #[error("身份保存天数无效，必须在 1 到 {} 之间", MAX_TTL_DAYS)]
    InvalidTtl,
}

impl From<ConfigValidationError> for crate::error::AppError {
    fn from(e: ConfigValidationError) -> Self {
        crate::error::AppError::Config(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults_without_sources() {
        Jail::expect_with(|_jail| {
            let config = ConfigLoader::load()?;
            assert_eq!(config.backend.base_url, "http://localhost:8080");
            assert_eq!(config.backend.canteen, "mensa-garching");
            assert_eq!(config.identity.cookie_name, "username");
            assert_eq!(config.identity.ttl_days, 30);
            assert!(config.identity.interactive);
            Ok(())
        });
    }

    #[test]
    fn test_toml_file_then_env_override() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "mensa.toml",
                r#"
                [backend]
                base_url = "http://backend.internal:9000"
                request_timeout = 3

                [identity]
                ttl_days = 7
                "#,
            )?;
            jail.set_env("MENSA_BACKEND__BASE_URL", "http://override:1234");
            jail.set_env("MENSA_IDENTITY__INTERACTIVE", "false");

            let config = ConfigLoader::load()?;
            assert_eq!(config.backend.base_url, "http://override:1234");
            assert_eq!(config.backend.request_timeout, 3);
            assert_eq!(config.identity.ttl_days, 7);
            assert!(!config.identity.interactive);
            Ok(())
        });
    }

    #[test]
    fn test_load_from_yaml_path() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "custom.yaml",
                "backend:\n  canteen: mensa-arcisstr\nlogging:\n  structured: true\n",
            )?;

            let config = ConfigLoader::load_from(PathBuf::from("custom.yaml"))?;
            assert_eq!(config.backend.canteen, "mensa-arcisstr");
            assert!(config.logging.structured);
            assert_eq!(config.backend.base_url, "http://localhost:8080");
            Ok(())
        });
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert!(ConfigLoader::validate(&AppConfig::default()).is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.backend.base_url = "not a url".into();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigValidationError::InvalidBaseUrl(_))
        ));

        let mut config = AppConfig::default();
        config.backend.request_timeout = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigValidationError::InvalidTimeout)
        ));

        let mut config = AppConfig::default();
        config.identity.cookie_name = " ".into();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigValidationError::MissingCookieName)
        ));

        let mut config = AppConfig::default();
        config.identity.ttl_days = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigValidationError::InvalidTtl)
        ));
    }

    #[test]
    fn test_validate_ttl_upper_bound() {
        let mut config = AppConfig::default();
        config.identity.ttl_days = MAX_TTL_DAYS;
        assert!(ConfigLoader::validate(&config).is_ok());

        for ttl_days in [MAX_TTL_DAYS + 1, u32::MAX] {
            config.identity.ttl_days = ttl_days;
            assert!(matches!(
                ConfigLoader::validate(&config),
                Err(ConfigValidationError::InvalidTtl)
            ));
        }
    }
}
