use once_cell::sync::OnceCell;
use config::ConfigError;
use tracing::{warn, debug};
use crate::config::types::ApplicationConfig;
use crate::config::loader::{ConfigLoader, Environment};
use crate::config::validation::Validator;
use std::path::Path;

// 全局配置實例
static CONFIG: OnceCell<ApplicationConfig> = OnceCell::new();

/// 獲取應用程序配置實例，未初始化時回退到預設配置
pub fn get_config() -> &'static ApplicationConfig {
    CONFIG.get_or_init(|| {
        ApplicationConfig::load_from_env().unwrap_or_else(|err| {
            warn!("無法加載應用程序配置，改用預設值: {}", err);
            ApplicationConfig::default()
        })
    })
}

/// 初始化配置（在應用程序啟動時調用）
pub fn init_config() -> Result<&'static ApplicationConfig, ConfigError> {
    let app_config = ApplicationConfig::load_from_env()?;

    // 嘗試初始化全局配置
    if CONFIG.set(app_config).is_err() {
        warn!("配置已經被初始化，跳過重複初始化");
    } else {
        debug!("配置初始化成功，環境：{:?}", Environment::from_env());
    }

    Ok(get_config())
}

/// ApplicationConfig 加載方法實現
impl ApplicationConfig {
    /// 從環境變數指定的環境加載配置
    pub fn load_from_env() -> Result<Self, ConfigError> {
        let env = Environment::from_env();
        debug!("從環境加載配置: {:?}", env);
        Self::from_source(ConfigLoader::load(env)?)
    }

    /// 從指定目錄與環境加載配置
    pub fn load_from_dir(config_dir: impl AsRef<Path>, env: Environment) -> Result<Self, ConfigError> {
        Self::from_source(ConfigLoader::load_from_dir(config_dir, env)?)
    }

    fn from_source(config_source: config::Config) -> Result<Self, ConfigError> {
        // 使用 serde 反序列化配置
        let app_config: ApplicationConfig = config_source.try_deserialize()?;

        // 驗證失敗視為配置錯誤
        app_config
            .validate()
            .map_err(|err| ConfigError::Message(err.to_string()))?;
        debug!("配置驗證通過");

        Ok(app_config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    #[test]
    #[serial]
    fn test_load_from_dir_with_env_override() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("production.toml"),
            r#"
[data]
trades_path = "data/trades.csv"

[log]
level = "warn"
"#,
        )
        .unwrap();

        env::set_var("TRADER_SENTIMENT__DATA__SENTIMENT_PATH", "data/fgi.csv");
        let config = ApplicationConfig::load_from_dir(dir.path(), Environment::Production).unwrap();
        env::remove_var("TRADER_SENTIMENT__DATA__SENTIMENT_PATH");

        assert_eq!(config.data.trades_path, "data/trades.csv");
        assert_eq!(config.data.sentiment_path, "data/fgi.csv");
        assert_eq!(config.log.level, "warn");
        assert_eq!(config.analysis.upper_quantile, 0.67);
    }

    #[test]
    #[serial]
    fn test_invalid_config_rejected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("development.toml"),
            "[analysis]\nlower_quantile = 0.9\nupper_quantile = 0.1\n",
        )
        .unwrap();

        let result = ApplicationConfig::load_from_dir(dir.path(), Environment::Development);
        assert!(result.is_err());
    }
}
