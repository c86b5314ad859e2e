use config::{Config, ConfigError, Environment as ConfigEnvironment, File};
use std::env;
use std::path::Path;

/// 環境變數：選擇配置環境
pub const ENV_VAR: &str = "TRADER_SENTIMENT_ENV";
/// 環境變數覆寫前綴
pub const ENV_PREFIX: &str = "TRADER_SENTIMENT";

/// 環境類型枚舉
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// 從環境變數取得當前環境設定
    pub fn from_env() -> Self {
        match env::var(ENV_VAR)
            .unwrap_or_else(|_| "development".into())
            .to_lowercase()
            .as_str()
        {
            "production" => Environment::Production,
            _ => Environment::Development,
        }
    }

    /// 轉換為配置文件名
    pub fn as_filename(&self) -> &'static str {
        match self {
            Environment::Development => "development.toml",
            Environment::Production => "production.toml",
        }
    }
}

/// 配置加載器，負責根據環境加載適當的配置
pub struct ConfigLoader;

impl ConfigLoader {
    /// 載入指定環境的配置
    pub fn load(env: Environment) -> Result<Config, ConfigError> {
        let config_dir = env::var("CONFIG_DIR").unwrap_or_else(|_| "config".into());
        Self::load_from_dir(&config_dir, env)
    }

    /// 從指定目錄載入配置，環境檔案不存在時僅使用預設值與環境變數
    pub fn load_from_dir(config_dir: impl AsRef<Path>, env: Environment) -> Result<Config, ConfigError> {
        let config_path = config_dir.as_ref().join(env.as_filename());

        Config::builder()
            // 加載環境特定配置
            .add_source(File::from(config_path).required(false))
            // 從環境變數加載配置（優先級高於文件配置）
            .add_source(
                ConfigEnvironment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
    }
}
