use serde::{Serialize, Deserialize};
use crate::config::validation::{ValidationError, ValidationUtils, Validator};

/// 應用程序配置結構
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApplicationConfig {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub log: LogConfig,
}

impl Validator for ApplicationConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        // 驗證各個部分的配置
        self.data.validate()?;
        self.analysis.validate()?;
        self.log.validate()?;

        Ok(())
    }
}

/// 資料來源配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// 恐懼貪婪指數 CSV 路徑
    pub sentiment_path: String,
    /// 交易歷史 CSV 路徑
    pub trades_path: String,
    /// CSV 分隔符
    pub separator: char,
    pub sentiment_columns: SentimentColumns,
    pub trade_columns: TradeColumns,
    /// 交易時間戳格式（未指定時依序嘗試日在前的常見格式）
    pub timestamp_format: Option<String>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            sentiment_path: "fear_greed_index.csv".to_string(),
            trades_path: "historical_data.csv".to_string(),
            separator: ',',
            sentiment_columns: SentimentColumns::default(),
            trade_columns: TradeColumns::default(),
            timestamp_format: None,
        }
    }
}

impl Validator for DataConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationUtils::not_empty(&self.sentiment_path, "data.sentiment_path")?;
        ValidationUtils::not_empty(&self.trades_path, "data.trades_path")?;

        ValidationUtils::ascii_separator(self.separator)?;

        self.sentiment_columns.validate()?;
        self.trade_columns.validate()?;

        if let Some(format) = &self.timestamp_format {
            ValidationUtils::not_empty(format, "data.timestamp_format")?;
        }

        Ok(())
    }
}

/// 情緒資料欄位名稱
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SentimentColumns {
    pub date: String,
    pub classification: String,
}

impl Default for SentimentColumns {
    fn default() -> Self {
        Self {
            date: "date".to_string(),
            classification: "classification".to_string(),
        }
    }
}

impl Validator for SentimentColumns {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationUtils::not_empty(&self.date, "data.sentiment_columns.date")?;
        ValidationUtils::not_empty(&self.classification, "data.sentiment_columns.classification")?;
        Ok(())
    }
}

/// 交易資料欄位名稱
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TradeColumns {
    pub account: String,
    pub timestamp: String,
    pub side: String,
    pub pnl: String,
    pub size_usd: String,
}

impl Default for TradeColumns {
    fn default() -> Self {
        Self {
            account: "Account".to_string(),
            timestamp: "Timestamp IST".to_string(),
            side: "Side".to_string(),
            pnl: "Closed PnL".to_string(),
            size_usd: "Size USD".to_string(),
        }
    }
}

impl Validator for TradeColumns {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationUtils::not_empty(&self.account, "data.trade_columns.account")?;
        ValidationUtils::not_empty(&self.timestamp, "data.trade_columns.timestamp")?;
        ValidationUtils::not_empty(&self.side, "data.trade_columns.side")?;
        ValidationUtils::not_empty(&self.pnl, "data.trade_columns.pnl")?;
        ValidationUtils::not_empty(&self.size_usd, "data.trade_columns.size_usd")?;
        Ok(())
    }
}

/// 分析參數配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// 分層下界分位數
    pub lower_quantile: f64,
    /// 分層上界分位數
    pub upper_quantile: f64,
    pub min_leverage: u32,
    pub max_leverage: u32,
    /// PnL 分佈直方圖的箱數
    pub histogram_bins: usize,
    /// 直方圖兩端截尾比例
    pub histogram_clip: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            lower_quantile: 0.33,
            upper_quantile: 0.67,
            min_leverage: 1,
            max_leverage: 100,
            histogram_bins: 50,
            histogram_clip: 0.02,
        }
    }
}

impl Validator for AnalysisConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationUtils::quantile_pair(self.lower_quantile, self.upper_quantile)?;
        ValidationUtils::leverage_range(self.min_leverage, self.max_leverage)?;
        ValidationUtils::histogram(self.histogram_bins, self.histogram_clip)?;

        Ok(())
    }
}

/// 日誌配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub format: String,
    /// 設定後額外輸出輪替的日誌檔
    pub directory: Option<String>,
    /// 日誌檔輪替週期: minutely / hourly / daily / never
    pub rotation: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            directory: None,
            rotation: None,
        }
    }
}

impl Validator for LogConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationUtils::keyword(&self.level, &["trace", "debug", "info", "warn", "error"], "log.level")?;
        ValidationUtils::keyword(&self.format, &["pretty", "json"], "log.format")?;

        if let Some(dir) = &self.directory {
            ValidationUtils::not_empty(dir, "log.directory")?;
        }

        ValidationUtils::check_dependency(
            self.rotation.is_some(),
            self.directory.is_some(),
            "log.rotation",
            "log.directory",
        )?;
        if let Some(rotation) = &self.rotation {
            ValidationUtils::keyword(rotation, &["minutely", "hourly", "daily", "never"], "log.rotation")?;
        }

        Ok(())
    }
}
