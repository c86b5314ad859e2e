use super::csv_io::{CsvParser, CsvReader, CsvReaderConfig, CsvResult};
use crate::config::DataConfig;
use crate::data_ingestion::report::IngestionReport;
use crate::domain_types::{SentimentRecord, TradeRecord};
use std::path::Path;
use tracing::info;

/// 兩份原始資料集正規化後的結果
#[derive(Debug, Clone)]
pub struct RawDatasets {
    pub sentiment: Vec<SentimentRecord>,
    pub trades: Vec<TradeRecord>,
    pub report: IngestionReport,
}

/// 讀取情緒與交易 CSV 並正規化
#[derive(Debug, Clone)]
pub struct DataLoader {
    config: DataConfig,
    reader: CsvReader,
}

impl DataLoader {
    pub fn new(config: DataConfig) -> Self {
        let reader = CsvReader::new(CsvReaderConfig {
            separator: config.separator as u8,
            ..CsvReaderConfig::default()
        });
        Self { config, reader }
    }

    /// 從配置中的路徑載入
    pub fn load(&self) -> CsvResult<RawDatasets> {
        self.load_from_paths(&self.config.sentiment_path, &self.config.trades_path)
    }

    /// 從指定路徑載入
    pub fn load_from_paths(
        &self,
        sentiment_path: impl AsRef<Path>,
        trades_path: impl AsRef<Path>,
    ) -> CsvResult<RawDatasets> {
        let sentiment_path = sentiment_path.as_ref();
        let trades_path = trades_path.as_ref();

        info!("載入情緒資料: {}", sentiment_path.display());
        let sentiment_df = self.reader.read_file(sentiment_path)?;

        info!("載入交易資料: {}", trades_path.display());
        let trades_df = self.reader.read_file(trades_path)?;

        let mut report = IngestionReport::new();
        let sentiment =
            CsvParser::parse_sentiment(&sentiment_df, &self.config.sentiment_columns, &mut report)?;
        let trades = CsvParser::parse_trades(
            &trades_df,
            &self.config.trade_columns,
            self.config.timestamp_format.as_deref(),
            &mut report,
        )?;

        info!(
            "攝取完成: 情緒 {} 筆, 交易 {} 筆（保留 {} 筆）",
            sentiment.len(),
            report.trade_rows,
            trades.len()
        );

        Ok(RawDatasets {
            sentiment,
            trades,
            report,
        })
    }
}
