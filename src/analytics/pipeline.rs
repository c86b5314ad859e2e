use std::sync::Arc;

use tracing::info;

use super::aggregation::{aggregate_profiles, aggregate_trader_days};
use super::degenerate::DegenerateReport;
use super::error::{PipelineError, PipelineResult};
use super::join::join_trades;
use super::leverage::estimate_leverage;
use super::segmentation::segment;
use super::snapshot::AnalyticsSnapshot;
use crate::config::{validate_config, AnalysisConfig, DataConfig};
use crate::data_ingestion::{DataLoader, IngestionReport, RawDatasets};
use crate::domain_types::{SentimentRecord, TradeRecord};

/// 分析管線
///
/// 資料單向流動：join → 槓桿推估 → 兩次彙總（含回撤）→ 分層。
/// 每次執行彼此獨立，相同輸入必得相同輸出。
#[derive(Debug, Clone, Default)]
pub struct AnalyticsPipeline {
    config: AnalysisConfig,
}

impl AnalyticsPipeline {
    pub fn new(config: AnalysisConfig) -> PipelineResult<Self> {
        validate_config(&config)?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// 對已正規化的記錄執行完整分析
    pub fn run(
        &self,
        sentiment: &[SentimentRecord],
        trades: Vec<TradeRecord>,
        mut report: IngestionReport,
    ) -> AnalyticsSnapshot {
        let tagged = join_trades(sentiment, trades, &mut report);

        let estimate = estimate_leverage(tagged, &self.config);
        let mut degenerate = DegenerateReport {
            median_size_zero: estimate.fallback_applied,
            ..Default::default()
        };

        let accounts = aggregate_profiles(&estimate.trades);
        let days = aggregate_trader_days(&estimate.trades);
        let segmentation = segment(accounts, days, &self.config, &mut degenerate);

        info!(
            "分析完成: {} 個帳戶, {} 筆帳戶 × 日",
            segmentation.profiles.len(),
            segmentation.trader_days.len()
        );

        AnalyticsSnapshot {
            profiles: segmentation.profiles,
            trader_days: segmentation.trader_days,
            ingestion: report.finish(),
            degenerate,
            thresholds: segmentation.thresholds,
            median_size: estimate.median_size,
        }
    }

    /// 對載入結果執行分析
    pub fn run_raw(&self, raw: RawDatasets) -> AnalyticsSnapshot {
        self.run(&raw.sentiment, raw.trades, raw.report)
    }

    /// 從資料配置載入兩份 CSV 後執行分析
    ///
    /// 任一來源沒有資料列時視為致命錯誤。
    pub fn load_and_run(&self, data: &DataConfig) -> PipelineResult<Arc<AnalyticsSnapshot>> {
        validate_config(data)?;
        let raw = DataLoader::new(data.clone()).load()?;

        if raw.sentiment.is_empty() {
            return Err(PipelineError::EmptyInput(data.sentiment_path.clone()));
        }
        if raw.report.trade_rows == 0 {
            return Err(PipelineError::EmptyInput(data.trades_path.clone()));
        }

        Ok(Arc::new(self.run_raw(raw)))
    }
}
