//! 分析快照
//!
//! 管線的唯一輸出。計算一次後以 `Arc` 分享給所有讀取端，之後不再變動。

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use once_cell::sync::OnceCell;
use polars::prelude::*;
use serde::Serialize;
use tracing::info;

use super::degenerate::DegenerateReport;
use super::error::{PipelineError, PipelineResult};
use super::segmentation::SegmentThresholds;
use crate::data_ingestion::IngestionReport;
use crate::domain_types::{ColumnName, TraderDaySummary, TraderProfile};
use crate::utils::format_date;

pub const PROFILE_FILE: &str = "trader_profile.csv";
pub const TRADER_DAY_FILE: &str = "trader_day.csv";

/// 不可變的分析結果
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsSnapshot {
    /// 依帳戶排序
    pub profiles: Vec<TraderProfile>,
    /// 依帳戶、日期排序
    pub trader_days: Vec<TraderDaySummary>,
    pub ingestion: IngestionReport,
    pub degenerate: DegenerateReport,
    pub thresholds: SegmentThresholds,
    pub median_size: Option<f64>,
}

impl AnalyticsSnapshot {
    pub fn profile(&self, account: &str) -> Option<&TraderProfile> {
        self.profiles.iter().find(|p| p.account == account)
    }

    /// 單一帳戶的帳戶 × 日列
    pub fn days_for<'a>(&'a self, account: &'a str) -> impl Iterator<Item = &'a TraderDaySummary> + 'a {
        self.trader_days.iter().filter(move |d| d.account == account)
    }

    /// 帳戶輪廓表
    pub fn profile_frame(&self) -> PolarsResult<DataFrame> {
        let p = &self.profiles;
        DataFrame::new(vec![
            Column::new(ColumnName::ACCOUNT.into(), p.iter().map(|r| r.account.as_str()).collect::<Vec<_>>()),
            Column::new(ColumnName::TOTAL_TRADES.into(), p.iter().map(|r| r.total_trades).collect::<Vec<_>>()),
            Column::new(ColumnName::ACTIVE_DAYS.into(), p.iter().map(|r| r.active_days).collect::<Vec<_>>()),
            Column::new(ColumnName::TRADES_PER_DAY.into(), p.iter().map(|r| r.trades_per_day).collect::<Vec<_>>()),
            Column::new(ColumnName::TOTAL_PNL.into(), p.iter().map(|r| r.total_pnl).collect::<Vec<_>>()),
            Column::new(ColumnName::WINRATE.into(), p.iter().map(|r| r.winrate).collect::<Vec<_>>()),
            Column::new(ColumnName::AVG_LEVERAGE.into(), p.iter().map(|r| r.avg_leverage).collect::<Vec<_>>()),
            Column::new(ColumnName::AVG_TRADE_SIZE.into(), p.iter().map(|r| r.avg_trade_size).collect::<Vec<_>>()),
            Column::new(ColumnName::PNL_VOLATILITY.into(), p.iter().map(|r| r.pnl_volatility).collect::<Vec<_>>()),
            Column::new(ColumnName::MAX_DRAWDOWN.into(), p.iter().map(|r| r.max_drawdown).collect::<Vec<_>>()),
            Column::new(ColumnName::LEV_TIER.into(), p.iter().map(|r| r.lev_tier.as_str()).collect::<Vec<_>>()),
            Column::new(ColumnName::FREQ_TIER.into(), p.iter().map(|r| r.freq_tier.as_str()).collect::<Vec<_>>()),
            Column::new(ColumnName::WINNER_TIER.into(), p.iter().map(|r| r.winner_tier.as_str()).collect::<Vec<_>>()),
        ])
    }

    /// 帳戶 × 日表，日期以 `YYYY-MM-DD` 字串表示
    pub fn trader_day_frame(&self) -> PolarsResult<DataFrame> {
        let d = &self.trader_days;
        DataFrame::new(vec![
            Column::new(ColumnName::ACCOUNT.into(), d.iter().map(|r| r.account.as_str()).collect::<Vec<_>>()),
            Column::new(ColumnName::DATE.into(), d.iter().map(|r| format_date(r.date)).collect::<Vec<_>>()),
            Column::new(ColumnName::SENTIMENT.into(), d.iter().map(|r| r.sentiment.as_str()).collect::<Vec<_>>()),
            Column::new(ColumnName::IS_GREED.into(), d.iter().map(|r| r.is_greed as i32).collect::<Vec<_>>()),
            Column::new(ColumnName::DAILY_PNL.into(), d.iter().map(|r| r.daily_pnl).collect::<Vec<_>>()),
            Column::new(ColumnName::N_TRADES.into(), d.iter().map(|r| r.n_trades).collect::<Vec<_>>()),
            Column::new(ColumnName::WIN_RATE.into(), d.iter().map(|r| r.win_rate).collect::<Vec<_>>()),
            Column::new(ColumnName::AVG_LEV.into(), d.iter().map(|r| r.avg_lev).collect::<Vec<_>>()),
            Column::new(ColumnName::AVG_SIZE.into(), d.iter().map(|r| r.avg_size).collect::<Vec<_>>()),
            Column::new(ColumnName::LEV_TIER.into(), d.iter().map(|r| r.lev_tier.as_str()).collect::<Vec<_>>()),
            Column::new(ColumnName::FREQ_TIER.into(), d.iter().map(|r| r.freq_tier.as_str()).collect::<Vec<_>>()),
            Column::new(ColumnName::WINNER_TIER.into(), d.iter().map(|r| r.winner_tier.as_str()).collect::<Vec<_>>()),
            Column::new(ColumnName::TRADER_AVG_LEV.into(), d.iter().map(|r| r.trader_avg_lev).collect::<Vec<_>>()),
            Column::new(ColumnName::WINRATE.into(), d.iter().map(|r| r.winrate).collect::<Vec<_>>()),
            Column::new(ColumnName::TRADES_PER_DAY.into(), d.iter().map(|r| r.trades_per_day).collect::<Vec<_>>()),
        ])
    }

    /// 將兩張表寫成 CSV，回傳寫出的檔案路徑
    pub fn export(&self, dir: impl AsRef<Path>) -> PipelineResult<Vec<PathBuf>> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)
            .map_err(|e| PipelineError::Export(format!("無法建立目錄 {}: {}", dir.display(), e)))?;

        let tables = [
            (PROFILE_FILE, self.profile_frame()),
            (TRADER_DAY_FILE, self.trader_day_frame()),
        ];

        let mut written = Vec::with_capacity(tables.len());
        for (name, frame) in tables {
            let mut df = frame.map_err(|e| PipelineError::Export(e.to_string()))?;
            let path = dir.join(name);
            let mut file = File::create(&path)
                .map_err(|e| PipelineError::Export(format!("無法建立檔案 {}: {}", path.display(), e)))?;
            CsvWriter::new(&mut file)
                .include_header(true)
                .finish(&mut df)
                .map_err(|e| PipelineError::Export(e.to_string()))?;
            info!("已輸出 {} ({} 列)", path.display(), df.height());
            written.push(path);
        }

        Ok(written)
    }
}

/// 快照的記憶化邊界：整個行程內只計算一次
#[derive(Debug, Default)]
pub struct SnapshotCache {
    cell: OnceCell<Arc<AnalyticsSnapshot>>,
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// 取得快照，首次呼叫時以 `init` 計算
    pub fn get_or_load<F>(&self, init: F) -> PipelineResult<Arc<AnalyticsSnapshot>>
    where
        F: FnOnce() -> PipelineResult<Arc<AnalyticsSnapshot>>,
    {
        self.cell.get_or_try_init(init).map(Arc::clone)
    }

    pub fn get(&self) -> Option<Arc<AnalyticsSnapshot>> {
        self.cell.get().cloned()
    }
}
