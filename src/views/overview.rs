use std::collections::BTreeSet;

use polars::prelude::PolarsResult;
use serde::Serialize;

use super::frame::{self, group_daily_stats, AVG_TRADES, MEAN_WIN_RATE, MEDIAN_PNL, PNL_STD, ROWS};
use crate::analytics::AnalyticsSnapshot;
use crate::domain_types::{ColumnName, Sentiment};

/// 單一情緒下的帳戶 × 日摘要
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentSummary {
    pub sentiment: Sentiment,
    pub trader_days: usize,
    pub median_pnl: Option<f64>,
    pub win_rate: Option<f64>,
    /// 少於兩列時未定義
    pub pnl_std: Option<f64>,
    pub avg_trades: Option<f64>,
}

/// 總覽
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    pub total_trader_days: usize,
    pub unique_traders: usize,
    pub fear_days: usize,
    pub greed_days: usize,
    /// 只含實際出現的情緒，Fear 在前
    pub summary: Vec<SentimentSummary>,
}

impl Overview {
    pub fn from_snapshot(snapshot: &AnalyticsSnapshot) -> PolarsResult<Self> {
        let days = &snapshot.trader_days;

        let unique_traders = days.iter().map(|d| d.account.as_str()).collect::<BTreeSet<_>>().len();
        let distinct_days = |sentiment: Sentiment| {
            days.iter()
                .filter(|d| d.sentiment == sentiment)
                .map(|d| d.date)
                .collect::<BTreeSet<_>>()
                .len()
        };

        let stats = group_daily_stats(snapshot.trader_day_frame()?, &[ColumnName::SENTIMENT])?;
        let keys = frame::str_values(&stats, ColumnName::SENTIMENT)?;
        let medians = frame::f64_values(&stats, MEDIAN_PNL)?;
        let win_rates = frame::f64_values(&stats, MEAN_WIN_RATE)?;
        let stds = frame::f64_values(&stats, PNL_STD)?;
        let avg_trades = frame::f64_values(&stats, AVG_TRADES)?;
        let rows = frame::count_values(&stats, ROWS)?;

        let summary = Sentiment::ALL
            .iter()
            .filter_map(|sentiment| {
                let i = keys
                    .iter()
                    .position(|k| k.as_deref() == Some(sentiment.as_str()))?;
                Some(SentimentSummary {
                    sentiment: *sentiment,
                    trader_days: rows[i],
                    median_pnl: medians[i],
                    win_rate: win_rates[i],
                    pnl_std: stds[i],
                    avg_trades: avg_trades[i],
                })
            })
            .collect();

        Ok(Self {
            total_trader_days: days.len(),
            unique_traders,
            fear_days: distinct_days(Sentiment::Fear),
            greed_days: distinct_days(Sentiment::Greed),
            summary,
        })
    }

    pub fn summary_for(&self, sentiment: Sentiment) -> Option<&SentimentSummary> {
        self.summary.iter().find(|s| s.sentiment == sentiment)
    }
}
