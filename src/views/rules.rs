use polars::prelude::PolarsResult;
use serde::Serialize;

use super::segments::{SegmentAxis, SegmentTable};
use crate::analytics::AnalyticsSnapshot;
use crate::domain_types::{FrequencyTier, LeverageTier};
use crate::utils::median;

/// 由資料即時推導的策略規則
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategyRules {
    /// Low Leverage 帳戶平均槓桿的中位數，該層為空時未定義
    pub leverage_cap: Option<f64>,
    /// Low Frequency 帳戶每日交易數的中位數
    pub frequency_cap: Option<f64>,
    pub leverage_evidence: SegmentTable,
    pub frequency_evidence: SegmentTable,
}

impl StrategyRules {
    pub fn from_snapshot(snapshot: &AnalyticsSnapshot) -> PolarsResult<Self> {
        let low_leverage: Vec<f64> = snapshot
            .profiles
            .iter()
            .filter(|p| p.lev_tier == LeverageTier::Low)
            .map(|p| p.avg_leverage)
            .collect();
        let low_frequency: Vec<f64> = snapshot
            .profiles
            .iter()
            .filter(|p| p.freq_tier == FrequencyTier::Low)
            .map(|p| p.trades_per_day)
            .collect();

        Ok(Self {
            leverage_cap: median(&low_leverage),
            frequency_cap: median(&low_frequency),
            leverage_evidence: SegmentTable::from_snapshot(snapshot, SegmentAxis::Leverage)?,
            frequency_evidence: SegmentTable::from_snapshot(snapshot, SegmentAxis::Frequency)?,
        })
    }
}
