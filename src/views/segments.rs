use polars::prelude::PolarsResult;
use serde::Serialize;

use super::frame::{self, group_daily_stats, MEAN_WIN_RATE, MEDIAN_PNL, N_TRADERS, PNL_STD};
use crate::analytics::AnalyticsSnapshot;
use crate::domain_types::{ColumnName, FrequencyTier, LeverageTier, Sentiment, WinnerTier};

/// 分層軸
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentAxis {
    Leverage,
    Frequency,
    Winner,
}

impl SegmentAxis {
    pub fn column(&self) -> &'static str {
        match self {
            SegmentAxis::Leverage => ColumnName::LEV_TIER,
            SegmentAxis::Frequency => ColumnName::FREQ_TIER,
            SegmentAxis::Winner => ColumnName::WINNER_TIER,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            SegmentAxis::Leverage => "Leverage tier",
            SegmentAxis::Frequency => "Frequency tier",
            SegmentAxis::Winner => "Winner type",
        }
    }

    /// 該軸的分層標籤，依顯示順序
    pub fn labels(&self) -> Vec<&'static str> {
        match self {
            SegmentAxis::Leverage => LeverageTier::ALL.iter().map(|t| t.as_str()).collect(),
            SegmentAxis::Frequency => FrequencyTier::ALL.iter().map(|t| t.as_str()).collect(),
            SegmentAxis::Winner => WinnerTier::ALL.iter().map(|t| t.as_str()).collect(),
        }
    }
}

/// 分層 × 情緒的一格統計
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentCell {
    pub tier: String,
    pub sentiment: Sentiment,
    pub median_pnl: Option<f64>,
    pub win_rate: Option<f64>,
    pub pnl_std: Option<f64>,
    pub n_traders: usize,
}

/// 分層 × 情緒統計表（長格式，只含實際出現的組合）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentTable {
    pub axis: SegmentAxis,
    pub cells: Vec<SegmentCell>,
}

impl SegmentTable {
    pub fn from_snapshot(snapshot: &AnalyticsSnapshot, axis: SegmentAxis) -> PolarsResult<Self> {
        let stats = group_daily_stats(
            snapshot.trader_day_frame()?,
            &[axis.column(), ColumnName::SENTIMENT],
        )?;

        let tiers = frame::str_values(&stats, axis.column())?;
        let sentiments = frame::str_values(&stats, ColumnName::SENTIMENT)?;
        let medians = frame::f64_values(&stats, MEDIAN_PNL)?;
        let win_rates = frame::f64_values(&stats, MEAN_WIN_RATE)?;
        let stds = frame::f64_values(&stats, PNL_STD)?;
        let traders = frame::count_values(&stats, N_TRADERS)?;

        let find = |tier: &str, sentiment: Sentiment| {
            tiers.iter().zip(&sentiments).position(|(t, s)| {
                t.as_deref() == Some(tier) && s.as_deref() == Some(sentiment.as_str())
            })
        };

        let mut cells = Vec::new();
        for tier in axis.labels() {
            for sentiment in Sentiment::ALL {
                if let Some(i) = find(tier, sentiment) {
                    cells.push(SegmentCell {
                        tier: tier.to_string(),
                        sentiment,
                        median_pnl: medians[i],
                        win_rate: win_rates[i],
                        pnl_std: stds[i],
                        n_traders: traders[i],
                    });
                }
            }
        }

        Ok(Self { axis, cells })
    }

    pub fn cell(&self, tier: &str, sentiment: Sentiment) -> Option<&SegmentCell> {
        self.cells
            .iter()
            .find(|c| c.tier == tier && c.sentiment == sentiment)
    }

    /// 實際出現的分層，依顯示順序
    pub fn tiers(&self) -> Vec<&'static str> {
        self.axis
            .labels()
            .into_iter()
            .filter(|tier| self.cells.iter().any(|c| c.tier == *tier))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::AnalyticsPipeline;
    use crate::data_ingestion::IngestionReport;
    use crate::domain_types::{SentimentRecord, Side, TradeRecord};
    use chrono::NaiveDate;

    fn snapshot() -> AnalyticsSnapshot {
        let d = |day| NaiveDate::from_ymd_opt(2024, 5, day).unwrap();
        let sentiment = vec![SentimentRecord::new(d(1), "Fear"), SentimentRecord::new(d(2), "Greed")];
        let t = |account: &str, day, pnl, size| {
            TradeRecord::new(account, d(day).and_hms_opt(0, 0, 0).unwrap(), Side::Sell, pnl, size)
        };
        // 名目金額中位數 100：A 槓桿 1，B 槓桿 5
        let trades = vec![
            t("A", 1, 5.0, 100.0),
            t("A", 2, 1.0, 100.0),
            t("A", 2, 1.0, 100.0),
            t("B", 1, -3.0, 500.0),
            t("B", 2, 9.0, 500.0),
        ];
        AnalyticsPipeline::default().run(&sentiment, trades, IngestionReport::new())
    }

    #[test]
    fn test_leverage_segments() {
        let table = SegmentTable::from_snapshot(&snapshot(), SegmentAxis::Leverage).unwrap();
        assert_eq!(table.tiers(), vec!["High Leverage", "Low Leverage"]);
        assert_eq!(table.cells.len(), 4);

        let high_fear = table.cell("High Leverage", Sentiment::Fear).unwrap();
        assert_eq!(high_fear.median_pnl, Some(-3.0));
        assert_eq!(high_fear.n_traders, 1);
        assert_eq!(high_fear.pnl_std, None);

        let low_greed = table.cell("Low Leverage", Sentiment::Greed).unwrap();
        assert_eq!(low_greed.median_pnl, Some(2.0));
        assert_eq!(low_greed.win_rate, Some(1.0));
        assert!(table.cell("Mid Leverage", Sentiment::Fear).is_none());
    }

    #[test]
    fn test_axis_labels() {
        assert_eq!(SegmentAxis::Winner.column(), "winner_tier");
        assert_eq!(SegmentAxis::Frequency.labels()[2], "Low Frequency");
    }
}
