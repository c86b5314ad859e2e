//! 每日 PnL 分佈

use serde::Serialize;

use crate::analytics::AnalyticsSnapshot;
use crate::config::AnalysisConfig;
use crate::domain_types::Sentiment;
use crate::utils::quantile_linear;

/// 等寬直方圖，最後一個箱為閉區間
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    /// 長度為箱數 + 1
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// 值域寬度為 0 時向兩側各擴 0.5
    pub fn build(values: &[f64], bins: usize) -> Option<Self> {
        if values.is_empty() || bins == 0 {
            return None;
        }

        let mut lo = values.iter().copied().fold(f64::INFINITY, f64::min);
        let mut hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        let width = (hi - lo) / bins as f64;
        let edges = (0..=bins).map(|i| lo + width * i as f64).collect();

        let mut counts = vec![0; bins];
        for v in values {
            let index = (((v - lo) / width).floor() as usize).min(bins - 1);
            counts[index] += 1;
        }

        Some(Self { edges, counts })
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// 單一情緒的截尾分佈
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentDistribution {
    pub sentiment: Sentiment,
    pub clip_low: f64,
    pub clip_high: f64,
    pub histogram: Histogram,
}

/// 將值夾在 [clip, 1 - clip] 分位數內後分箱
pub fn clipped_histogram(values: &[f64], bins: usize, clip: f64) -> Option<(f64, f64, Histogram)> {
    let lo = quantile_linear(values, clip)?;
    let hi = quantile_linear(values, 1.0 - clip)?;
    let clipped: Vec<f64> = values.iter().map(|v| v.clamp(lo, hi)).collect();
    Histogram::build(&clipped, bins).map(|h| (lo, hi, h))
}

/// Fear 與 Greed 兩組帳戶 × 日 PnL 分佈
pub fn pnl_distribution(snapshot: &AnalyticsSnapshot, config: &AnalysisConfig) -> Vec<SentimentDistribution> {
    Sentiment::ALL
        .iter()
        .filter_map(|&sentiment| {
            let values: Vec<f64> = snapshot
                .trader_days
                .iter()
                .filter(|d| d.sentiment == sentiment)
                .map(|d| d.daily_pnl)
                .collect();
            let (clip_low, clip_high, histogram) =
                clipped_histogram(&values, config.histogram_bins, config.histogram_clip)?;
            Some(SentimentDistribution {
                sentiment,
                clip_low,
                clip_high,
                histogram,
            })
        })
        .collect()
}
