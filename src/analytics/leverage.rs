//! 合成槓桿推估
//!
//! 資料集沒有真實槓桿欄位，以單筆名目金額相對於全體已 join 交易名目金額
//! 中位數的倍數作為代理值：`clamp(round(size / median), min, max)`。

use tracing::{debug, warn};

use super::join::TaggedTrade;
use crate::config::AnalysisConfig;
use crate::domain_types::JoinedTrade;
use crate::utils::median;

/// 推估結果
#[derive(Debug, Clone)]
pub struct LeverageEstimate {
    pub trades: Vec<JoinedTrade>,
    /// 全體名目金額中位數，無交易時為 `None`
    pub median_size: Option<f64>,
    /// 是否因中位數為 0 或無交易而套用下限
    pub fallback_applied: bool,
}

/// 單筆槓桿，四捨六入五成雙後夾在上下限內
pub fn leverage_for(size_usd: f64, median_size: f64, config: &AnalysisConfig) -> u32 {
    let ratio = (size_usd / median_size).round_ties_even();
    if !ratio.is_finite() {
        return config.min_leverage;
    }
    ratio.clamp(config.min_leverage as f64, config.max_leverage as f64) as u32
}

/// 為每筆已 join 的交易推估槓桿
pub fn estimate_leverage(tagged: Vec<TaggedTrade>, config: &AnalysisConfig) -> LeverageEstimate {
    let sizes: Vec<f64> = tagged.iter().map(|t| t.trade.size_usd).collect();
    let median_size = median(&sizes);

    let usable = median_size.filter(|m| *m != 0.0 && m.is_finite());
    let fallback_applied = usable.is_none() && !tagged.is_empty();
    if fallback_applied {
        warn!(
            "名目金額中位數為 0，所有交易槓桿設為 {}",
            config.min_leverage
        );
    }
    debug!("名目金額中位數: {:?}", median_size);

    let trades = tagged
        .into_iter()
        .map(|TaggedTrade { trade, sentiment }| {
            let leverage = match usable {
                Some(m) => leverage_for(trade.size_usd, m, config),
                None => config.min_leverage,
            };
            JoinedTrade {
                trade,
                sentiment,
                is_greed: sentiment.is_greed(),
                leverage,
            }
        })
        .collect();

    LeverageEstimate {
        trades,
        median_size,
        fallback_applied,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain_types::{Sentiment, Side, TradeRecord};
    use chrono::NaiveDate;
    use rstest::rstest;

    fn tagged(size: f64) -> TaggedTrade {
        let ts = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        TaggedTrade {
            trade: TradeRecord::new("A", ts, Side::Buy, 0.0, size),
            sentiment: Sentiment::Greed,
        }
    }

    #[rstest]
    #[case(500.0, 500.0, 1)]
    #[case(1250.0, 500.0, 2)] // 2.5 -> 2
    #[case(1750.0, 500.0, 4)] // 3.5 -> 4
    #[case(10.0, 500.0, 1)]
    #[case(0.0, 500.0, 1)]
    #[case(1_000_000.0, 500.0, 100)]
    #[case(-5000.0, 500.0, 1)]
    fn test_leverage_for(#[case] size: f64, #[case] median: f64, #[case] expected: u32) {
        assert_eq!(leverage_for(size, median, &AnalysisConfig::default()), expected);
    }

    #[test]
    fn test_estimate_uses_joined_median() {
        let estimate = estimate_leverage(
            vec![tagged(100.0), tagged(200.0), tagged(900.0)],
            &AnalysisConfig::default(),
        );
        assert_eq!(estimate.median_size, Some(200.0));
        assert!(!estimate.fallback_applied);
        let levs: Vec<u32> = estimate.trades.iter().map(|t| t.leverage).collect();
        // 0.5 -> 0 -> 1, 1, 4.5 -> 4
        assert_eq!(levs, vec![1, 1, 4]);
        assert!(estimate.trades.iter().all(|t| t.is_greed == 1));
    }

    #[test]
    fn test_zero_median_falls_back_to_min() {
        let config = AnalysisConfig {
            min_leverage: 2,
            ..AnalysisConfig::default()
        };
        let estimate = estimate_leverage(vec![tagged(0.0), tagged(0.0), tagged(50.0)], &config);
        assert_eq!(estimate.median_size, Some(0.0));
        assert!(estimate.fallback_applied);
        assert!(estimate.trades.iter().all(|t| t.leverage == 2));
    }

    #[test]
    fn test_no_trades() {
        let estimate = estimate_leverage(Vec::new(), &AnalysisConfig::default());
        assert!(estimate.trades.is_empty());
        assert_eq!(estimate.median_size, None);
        assert!(!estimate.fallback_applied);
    }
}
