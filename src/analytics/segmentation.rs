//! 分層引擎
//!
//! 每次執行都以目前帳戶母體重新計算分位數門檻。槓桿與頻率兩軸使用
//! 上下分位數做三分法（先判斷 >= 上界，故門檻重合時歸為 High）；
//! 盈虧型態則以波動度中位數區分穩定與波動型獲利者。

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::aggregation::{AccountAggregate, DayAggregate};
use super::degenerate::DegenerateReport;
use crate::config::AnalysisConfig;
use crate::domain_types::{
    FrequencyTier, LeverageTier, TraderDaySummary, TraderProfile, WinnerTier,
};
use crate::utils::{median, quantile_linear};

/// 一組上下分位數門檻
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuantileBounds {
    pub lower: f64,
    pub upper: f64,
}

impl QuantileBounds {
    fn compute(values: &[f64], config: &AnalysisConfig) -> Option<Self> {
        Some(Self {
            lower: quantile_linear(values, config.lower_quantile)?,
            upper: quantile_linear(values, config.upper_quantile)?,
        })
    }
}

/// 本次執行的分層門檻
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SegmentThresholds {
    /// 無帳戶時為 `None`
    pub leverage: Option<QuantileBounds>,
    pub frequency: Option<QuantileBounds>,
    /// 僅計入有定義的波動度
    pub volatility_median: Option<f64>,
}

impl SegmentThresholds {
    pub fn compute(accounts: &[AccountAggregate], config: &AnalysisConfig) -> Self {
        let leverages: Vec<f64> = accounts.iter().map(|a| a.avg_leverage).collect();
        let frequencies: Vec<f64> = accounts.iter().map(|a| a.trades_per_day).collect();
        let volatilities: Vec<f64> = accounts.iter().filter_map(|a| a.pnl_volatility).collect();

        Self {
            leverage: QuantileBounds::compute(&leverages, config),
            frequency: QuantileBounds::compute(&frequencies, config),
            volatility_median: median(&volatilities),
        }
    }
}

/// 三分法位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Band {
    High,
    Mid,
    Low,
}

fn band(value: f64, bounds: QuantileBounds) -> Band {
    if value >= bounds.upper {
        Band::High
    } else if value <= bounds.lower {
        Band::Low
    } else {
        Band::Mid
    }
}

pub fn leverage_tier(avg_leverage: f64, bounds: QuantileBounds) -> LeverageTier {
    match band(avg_leverage, bounds) {
        Band::High => LeverageTier::High,
        Band::Mid => LeverageTier::Mid,
        Band::Low => LeverageTier::Low,
    }
}

pub fn frequency_tier(trades_per_day: f64, bounds: QuantileBounds) -> FrequencyTier {
    match band(trades_per_day, bounds) {
        Band::High => FrequencyTier::High,
        Band::Mid => FrequencyTier::Mid,
        Band::Low => FrequencyTier::Low,
    }
}

/// 未定義的波動度一律不算「<= 中位數」
pub fn winner_tier(
    total_pnl: f64,
    pnl_volatility: Option<f64>,
    volatility_median: Option<f64>,
) -> WinnerTier {
    if total_pnl <= 0.0 {
        return WinnerTier::Loser;
    }
    match (pnl_volatility, volatility_median) {
        (Some(vol), Some(med)) if vol <= med => WinnerTier::ConsistentWinner,
        _ => WinnerTier::VolatileWinner,
    }
}

/// 分層結果
#[derive(Debug, Clone)]
pub struct Segmentation {
    pub profiles: Vec<TraderProfile>,
    pub trader_days: Vec<TraderDaySummary>,
    pub thresholds: SegmentThresholds,
}

/// 為每個帳戶分層，並將帳戶層級欄位合併進帳戶 × 日表
pub fn segment(
    accounts: Vec<AccountAggregate>,
    days: Vec<DayAggregate>,
    config: &AnalysisConfig,
    degenerate: &mut DegenerateReport,
) -> Segmentation {
    let thresholds = SegmentThresholds::compute(&accounts, config);
    debug!("分層門檻: {:?}", thresholds);

    degenerate.undefined_volatility = accounts.iter().filter(|a| a.pnl_volatility.is_none()).count();
    degenerate.volatility_median_missing =
        !accounts.is_empty() && thresholds.volatility_median.is_none();
    if degenerate.undefined_volatility > 0 {
        warn!(
            "{} 個帳戶交易數少於 2，波動度未定義，獲利時歸為 Volatile Winner",
            degenerate.undefined_volatility
        );
    }
    if degenerate.volatility_median_missing {
        warn!("沒有任何帳戶的波動度有定義，所有獲利帳戶歸為 Volatile Winner");
    }

    // 有帳戶時兩組門檻必定存在
    let fallback = QuantileBounds { lower: 0.0, upper: 0.0 };
    let lev_bounds = thresholds.leverage.unwrap_or(fallback);
    let freq_bounds = thresholds.frequency.unwrap_or(fallback);

    let profiles: Vec<TraderProfile> = accounts
        .into_iter()
        .map(|a| TraderProfile {
            lev_tier: leverage_tier(a.avg_leverage, lev_bounds),
            freq_tier: frequency_tier(a.trades_per_day, freq_bounds),
            winner_tier: winner_tier(a.total_pnl, a.pnl_volatility, thresholds.volatility_median),
            account: a.account,
            total_trades: a.total_trades,
            active_days: a.active_days,
            trades_per_day: a.trades_per_day,
            total_pnl: a.total_pnl,
            winrate: a.winrate,
            avg_leverage: a.avg_leverage,
            avg_trade_size: a.avg_trade_size,
            pnl_volatility: a.pnl_volatility,
            max_drawdown: a.max_drawdown,
        })
        .collect();

    let by_account: HashMap<&str, &TraderProfile> =
        profiles.iter().map(|p| (p.account.as_str(), p)).collect();

    // 每個帳戶 × 日列都源自同一組已 join 交易，帳戶必定存在
    let trader_days: Vec<TraderDaySummary> = days
        .into_iter()
        .filter_map(|d| {
            let profile = by_account.get(d.account.as_str())?;
            Some(TraderDaySummary {
                is_greed: d.sentiment.is_greed(),
                lev_tier: profile.lev_tier,
                freq_tier: profile.freq_tier,
                winner_tier: profile.winner_tier,
                trader_avg_lev: profile.avg_leverage,
                winrate: profile.winrate,
                trades_per_day: profile.trades_per_day,
                account: d.account,
                date: d.date,
                sentiment: d.sentiment,
                daily_pnl: d.daily_pnl,
                n_trades: d.n_trades,
                win_rate: d.win_rate,
                avg_lev: d.avg_lev,
                avg_size: d.avg_size,
            })
        })
        .collect();

    Segmentation {
        profiles,
        trader_days,
        thresholds,
    }
}
