use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::types::Sentiment;

/// 槓桿分層
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LeverageTier {
    #[serde(rename = "High Leverage")]
    High,
    #[serde(rename = "Mid Leverage")]
    Mid,
    #[serde(rename = "Low Leverage")]
    Low,
}

/// 交易頻率分層
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FrequencyTier {
    #[serde(rename = "High Frequency")]
    High,
    #[serde(rename = "Mid Frequency")]
    Mid,
    #[serde(rename = "Low Frequency")]
    Low,
}

/// 盈虧型態分層
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WinnerTier {
    #[serde(rename = "Consistent Winner")]
    ConsistentWinner,
    #[serde(rename = "Volatile Winner")]
    VolatileWinner,
    Loser,
}

impl LeverageTier {
    pub const ALL: [LeverageTier; 3] = [LeverageTier::High, LeverageTier::Mid, LeverageTier::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            LeverageTier::High => "High Leverage",
            LeverageTier::Mid => "Mid Leverage",
            LeverageTier::Low => "Low Leverage",
        }
    }
}

impl FrequencyTier {
    pub const ALL: [FrequencyTier; 3] = [FrequencyTier::High, FrequencyTier::Mid, FrequencyTier::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            FrequencyTier::High => "High Frequency",
            FrequencyTier::Mid => "Mid Frequency",
            FrequencyTier::Low => "Low Frequency",
        }
    }
}

impl WinnerTier {
    pub const ALL: [WinnerTier; 3] = [
        WinnerTier::ConsistentWinner,
        WinnerTier::VolatileWinner,
        WinnerTier::Loser,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WinnerTier::ConsistentWinner => "Consistent Winner",
            WinnerTier::VolatileWinner => "Volatile Winner",
            WinnerTier::Loser => "Loser",
        }
    }
}

macro_rules! impl_tier_display {
    ($($tier:ty),*) => {
        $(
            impl fmt::Display for $tier {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}", self.as_str())
                }
            }
        )*
    };
}

impl_tier_display!(LeverageTier, FrequencyTier, WinnerTier);

/// 帳戶終身輪廓，每個帳戶一列
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraderProfile {
    pub account: String,
    pub total_trades: u32,
    pub active_days: u32,
    pub trades_per_day: f64,
    pub total_pnl: f64,
    pub winrate: f64,
    pub avg_leverage: f64,
    pub avg_trade_size: f64,
    /// 樣本標準差，少於兩筆交易時未定義
    pub pnl_volatility: Option<f64>,
    /// 恆 <= 0
    pub max_drawdown: f64,
    pub lev_tier: LeverageTier,
    pub freq_tier: FrequencyTier,
    pub winner_tier: WinnerTier,
}

/// 帳戶 × 日 彙總，帳戶層級欄位由 TraderProfile 複製而來
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraderDaySummary {
    pub account: String,
    pub date: NaiveDate,
    pub sentiment: Sentiment,
    pub is_greed: u8,
    pub daily_pnl: f64,
    pub n_trades: u32,
    pub win_rate: f64,
    pub avg_lev: f64,
    pub avg_size: f64,
    pub lev_tier: LeverageTier,
    pub freq_tier: FrequencyTier,
    pub winner_tier: WinnerTier,
    pub trader_avg_lev: f64,
    pub winrate: f64,
    pub trades_per_day: f64,
}
