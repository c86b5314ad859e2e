//! 基本類型與欄位名稱定義

use serde::{Deserialize, Serialize};
use std::fmt;

/// 輸出表格的標準欄位名稱
pub struct ColumnName;

impl ColumnName {
    pub const ACCOUNT: &'static str = "account";
    pub const DATE: &'static str = "date";
    pub const SENTIMENT: &'static str = "sentiment";
    pub const IS_GREED: &'static str = "is_greed";

    // TraderProfile
    pub const TOTAL_TRADES: &'static str = "total_trades";
    pub const ACTIVE_DAYS: &'static str = "active_days";
    pub const TRADES_PER_DAY: &'static str = "trades_per_day";
    pub const TOTAL_PNL: &'static str = "total_pnl";
    pub const WINRATE: &'static str = "winrate";
    pub const AVG_LEVERAGE: &'static str = "avg_leverage";
    pub const AVG_TRADE_SIZE: &'static str = "avg_trade_size";
    pub const PNL_VOLATILITY: &'static str = "pnl_volatility";
    pub const MAX_DRAWDOWN: &'static str = "max_drawdown";
    pub const LEV_TIER: &'static str = "lev_tier";
    pub const FREQ_TIER: &'static str = "freq_tier";
    pub const WINNER_TIER: &'static str = "winner_tier";

    // TraderDaySummary
    pub const DAILY_PNL: &'static str = "daily_pnl";
    pub const N_TRADES: &'static str = "n_trades";
    pub const WIN_RATE: &'static str = "win_rate";
    pub const AVG_LEV: &'static str = "avg_lev";
    pub const AVG_SIZE: &'static str = "avg_size";
    pub const TRADER_AVG_LEV: &'static str = "trader_avg_lev";
}

/// 每日市場情緒（二元化）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sentiment {
    Fear,
    Greed,
}

impl Sentiment {
    pub const ALL: [Sentiment; 2] = [Sentiment::Fear, Sentiment::Greed];

    /// 分類字串中含有 "greed"（不分大小寫）即為 Greed，其餘皆為 Fear
    pub fn from_classification(classification: &str) -> Self {
        if classification.to_lowercase().contains("greed") {
            Sentiment::Greed
        } else {
            Sentiment::Fear
        }
    }

    pub fn is_greed(&self) -> u8 {
        match self {
            Sentiment::Greed => 1,
            Sentiment::Fear => 0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Fear => "Fear",
            Sentiment::Greed => "Greed",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 交易方向（大小寫正規化後）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
    /// 非 BUY/SELL 的原始值（已轉大寫）
    Other(String),
}

impl Side {
    pub fn parse(raw: &str) -> Self {
        let upper = raw.trim().to_uppercase();
        match upper.as_str() {
            "BUY" => Side::Buy,
            "SELL" => Side::Sell,
            _ => Side::Other(upper),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
            Side::Other(s) => s.as_str(),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
