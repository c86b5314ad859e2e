use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::types::{Sentiment, Side};

/// 正規化後的交易記錄
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub account: String,
    pub timestamp: NaiveDateTime,
    /// 由 timestamp 截斷至日
    pub date: NaiveDate,
    pub side: Side,
    /// 無法解析時為 0
    pub pnl: f64,
    /// 無法解析時為 0
    pub size_usd: f64,
}

impl TradeRecord {
    pub fn new(
        account: impl Into<String>,
        timestamp: NaiveDateTime,
        side: Side,
        pnl: f64,
        size_usd: f64,
    ) -> Self {
        Self {
            account: account.into(),
            timestamp,
            date: timestamp.date(),
            side,
            pnl,
            size_usd,
        }
    }
}

/// 已對上當日情緒的交易
///
/// 只有日期出現在情緒序列中的交易才會產生此記錄。`leverage` 在 join
/// 之後依全體已 join 交易的名目金額中位數推估。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinedTrade {
    #[serde(flatten)]
    pub trade: TradeRecord,
    pub sentiment: Sentiment,
    pub is_greed: u8,
    /// 合成槓桿，整數且落在配置的上下限內
    pub leverage: u32,
}

impl JoinedTrade {
    pub fn account(&self) -> &str {
        &self.trade.account
    }

    pub fn date(&self) -> NaiveDate {
        self.trade.date
    }

    pub fn pnl(&self) -> f64 {
        self.trade.pnl
    }

    pub fn size_usd(&self) -> f64 {
        self.trade.size_usd
    }

    pub fn is_win(&self) -> bool {
        self.trade.pnl > 0.0
    }
}
