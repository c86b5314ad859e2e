use chrono::NaiveDate;
use serde::Serialize;

use crate::analytics::AnalyticsSnapshot;
use crate::domain_types::{Sentiment, TraderProfile};

/// 帳戶每日 PnL 的一個點
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub sentiment: Sentiment,
    pub daily_pnl: f64,
    /// daily_pnl >= 0
    pub gain: bool,
}

/// 單一帳戶的明細
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraderDetail {
    pub profile: TraderProfile,
    pub daily: Vec<DailyPoint>,
}

/// 不分大小寫的子字串搜尋，依輪廓表順序回傳帳戶
pub fn search<'a>(snapshot: &'a AnalyticsSnapshot, query: &str) -> Vec<&'a str> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    snapshot
        .profiles
        .iter()
        .map(|p| p.account.as_str())
        .filter(|account| account.to_lowercase().contains(&needle))
        .collect()
}

/// 帳戶明細，日序列依日期排序
pub fn detail(snapshot: &AnalyticsSnapshot, account: &str) -> Option<TraderDetail> {
    let profile = snapshot.profile(account)?.clone();

    let mut daily: Vec<DailyPoint> = snapshot
        .days_for(account)
        .map(|d| DailyPoint {
            date: d.date,
            sentiment: d.sentiment,
            daily_pnl: d.daily_pnl,
            gain: d.daily_pnl >= 0.0,
        })
        .collect();
    daily.sort_by_key(|p| p.date);

    Some(TraderDetail { profile, daily })
}
