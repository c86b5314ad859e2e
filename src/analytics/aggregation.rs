//! 彙總引擎
//!
//! 對已 join 的交易做兩次分組彙總：帳戶終身（profile）與帳戶 × 日。
//! 分組以 `BTreeMap` 進行，輸出依帳戶、日期排序，與輸入列順序無關。

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use super::drawdown::account_drawdown;
use crate::domain_types::{JoinedTrade, Sentiment};
use crate::utils::{mean, sample_std};

/// 帳戶終身彙總（尚未分層）
#[derive(Debug, Clone, PartialEq)]
pub struct AccountAggregate {
    pub account: String,
    pub total_trades: u32,
    pub active_days: u32,
    pub trades_per_day: f64,
    pub total_pnl: f64,
    pub winrate: f64,
    pub avg_leverage: f64,
    pub avg_trade_size: f64,
    pub pnl_volatility: Option<f64>,
    pub max_drawdown: f64,
}

/// 帳戶 × 日彙總（尚未合併帳戶層級欄位）
#[derive(Debug, Clone, PartialEq)]
pub struct DayAggregate {
    pub account: String,
    pub date: NaiveDate,
    pub sentiment: Sentiment,
    pub daily_pnl: f64,
    pub n_trades: u32,
    pub win_rate: f64,
    pub avg_lev: f64,
    pub avg_size: f64,
}

/// 依帳戶分組，組內保留輸入順序
fn group_by_account(trades: &[JoinedTrade]) -> BTreeMap<&str, Vec<&JoinedTrade>> {
    let mut groups: BTreeMap<&str, Vec<&JoinedTrade>> = BTreeMap::new();
    for trade in trades {
        groups.entry(trade.account()).or_default().push(trade);
    }
    groups
}

fn win_fraction(trades: &[&JoinedTrade]) -> f64 {
    let wins = trades.iter().filter(|t| t.is_win()).count();
    wins as f64 / trades.len() as f64
}

fn column<F>(trades: &[&JoinedTrade], f: F) -> Vec<f64>
where
    F: Fn(&JoinedTrade) -> f64,
{
    trades.iter().map(|&t| f(t)).collect()
}

fn reduce_account(account: &str, trades: &[&JoinedTrade]) -> AccountAggregate {
    let pnls = column(trades, JoinedTrade::pnl);
    let leverages = column(trades, |t| t.leverage as f64);
    let sizes = column(trades, JoinedTrade::size_usd);

    let total_trades = trades.len() as u32;
    // 分母必須是該帳戶自己的活躍日數
    let active_days = trades.iter().map(|t| t.date()).collect::<BTreeSet<_>>().len() as u32;

    AccountAggregate {
        account: account.to_string(),
        total_trades,
        active_days,
        trades_per_day: total_trades as f64 / active_days as f64,
        total_pnl: pnls.iter().sum(),
        winrate: win_fraction(trades),
        avg_leverage: mean(&leverages).unwrap_or_default(),
        avg_trade_size: mean(&sizes).unwrap_or_default(),
        pnl_volatility: sample_std(&pnls),
        max_drawdown: account_drawdown(trades),
    }
}

/// 帳戶終身彙總，每個帳戶一列
pub fn aggregate_profiles(trades: &[JoinedTrade]) -> Vec<AccountAggregate> {
    group_by_account(trades)
        .into_iter()
        .map(|(account, group)| reduce_account(account, &group))
        .collect()
}

/// 帳戶 × 日彙總，每個出現過的 (帳戶, 日期) 一列
pub fn aggregate_trader_days(trades: &[JoinedTrade]) -> Vec<DayAggregate> {
    let mut groups: BTreeMap<(&str, NaiveDate), Vec<&JoinedTrade>> = BTreeMap::new();
    for trade in trades {
        groups
            .entry((trade.account(), trade.date()))
            .or_default()
            .push(trade);
    }

    groups
        .into_iter()
        .map(|((account, date), group)| {
            let pnls = column(&group, JoinedTrade::pnl);
            let leverages = column(&group, |t| t.leverage as f64);
            let sizes = column(&group, JoinedTrade::size_usd);

            DayAggregate {
                account: account.to_string(),
                date,
                // 同一日期只對應一個情緒標籤
                sentiment: group[0].sentiment,
                daily_pnl: pnls.iter().sum(),
                n_trades: group.len() as u32,
                win_rate: win_fraction(&group),
                avg_lev: mean(&leverages).unwrap_or_default(),
                avg_size: mean(&sizes).unwrap_or_default(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain_types::{Side, TradeRecord};

    fn joined(account: &str, day: u32, pnl: f64, leverage: u32) -> JoinedTrade {
        let ts = NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        let sentiment = if day % 2 == 0 { Sentiment::Fear } else { Sentiment::Greed };
        JoinedTrade {
            trade: TradeRecord::new(account, ts, Side::Buy, pnl, 100.0 * leverage as f64),
            sentiment,
            is_greed: sentiment.is_greed(),
            leverage,
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_profile_example() {
        let trades = vec![joined("A", 1, 100.0, 1), joined("A", 2, -150.0, 1)];
        let profiles = aggregate_profiles(&trades);

        assert_eq!(profiles.len(), 1);
        let a = &profiles[0];
        assert_eq!(a.total_trades, 2);
        assert_eq!(a.active_days, 2);
        assert!(approx(a.total_pnl, -50.0));
        assert!(approx(a.winrate, 0.5));
        assert!(approx(a.max_drawdown, -150.0));
        assert!(approx(a.pnl_volatility.unwrap(), 176.776_695_296_636_9));
    }

    #[test]
    fn test_trades_per_day_uses_own_active_days() {
        let trades = vec![
            joined("A", 1, 1.0, 1),
            joined("A", 1, 1.0, 1),
            joined("A", 1, 1.0, 1),
            joined("B", 1, 1.0, 1),
            joined("B", 2, 1.0, 1),
            joined("B", 3, 1.0, 1),
        ];
        let profiles = aggregate_profiles(&trades);
        assert!(approx(profiles[0].trades_per_day, 3.0));
        assert!(approx(profiles[1].trades_per_day, 1.0));
    }

    #[test]
    fn test_single_trade_volatility_undefined() {
        let profiles = aggregate_profiles(&[joined("A", 1, 0.0, 3)]);
        assert_eq!(profiles[0].pnl_volatility, None);
        assert!(approx(profiles[0].avg_leverage, 3.0));
        // pnl == 0 不算獲利
        assert_eq!(profiles[0].winrate, 0.0);
    }

    #[test]
    fn test_trader_days() {
        let trades = vec![
            joined("B", 1, 10.0, 2),
            joined("A", 1, -5.0, 1),
            joined("A", 1, 15.0, 3),
            joined("A", 2, 7.0, 1),
        ];
        let days = aggregate_trader_days(&trades);

        assert_eq!(days.len(), 3);
        assert_eq!(days[0].account, "A");
        assert_eq!(days[0].n_trades, 2);
        assert!(approx(days[0].daily_pnl, 10.0));
        assert!(approx(days[0].win_rate, 0.5));
        assert!(approx(days[0].avg_lev, 2.0));
        assert!(approx(days[0].avg_size, 200.0));
        assert_eq!(days[0].sentiment, Sentiment::Greed);
        assert_eq!(days[1].sentiment, Sentiment::Fear);
        assert_eq!(days[2].account, "B");
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate_profiles(&[]).is_empty());
        assert!(aggregate_trader_days(&[]).is_empty());
    }
}
