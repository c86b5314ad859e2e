//! 最大回撤計算

use crate::domain_types::JoinedTrade;

/// 依序累加 PnL 的最大回撤
///
/// 峰值取累積曲線本身的歷史最大值（從第一筆累積值開始），
/// 回傳 `min(cumulative - running_max)`，恆 <= 0。空序列回傳 0。
pub fn max_drawdown<I>(pnls: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let mut cumulative = 0.0;
    let mut peak = f64::NEG_INFINITY;
    let mut worst = 0.0_f64;

    for pnl in pnls {
        cumulative += pnl;
        if cumulative > peak {
            peak = cumulative;
        }
        let drawdown = cumulative - peak;
        if drawdown < worst {
            worst = drawdown;
        }
    }

    worst
}

/// 單一帳戶的最大回撤
///
/// 先依日期穩定排序，同日多筆交易保持原始順序。
pub fn account_drawdown(trades: &[&JoinedTrade]) -> f64 {
    let mut ordered: Vec<&JoinedTrade> = trades.to_vec();
    ordered.sort_by_key(|t| t.date());
    max_drawdown(ordered.iter().map(|t| t.pnl()))
}
