//! DataFrame 讀取輔助
//!
//! 展示層以 polars lazy API 對快照表做分組，再把結果欄位取回成 Rust 值。

use polars::prelude::*;

use crate::domain_types::ColumnName;

pub const MEDIAN_PNL: &str = "median_pnl";
pub const MEAN_WIN_RATE: &str = "win_rate";
pub const PNL_STD: &str = "pnl_std";
pub const AVG_TRADES: &str = "avg_trades";
pub const N_TRADERS: &str = "n_traders";
pub const ROWS: &str = "rows";

/// 依鍵欄位穩定分組，計算 daily_pnl 中位數與標準差、win_rate 平均、
/// n_trades 平均、不重複帳戶數與列數
pub fn group_daily_stats(trader_days: DataFrame, keys: &[&str]) -> PolarsResult<DataFrame> {
    let by: Vec<Expr> = keys.iter().map(|k| col(*k)).collect();
    trader_days
        .lazy()
        .group_by_stable(by)
        .agg([
            col(ColumnName::DAILY_PNL).median().cast(DataType::Float64).alias(MEDIAN_PNL),
            col(ColumnName::WIN_RATE).mean().cast(DataType::Float64).alias(MEAN_WIN_RATE),
            col(ColumnName::DAILY_PNL).std(1).cast(DataType::Float64).alias(PNL_STD),
            col(ColumnName::N_TRADES).cast(DataType::Float64).mean().alias(AVG_TRADES),
            col(ColumnName::ACCOUNT).n_unique().cast(DataType::Float64).alias(N_TRADERS),
            col(ColumnName::DAILY_PNL).count().cast(DataType::Float64).alias(ROWS),
        ])
        .collect()
}

/// 取出浮點欄位，NaN 一律視為未定義
pub fn f64_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<f64>>> {
    let series = df.column(name)?.as_materialized_series().cast(&DataType::Float64)?;
    Ok(series
        .f64()?
        .into_iter()
        .map(|v| v.filter(|x| !x.is_nan()))
        .collect())
}

/// 取出字串欄位
pub fn str_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<String>>> {
    let series = df.column(name)?.as_materialized_series().cast(&DataType::String)?;
    Ok(series.str()?.into_iter().map(|v| v.map(str::to_string)).collect())
}

/// 計數欄位（以浮點彙總後取回）
pub fn count_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<usize>> {
    Ok(f64_values(df, name)?
        .into_iter()
        .map(|v| v.map(|c| c.round() as usize).unwrap_or_default())
        .collect())
}
