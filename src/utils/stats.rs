//! 描述性統計輔助函數
//!
//! 所有函數在輸入不足以定義結果時回傳 `None`，不以 NaN 表示缺值。
//! 分位數固定使用順序統計量之間的線性插值（`h = (n - 1) * q`）。

use statrs::statistics::Statistics;

/// 算術平均數，空集合為 `None`
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().mean())
}

/// 樣本標準差（自由度 n - 1），少於兩個值為 `None`
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    Some(values.iter().std_dev())
}

/// 線性插值分位數
///
/// `q` 必須介於 0 與 1 之間；NaN 值不參與計算。
pub fn quantile_linear(values: &[f64], q: f64) -> Option<f64> {
    if !(0.0..=1.0).contains(&q) {
        return None;
    }

    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(|a, b| a.total_cmp(b));

    let h = (sorted.len() - 1) as f64 * q;
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    let frac = h - lo as f64;

    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// 中位數（偶數個值時取中間兩值平均）
pub fn median(values: &[f64]) -> Option<f64> {
    quantile_linear(values, 0.5)
}
