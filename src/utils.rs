// utils.rs - 公共工具模組
//
// 提供日期解析與統計計算等通用輔助方法。

pub mod stats;
pub mod time_utils;

// 重新導出常用工具函數，使其可以通過 utils::function_name 直接訪問
pub use stats::{mean, median, quantile_linear, sample_std};
pub use time_utils::{format_date, parse_date, parse_timestamp};
