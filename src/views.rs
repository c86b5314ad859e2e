//! 展示層讀取模型
//!
//! 只讀取 [`AnalyticsSnapshot`](crate::analytics::AnalyticsSnapshot)，不會重新執行管線。

pub mod frame;
pub mod histogram;
pub mod lookup;
pub mod overview;
pub mod render;
pub mod rules;
pub mod segments;

pub use histogram::{clipped_histogram, pnl_distribution, Histogram, SentimentDistribution};
pub use lookup::{detail, search, DailyPoint, TraderDetail};
pub use overview::{Overview, SentimentSummary};
pub use render::{fmt_value, TextTable};
pub use rules::StrategyRules;
pub use segments::{SegmentAxis, SegmentCell, SegmentTable};
