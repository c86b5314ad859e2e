//! 分析核心
//!
//! 將正規化後的交易與情緒記錄轉成帳戶輪廓表與帳戶 × 日表：
//! join、槓桿推估、彙總、最大回撤、分位數分層。

pub mod aggregation;
pub mod degenerate;
pub mod drawdown;
pub mod error;
pub mod join;
pub mod leverage;
pub mod pipeline;
pub mod segmentation;
pub mod snapshot;

pub use aggregation::{aggregate_profiles, aggregate_trader_days, AccountAggregate, DayAggregate};
pub use degenerate::DegenerateReport;
pub use drawdown::{account_drawdown, max_drawdown};
pub use error::{PipelineError, PipelineResult};
pub use join::{join_trades, TaggedTrade};
pub use leverage::{estimate_leverage, leverage_for, LeverageEstimate};
pub use pipeline::AnalyticsPipeline;
pub use segmentation::{segment, QuantileBounds, SegmentThresholds, Segmentation};
pub use snapshot::{AnalyticsSnapshot, SnapshotCache, PROFILE_FILE, TRADER_DAY_FILE};
