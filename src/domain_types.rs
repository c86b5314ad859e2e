pub mod types;
pub mod sentiment;
pub mod trade;
pub mod profile;

pub use types::{ColumnName, Sentiment, Side};
pub use sentiment::SentimentRecord;
pub use trade::{JoinedTrade, TradeRecord};
pub use profile::{FrequencyTier, LeverageTier, TraderDaySummary, TraderProfile, WinnerTier};
