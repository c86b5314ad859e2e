use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::types::Sentiment;

/// 每日情緒記錄，每個日曆日最多一筆
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentRecord {
    pub date: NaiveDate,
    /// 原始分類字串（如 "Extreme Greed"）
    pub classification: String,
    pub label: Sentiment,
}

impl SentimentRecord {
    pub fn new(date: NaiveDate, classification: impl Into<String>) -> Self {
        let classification = classification.into();
        let label = Sentiment::from_classification(&classification);
        Self {
            date,
            classification,
            label,
        }
    }
}
