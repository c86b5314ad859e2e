use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::data_ingestion::IngestionReport;
use crate::domain_types::{Sentiment, SentimentRecord, TradeRecord};

/// 已附上情緒標籤、尚未推估槓桿的交易
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedTrade {
    pub trade: TradeRecord,
    pub sentiment: Sentiment,
}

/// 以日期對交易與情緒序列做內連接
///
/// 日期不在情緒序列中的交易直接捨棄，不參與任何下游彙總。輸出保留交易的原始順序。
pub fn join_trades(
    sentiment: &[SentimentRecord],
    trades: Vec<TradeRecord>,
    report: &mut IngestionReport,
) -> Vec<TaggedTrade> {
    let labels: HashMap<NaiveDate, Sentiment> =
        sentiment.iter().map(|record| (record.date, record.label)).collect();

    let total = trades.len();
    let joined: Vec<TaggedTrade> = trades
        .into_iter()
        .filter_map(|trade| {
            labels.get(&trade.date).map(|&sentiment| TaggedTrade { trade, sentiment })
        })
        .collect();

    report.trades_joined = joined.len();
    report.trades_unmatched = total - joined.len();

    if report.trades_unmatched > 0 {
        warn!(
            "{} 筆交易的日期沒有情緒資料，已排除於分析之外",
            report.trades_unmatched
        );
    }
    debug!("join 完成: {}/{} 筆交易對上情緒", joined.len(), total);

    joined
}
