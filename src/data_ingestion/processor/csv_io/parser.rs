//! CSV 資料解析器
//!
//! 將讀入的字串 DataFrame 正規化為型別化記錄：日期截斷至日、交易方向轉大寫、
//! 無法解析的數值強制為 0 並記入攝取報告。

use super::error::{CsvError, CsvResult};
use crate::config::{SentimentColumns, TradeColumns};
use crate::data_ingestion::report::{IngestionReport, WarningKind};
use crate::domain_types::{SentimentRecord, Side, TradeRecord};
use crate::utils::{format_date, parse_date, parse_timestamp};
use polars::prelude::*;
use std::collections::HashMap;
use tracing::warn;

/// 標題行佔一行，資料列索引轉行號時加 2
const HEADER_OFFSET: usize = 2;

/// CSV 解析器
pub struct CsvParser;

impl CsvParser {
    /// 解析情緒資料
    ///
    /// 日期無法解析或同一日期出現兩次皆為致命錯誤。
    pub fn parse_sentiment(
        df: &DataFrame,
        columns: &SentimentColumns,
        report: &mut IngestionReport,
    ) -> CsvResult<Vec<SentimentRecord>> {
        Self::require_columns(df, "情緒資料", &[&columns.date, &columns.classification])?;

        let dates = Self::string_column(df, &columns.date)?;
        let classifications = Self::string_column(df, &columns.classification)?;

        let mut seen: HashMap<chrono::NaiveDate, usize> = HashMap::with_capacity(dates.len());
        let mut records = Vec::with_capacity(dates.len());

        for (idx, (raw_date, classification)) in dates.iter().zip(classifications.iter()).enumerate() {
            let line = idx + HEADER_OFFSET;

            let date = raw_date
                .as_deref()
                .and_then(parse_date)
                .ok_or_else(|| CsvError::DateParseError {
                    line,
                    value: raw_date.clone().unwrap_or_default(),
                })?;

            if seen.insert(date, line).is_some() {
                return Err(CsvError::DuplicateDate {
                    date: format_date(date),
                    line,
                });
            }

            let classification = match classification.as_deref().map(str::trim) {
                Some(value) if !value.is_empty() => value.to_string(),
                _ => {
                    report.add_warning(
                        line,
                        WarningKind::MissingClassification,
                        &columns.classification,
                        classification.as_deref(),
                    );
                    String::new()
                }
            };

            records.push(SentimentRecord::new(date, classification));
        }

        report.sentiment_rows = records.len();
        if report.missing_classification > 0 {
            warn!("{} 筆情緒資料缺少分類，視為 Fear", report.missing_classification);
        }

        Ok(records)
    }

    /// 解析交易資料
    ///
    /// 時間戳無法解析為致命錯誤；PnL 與 Size USD 無法解析時強制為 0 並保留該列；
    /// 帳戶為空的列被捨棄。
    pub fn parse_trades(
        df: &DataFrame,
        columns: &TradeColumns,
        timestamp_format: Option<&str>,
        report: &mut IngestionReport,
    ) -> CsvResult<Vec<TradeRecord>> {
        Self::require_columns(
            df,
            "交易資料",
            &[
                &columns.account,
                &columns.timestamp,
                &columns.side,
                &columns.pnl,
                &columns.size_usd,
            ],
        )?;

        let accounts = Self::string_column(df, &columns.account)?;
        let timestamps = Self::string_column(df, &columns.timestamp)?;
        let sides = Self::string_column(df, &columns.side)?;
        let pnls = Self::string_column(df, &columns.pnl)?;
        let sizes = Self::string_column(df, &columns.size_usd)?;

        let mut records = Vec::with_capacity(accounts.len());

        for idx in 0..accounts.len() {
            let line = idx + HEADER_OFFSET;

            let raw_ts = timestamps[idx].as_deref();
            let timestamp = raw_ts
                .and_then(|raw| parse_timestamp(raw, timestamp_format))
                .ok_or_else(|| CsvError::TimestampParseError {
                    line,
                    value: raw_ts.unwrap_or_default().to_string(),
                })?;

            let account = match accounts[idx].as_deref().map(str::trim) {
                Some(account) if !account.is_empty() => account.to_string(),
                _ => {
                    report.add_warning(line, WarningKind::MissingAccount, &columns.account, None);
                    continue;
                }
            };

            let side = Side::parse(sides[idx].as_deref().unwrap_or_default());
            if let Side::Other(raw) = &side {
                report.add_warning(line, WarningKind::UnknownSide, &columns.side, Some(raw.as_str()));
            }

            let pnl = match Self::coerce_number(pnls[idx].as_deref()) {
                Some(value) => value,
                None => {
                    report.record_pnl_coercion(line, &columns.pnl, pnls[idx].as_deref());
                    0.0
                }
            };

            let size_usd = match Self::coerce_number(sizes[idx].as_deref()) {
                Some(value) => value,
                None => {
                    report.record_size_coercion(line, &columns.size_usd, sizes[idx].as_deref());
                    0.0
                }
            };

            records.push(TradeRecord::new(account, timestamp, side, pnl, size_usd));
        }

        report.trade_rows = accounts.len();
        if report.pnl_coerced > 0 || report.size_coerced > 0 {
            warn!(
                "數值欄位強制轉為 0: PnL {} 筆, Size USD {} 筆",
                report.pnl_coerced, report.size_coerced
            );
        }
        if report.missing_account > 0 {
            warn!("{} 筆交易缺少帳戶，已捨棄", report.missing_account);
        }
        if report.unknown_side > 0 {
            warn!("{} 筆交易方向不是 BUY/SELL", report.unknown_side);
        }

        Ok(records)
    }

    /// 解析數值字串，缺值、無法解析或非有限值回傳 `None`
    pub fn coerce_number(raw: Option<&str>) -> Option<f64> {
        raw.map(str::trim)
            .filter(|s| !s.is_empty())
            .and_then(|s| s.parse::<f64>().ok())
            .filter(|v| v.is_finite())
    }

    /// 確保必要的欄位都存在，一次列出所有缺少的欄位
    fn require_columns(df: &DataFrame, source_name: &str, required: &[&String]) -> CsvResult<()> {
        let missing: Vec<&str> = required
            .iter()
            .map(|name| name.as_str())
            .filter(|name| df.column(name).is_err())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(CsvError::MissingColumn {
                source_name: source_name.to_string(),
                columns: missing.join(", "),
            })
        }
    }

    /// 將欄位轉為字串後取出
    fn string_column(df: &DataFrame, name: &str) -> CsvResult<Vec<Option<String>>> {
        let column = df
            .column(name)
            .map_err(|_| CsvError::MissingColumn {
                source_name: "DataFrame".to_string(),
                columns: name.to_string(),
            })?
            .cast(&DataType::String)?;

        let values = column
            .as_materialized_series()
            .str()?
            .into_iter()
            .map(|value| value.map(str::to_string))
            .collect();

        Ok(values)
    }
}
