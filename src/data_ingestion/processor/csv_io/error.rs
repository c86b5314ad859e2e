//! CSV 處理錯誤定義
//!
//! 這裡的錯誤都屬於資料格式錯誤：缺欄位、日期無法解析等，一律中止整次執行。

use thiserror::Error;

/// CSV 處理錯誤類型
#[derive(Error, Debug)]
pub enum CsvError {
    #[error("檔案讀取錯誤: {0}")]
    IoError(#[from] std::io::Error),

    #[error("{source_name} 缺少必要欄位: {columns}")]
    MissingColumn {
        source_name: String,
        columns: String,
    },

    #[error("日期解析錯誤: 第 {line} 行, 值 {value:?}")]
    DateParseError { line: usize, value: String },

    #[error("時間戳解析錯誤: 第 {line} 行, 值 {value:?}")]
    TimestampParseError { line: usize, value: String },

    #[error("情緒資料日期重複: {date} (第 {line} 行)")]
    DuplicateDate { date: String, line: usize },

    #[error("Polars 錯誤: {0}")]
    PolarsError(#[from] polars::error::PolarsError),
}

/// CSV 處理結果類型
pub type CsvResult<T> = Result<T, CsvError>;
