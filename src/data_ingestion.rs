//! 資料攝取模組
//!
//! 讀取恐懼貪婪指數與交易歷史兩份 CSV，正規化為型別化記錄，
//! 並以 [`IngestionReport`] 記錄列級異常。

pub mod processor;
pub mod report;

pub use processor::{CsvError, CsvParser, CsvReader, CsvReaderConfig, CsvResult, DataLoader, RawDatasets};
pub use report::{IngestionReport, IngestionWarning, ReportFormatter, WarningKind};
