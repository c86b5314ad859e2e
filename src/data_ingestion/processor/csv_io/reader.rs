//! CSV 檔案讀取器

use super::error::{CsvError, CsvResult};
use polars::prelude::*;
use std::path::Path;

/// CSV 讀取器配置
#[derive(Debug, Clone)]
pub struct CsvReaderConfig {
    /// 分隔符
    pub separator: u8,
    /// 推斷型別所用的行數，0 表示全部欄位讀為字串
    pub infer_schema_length: Option<usize>,
}

impl Default for CsvReaderConfig {
    fn default() -> Self {
        Self {
            separator: b',',
            // 數值欄位的強制轉換由解析器負責，讀取時不做型別推斷
            infer_schema_length: Some(0),
        }
    }
}

/// CSV 檔案讀取器，第一行固定為標題行
#[derive(Debug, Clone, Default)]
pub struct CsvReader {
    config: CsvReaderConfig,
}

impl CsvReader {
    pub fn new(config: CsvReaderConfig) -> Self {
        Self { config }
    }

    fn options(&self) -> CsvReadOptions {
        CsvReadOptions::default()
            .with_has_header(true)
            .with_parse_options(CsvParseOptions::default().with_separator(self.config.separator))
            .with_infer_schema_length(self.config.infer_schema_length)
    }

    /// 從檔案路徑讀取 CSV
    pub fn read_file<P: AsRef<Path>>(&self, path: P) -> CsvResult<DataFrame> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(CsvError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("檔案不存在: {}", path.display()),
            )));
        }

        let df = self
            .options()
            .try_into_reader_with_file_path(Some(path.into()))?
            .finish()?;

        Ok(df)
    }

    #[cfg(test)]
    pub(crate) fn read_string(&self, data: &str) -> CsvResult<DataFrame> {
        let cursor = std::io::Cursor::new(data.as_bytes().to_vec());
        let df = self.options().into_reader_with_file_handle(cursor).finish()?;

        Ok(df)
    }
}
