use thiserror::Error;

use crate::config::ValidationError;
use crate::data_ingestion::CsvError;

/// 分析管線錯誤類型
#[derive(Error, Debug)]
pub enum PipelineError {
    /// 資料格式錯誤（缺欄位、日期無法解析等）
    #[error("資料格式錯誤: {0}")]
    DataFormat(#[from] CsvError),

    /// 配置錯誤
    #[error("配置錯誤: {0}")]
    Config(#[from] ValidationError),

    /// 資料來源沒有任何資料列
    #[error("資料來源為空: {0}")]
    EmptyInput(String),

    /// 輸出寫入錯誤
    #[error("輸出錯誤: {0}")]
    Export(String),
}

/// 管線結果類型別名
pub type PipelineResult<T> = Result<T, PipelineError>;
