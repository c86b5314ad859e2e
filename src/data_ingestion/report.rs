use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 詳細警告最多保留的筆數
const MAX_DETAILED_WARNINGS: usize = 20;

/// 非致命的列級異常類型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WarningKind {
    /// 數值欄位無法解析，強制轉為 0
    ValueCoercion,
    /// 交易方向不是 BUY/SELL
    UnknownSide,
    /// 帳戶欄位為空，該筆交易不參與任何彙總
    MissingAccount,
    /// 情緒分類為空，視為 Fear
    MissingClassification,
}

/// 詳細警告資訊
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestionWarning {
    /// 原始檔案行號（含標題行）
    pub line: usize,
    pub kind: WarningKind,
    pub column: String,
    pub raw_value: Option<String>,
}

/// 攝取報告：記錄列級異常與 join 覆蓋率
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestionReport {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub sentiment_rows: usize,
    pub trade_rows: usize,
    pub pnl_coerced: usize,
    pub size_coerced: usize,
    pub unknown_side: usize,
    pub missing_account: usize,
    pub missing_classification: usize,
    /// 日期有情緒覆蓋的交易數
    pub trades_joined: usize,
    /// 日期沒有情緒覆蓋而被捨棄的交易數
    pub trades_unmatched: usize,
    pub warnings: Vec<IngestionWarning>,
}

impl Default for IngestionReport {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            start_time: now,
            end_time: now,
            sentiment_rows: 0,
            trade_rows: 0,
            pnl_coerced: 0,
            size_coerced: 0,
            unknown_side: 0,
            missing_account: 0,
            missing_classification: 0,
            trades_joined: 0,
            trades_unmatched: 0,
            warnings: Vec::new(),
        }
    }
}

impl IngestionReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// 完成報告
    pub fn finish(mut self) -> Self {
        self.end_time = Utc::now();
        self
    }

    /// 記錄一筆警告並更新對應計數
    pub fn add_warning(
        &mut self,
        line: usize,
        kind: WarningKind,
        column: &str,
        raw_value: Option<&str>,
    ) {
        match kind {
            WarningKind::ValueCoercion => {}
            WarningKind::UnknownSide => self.unknown_side += 1,
            WarningKind::MissingAccount => self.missing_account += 1,
            WarningKind::MissingClassification => self.missing_classification += 1,
        }

        if self.warnings.len() < MAX_DETAILED_WARNINGS {
            self.warnings.push(IngestionWarning {
                line,
                kind,
                column: column.to_string(),
                raw_value: raw_value.map(str::to_string),
            });
        }
    }

    pub fn record_pnl_coercion(&mut self, line: usize, column: &str, raw_value: Option<&str>) {
        self.pnl_coerced += 1;
        self.add_warning(line, WarningKind::ValueCoercion, column, raw_value);
    }

    pub fn record_size_coercion(&mut self, line: usize, column: &str, raw_value: Option<&str>) {
        self.size_coerced += 1;
        self.add_warning(line, WarningKind::ValueCoercion, column, raw_value);
    }

    /// 總警告數（不受詳細記錄上限影響）
    pub fn warning_count(&self) -> usize {
        self.pnl_coerced
            + self.size_coerced
            + self.unknown_side
            + self.missing_account
            + self.missing_classification
    }

    /// 有情緒覆蓋的交易比例
    pub fn join_coverage(&self) -> f64 {
        let total = self.trades_joined + self.trades_unmatched;
        if total == 0 {
            0.0
        } else {
            self.trades_joined as f64 / total as f64
        }
    }

    /// 獲取處理時間（秒）
    pub fn processing_time(&self) -> f64 {
        (self.end_time - self.start_time).num_milliseconds() as f64 / 1000.0
    }
}

/// 報告格式化器
pub struct ReportFormatter;

impl ReportFormatter {
    /// 格式化為人類可讀的文字
    pub fn format_text(report: &IngestionReport) -> String {
        let mut output = String::new();

        output.push_str("=== 資料攝取報告 ===\n");
        output.push_str(&format!("處理時間: {:.2} 秒\n\n", report.processing_time()));

        output.push_str("統計摘要:\n");
        output.push_str(&format!("  情緒資料列數: {}\n", report.sentiment_rows));
        output.push_str(&format!("  交易資料列數: {}\n", report.trade_rows));
        output.push_str(&format!(
            "  已對上情緒的交易: {} ({:.2}%)\n",
            report.trades_joined,
            report.join_coverage() * 100.0
        ));
        output.push_str(&format!("  無情緒覆蓋而捨棄: {}\n\n", report.trades_unmatched));

        output.push_str("列級異常:\n");
        output.push_str(&format!("  PnL 強制轉為 0: {}\n", report.pnl_coerced));
        output.push_str(&format!("  Size USD 強制轉為 0: {}\n", report.size_coerced));
        output.push_str(&format!("  未知交易方向: {}\n", report.unknown_side));
        output.push_str(&format!("  缺少帳戶: {}\n", report.missing_account));
        output.push_str(&format!("  缺少情緒分類: {}\n", report.missing_classification));

        if !report.warnings.is_empty() {
            output.push_str("\n警告範例:\n");
            for warning in &report.warnings {
                output.push_str(&format!(
                    "  第 {} 行 [{:?}] {} = {:?}\n",
                    warning.line, warning.kind, warning.column, warning.raw_value
                ));
            }
        }

        output
    }

    /// 格式化為JSON
    pub fn format_json(report: &IngestionReport) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(report)
    }
}
