#![allow(dead_code)]

use std::path::{Path, PathBuf};

use tempfile::TempDir;
use trader_sentiment::config::DataConfig;

pub const SENTIMENT_HEADER: &str = "timestamp,value,classification,date";
pub const TRADES_HEADER: &str =
    "Account,Coin,Execution Price,Size Tokens,Size USD,Side,Timestamp IST,Closed PnL";

/// 寫入暫存目錄的一組 CSV 測試資料
pub struct Fixture {
    pub dir: TempDir,
    pub sentiment_path: PathBuf,
    pub trades_path: PathBuf,
}

impl Fixture {
    /// `sentiment` 為 (日期, 分類)，`trades` 為 (帳戶, 時間戳, 方向, PnL, Size USD) 原始字串
    pub fn new(sentiment: &[(&str, &str)], trades: &[(&str, &str, &str, &str, &str)]) -> Self {
        let dir = tempfile::tempdir().expect("無法建立暫存目錄");

        let mut sentiment_csv = format!("{}\n", SENTIMENT_HEADER);
        for (i, (date, classification)) in sentiment.iter().enumerate() {
            sentiment_csv.push_str(&format!("{},{},{},{}\n", 1_700_000_000 + i, 50, classification, date));
        }

        let mut trades_csv = format!("{}\n", TRADES_HEADER);
        for (account, timestamp, side, pnl, size) in trades {
            trades_csv.push_str(&format!(
                "{},BTC,100.0,1.0,{},{},{},{}\n",
                account, size, side, timestamp, pnl
            ));
        }

        let sentiment_path = dir.path().join("fear_greed_index.csv");
        let trades_path = dir.path().join("historical_data.csv");
        std::fs::write(&sentiment_path, sentiment_csv).expect("無法寫入情緒資料");
        std::fs::write(&trades_path, trades_csv).expect("無法寫入交易資料");

        Self {
            dir,
            sentiment_path,
            trades_path,
        }
    }

    pub fn data_config(&self) -> DataConfig {
        DataConfig {
            sentiment_path: path_string(&self.sentiment_path),
            trades_path: path_string(&self.trades_path),
            ..DataConfig::default()
        }
    }
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// 兩筆交易分別落在 Extreme Greed 與 Fear 日的最小資料集
pub fn example_fixture() -> Fixture {
    Fixture::new(
        &[("2024-01-01", "Extreme Greed"), ("2024-01-02", "Fear")],
        &[
            ("A", "01-01-2024 10:00", "BUY", "100", "500"),
            ("A", "02-01-2024 11:30", "sell", "-150", "500"),
        ],
    )
}

/// 多帳戶、跨 Fear/Greed 的資料集，含一筆無情緒覆蓋的交易與一筆無法解析的 PnL
pub fn mixed_fixture() -> Fixture {
    Fixture::new(
        &[
            ("2024-03-01", "Fear"),
            ("2024-03-02", "Extreme Fear"),
            ("2024-03-03", "Neutral"),
            ("2024-03-04", "Greed"),
            ("2024-03-05", "Extreme Greed"),
        ],
        &[
            ("0xAAA1", "01-03-2024 09:00", "BUY", "120.5", "1000"),
            ("0xAAA1", "01-03-2024 09:30", "SELL", "-20", "1000"),
            ("0xAAA1", "04-03-2024 14:00", "BUY", "60", "2000"),
            ("0xBBB2", "02-03-2024 08:00", "SELL", "-300", "5000"),
            ("0xBBB2", "05-03-2024 16:45", "BUY", "450", "5000"),
            ("0xBBB2", "05-03-2024 17:00", "SELL", "N/A", "5000"),
            ("0xCCC3", "03-03-2024 12:00", "BUY", "5", "200"),
            ("0xCCC3", "04-03-2024 12:00", "BUY", "5", "200"),
            ("0xCCC3", "05-03-2024 12:00", "SELL", "-1", "200"),
            ("0xDDD4", "04-03-2024 10:00", "BUY", "80", "1500"),
            ("0xDDD4", "10-03-2024 10:00", "SELL", "999", "1500"),
        ],
    )
}
