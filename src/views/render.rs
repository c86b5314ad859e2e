//! 文字輸出
//!
//! 固定寬度表格，數值四捨五入至小數三位（僅影響顯示）。

use super::histogram::SentimentDistribution;
use super::lookup::TraderDetail;
use super::overview::Overview;
use super::rules::StrategyRules;
use super::segments::SegmentTable;
use crate::domain_types::Sentiment;

/// 未定義的值顯示為 "-"
pub fn fmt_value(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.3}", v),
        None => "-".to_string(),
    }
}

/// 簡單的固定寬度表格
#[derive(Debug, Clone, Default)]
pub struct TextTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TextTable {
    pub fn new<S: Into<String>>(headers: impl IntoIterator<Item = S>) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row<S: Into<String>>(&mut self, row: impl IntoIterator<Item = S>) {
        self.rows.push(row.into_iter().map(Into::into).collect());
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn render(&self) -> String {
        let columns = self.headers.len();
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate().take(columns) {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }

        let line = |cells: &[String]| {
            let padded: Vec<String> = cells
                .iter()
                .zip(&widths)
                .enumerate()
                .map(|(i, (cell, &w))| {
                    // 第一欄靠左，其餘靠右
                    if i == 0 {
                        format!("{:<w$}", cell, w = w)
                    } else {
                        format!("{:>w$}", cell, w = w)
                    }
                })
                .collect();
            padded.join("  ").trim_end().to_string()
        };

        let mut output = String::new();
        output.push_str(&line(&self.headers));
        output.push('\n');
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        output.push_str(&rule.join("  "));
        output.push('\n');
        for row in &self.rows {
            output.push_str(&line(row));
            output.push('\n');
        }
        output
    }
}

pub fn overview_text(overview: &Overview) -> String {
    let mut output = String::new();
    output.push_str("=== 總覽 ===\n");
    output.push_str(&format!("帳戶 × 日總數: {}\n", overview.total_trader_days));
    output.push_str(&format!("不重複帳戶: {}\n", overview.unique_traders));
    output.push_str(&format!("Fear 天數: {}\n", overview.fear_days));
    output.push_str(&format!("Greed 天數: {}\n\n", overview.greed_days));

    let mut table = TextTable::new(["sentiment", "median_pnl", "win_rate", "pnl_std", "avg_trades"]);
    for s in &overview.summary {
        table.push_row([
            s.sentiment.to_string(),
            fmt_value(s.median_pnl),
            fmt_value(s.win_rate),
            fmt_value(s.pnl_std),
            fmt_value(s.avg_trades),
        ]);
    }
    output.push_str(&table.render());
    output
}

pub fn distribution_text(distributions: &[SentimentDistribution]) -> String {
    let mut output = String::from("\n=== 每日 PnL 分佈 ===\n");
    for dist in distributions {
        output.push_str(&format!(
            "{} (截尾範圍 {} .. {}, {} 筆)\n",
            dist.sentiment,
            fmt_value(Some(dist.clip_low)),
            fmt_value(Some(dist.clip_high)),
            dist.histogram.total()
        ));
        let peak = dist.histogram.counts.iter().copied().max().unwrap_or(0).max(1);
        for (i, count) in dist.histogram.counts.iter().enumerate() {
            if *count == 0 {
                continue;
            }
            let bar = "#".repeat((count * 40).div_ceil(peak));
            output.push_str(&format!(
                "  {:>12} {:>6} {}\n",
                fmt_value(Some(dist.histogram.edges[i])),
                count,
                bar
            ));
        }
    }
    output
}

/// 樞紐格式：每個指標各一組 Fear/Greed 欄位
pub fn segments_text(table: &SegmentTable) -> String {
    let mut output = format!("=== {} × sentiment ===\n", table.axis.title());

    let mut headers = vec![table.axis.column().to_string()];
    for metric in ["median_pnl", "win_rate", "pnl_std", "n_traders"] {
        for sentiment in Sentiment::ALL {
            headers.push(format!("{}[{}]", metric, sentiment));
        }
    }
    let mut text = TextTable::new(headers);

    for tier in table.tiers() {
        let mut row = vec![tier.to_string()];
        let cells: Vec<_> = Sentiment::ALL.iter().map(|s| table.cell(tier, *s)).collect();
        row.extend(cells.iter().map(|c| fmt_value(c.and_then(|c| c.median_pnl))));
        row.extend(cells.iter().map(|c| fmt_value(c.and_then(|c| c.win_rate))));
        row.extend(cells.iter().map(|c| fmt_value(c.and_then(|c| c.pnl_std))));
        row.extend(
            cells
                .iter()
                .map(|c| c.map(|c| c.n_traders.to_string()).unwrap_or_else(|| "-".to_string())),
        );
        text.push_row(row);
    }

    output.push_str(&text.render());
    output
}

pub fn matches_text(query: &str, matches: &[&str]) -> String {
    if matches.is_empty() {
        return format!("找不到符合 \"{}\" 的帳戶\n", query);
    }
    let mut output = format!("符合 \"{}\" 的帳戶 ({}):\n", query, matches.len());
    for (i, account) in matches.iter().enumerate() {
        output.push_str(&format!("  [{}] {}\n", i, account));
    }
    output
}

pub fn detail_text(detail: &TraderDetail) -> String {
    let p = &detail.profile;
    let mut output = format!("=== {} ===\n", p.account);

    let mut table = TextTable::new(["metric", "value"]);
    table.push_row(["total_pnl".to_string(), fmt_value(Some(p.total_pnl))]);
    table.push_row(["winrate".to_string(), fmt_value(Some(p.winrate))]);
    table.push_row(["avg_leverage".to_string(), fmt_value(Some(p.avg_leverage))]);
    table.push_row(["max_drawdown".to_string(), fmt_value(Some(p.max_drawdown))]);
    table.push_row(["total_trades".to_string(), p.total_trades.to_string()]);
    table.push_row(["active_days".to_string(), p.active_days.to_string()]);
    table.push_row(["trades_per_day".to_string(), fmt_value(Some(p.trades_per_day))]);
    table.push_row(["avg_trade_size".to_string(), fmt_value(Some(p.avg_trade_size))]);
    table.push_row(["pnl_volatility".to_string(), fmt_value(p.pnl_volatility)]);
    table.push_row(["lev_tier".to_string(), p.lev_tier.to_string()]);
    table.push_row(["freq_tier".to_string(), p.freq_tier.to_string()]);
    table.push_row(["winner_tier".to_string(), p.winner_tier.to_string()]);
    output.push_str(&table.render());

    output.push_str("\n每日 PnL:\n");
    let mut daily = TextTable::new(["date", "sentiment", "daily_pnl", ""]);
    for point in &detail.daily {
        daily.push_row([
            point.date.to_string(),
            point.sentiment.to_string(),
            fmt_value(Some(point.daily_pnl)),
            if point.gain { "+" } else { "-" }.to_string(),
        ]);
    }
    output.push_str(&daily.render());
    output
}

pub fn rules_text(rules: &StrategyRules) -> String {
    let mut output = String::from("=== 策略規則 ===\n\n");

    output.push_str("規則 1: Fear 期間的槓桿上限\n");
    output.push_str("  條件: sentiment = Fear 且 lev_tier = High Leverage\n");
    output.push_str(&format!(
        "  動作: 槓桿上限 {} (Low Leverage 帳戶平均槓桿中位數)\n\n",
        fmt_value(rules.leverage_cap)
    ));

    output.push_str("規則 2: Fear 期間的交易頻率限制\n");
    output.push_str("  條件: sentiment = Fear 且 freq_tier = Low Frequency\n");
    output.push_str(&format!(
        "  動作: 每日交易數上限 {} (Low Frequency 帳戶每日交易數中位數)\n\n",
        fmt_value(rules.frequency_cap)
    ));

    output.push_str("佐證:\n");
    output.push_str(&segments_text(&rules.leverage_evidence));
    output.push('\n');
    output.push_str(&segments_text(&rules.frequency_evidence));
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_value() {
        assert_eq!(fmt_value(Some(1.23456)), "1.235");
        assert_eq!(fmt_value(Some(-150.0)), "-150.000");
        assert_eq!(fmt_value(None), "-");
    }

    #[test]
    fn test_table_alignment() {
        let mut table = TextTable::new(["name", "value"]);
        table.push_row(["alpha", "1.000"]);
        table.push_row(["b", "10.500"]);
        let rendered = table.render();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "name    value");
        assert_eq!(lines[1], "-----  ------");
        assert_eq!(lines[2], "alpha   1.000");
        assert_eq!(lines[3], "b      10.500");
    }

    #[test]
    fn test_matches_text() {
        assert!(matches_text("0x1", &[]).contains("找不到"));
        let text = matches_text("0x1", &["0x123", "0x1ab"]);
        assert!(text.contains("[1] 0x1ab"));
    }
}
