use serde::{Deserialize, Serialize};

/// 衍生指標無法定義時採用的後備行為紀錄
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DegenerateReport {
    /// 全體名目金額中位數為 0 或無交易，所有交易槓桿取下限
    pub median_size_zero: bool,
    /// 交易數少於 2、波動度未定義的帳戶數
    pub undefined_volatility: usize,
    /// 沒有任何帳戶的波動度有定義，波動度中位數不存在
    pub volatility_median_missing: bool,
}

impl DegenerateReport {
    pub fn is_clean(&self) -> bool {
        !self.median_size_zero && self.undefined_volatility == 0 && !self.volatility_median_missing
    }

    pub fn format_text(&self) -> String {
        let mut output = String::new();
        output.push_str("=== 退化輸入 ===\n");
        if self.is_clean() {
            output.push_str("  無，所有衍生指標皆有定義\n");
            return output;
        }
        output.push_str(&format!(
            "  名目金額中位數為 0: {}\n",
            if self.median_size_zero { "是" } else { "否" }
        ));
        output.push_str(&format!("  波動度未定義的帳戶: {}\n", self.undefined_volatility));
        output.push_str(&format!(
            "  波動度中位數缺失: {}\n",
            if self.volatility_median_missing { "是" } else { "否" }
        ));
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_by_default() {
        let clean = DegenerateReport::default();
        assert!(clean.is_clean());
        assert!(clean.format_text().contains("無，所有衍生指標皆有定義"));
        assert!(!clean.format_text().contains("波動度未定義的帳戶"));

        let report = DegenerateReport {
            undefined_volatility: 2,
            ..Default::default()
        };
        assert!(!report.is_clean());
        let text = report.format_text();
        assert!(text.contains("波動度未定義的帳戶: 2"));
        assert!(!text.contains("皆有定義"));
    }
}
