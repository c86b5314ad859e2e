// time_utils.rs
//
// 提供日期與時間戳字串解析的工具函數。
// 主要功能：
// 1. 解析情緒資料的日期欄位（年在前，數字日期為月在前）
// 2. 解析交易時間戳（日在前，如 "02-12-2024 22:50"）
// 3. 將時間戳截斷為日曆日

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// 情緒日期可接受的格式（僅日期），非 ISO 的數字日期一律月在前
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%m-%d-%Y"];

/// 情緒日期可接受的格式（含時間，截斷為日）
const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// 交易時間戳可接受的格式，日在前優先
const DAY_FIRST_TIMESTAMP_FORMATS: &[&str] = &[
    "%d-%m-%Y %H:%M",
    "%d-%m-%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
    "%d.%m.%Y %H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// 解析情緒日期字串
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATE_TIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

/// 解析交易時間戳字串
///
/// 指定 `format` 時只使用該格式；否則依序嘗試日在前的格式。帶時區偏移的
/// RFC 3339 字串保留其當地時鐘時間，所有時間戳因此在同一種解讀下截斷為日。
pub fn parse_timestamp(raw: &str, format: Option<&str>) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Some(fmt) = format {
        return NaiveDateTime::parse_from_str(raw, fmt)
            .ok()
            .or_else(|| NaiveDate::parse_from_str(raw, fmt).ok().and_then(|d| d.and_hms_opt(0, 0, 0)));
    }

    DAY_FIRST_TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.naive_local()))
        .or_else(|| {
            ["%d-%m-%Y", "%d/%m/%Y", "%Y-%m-%d"]
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// 將日期格式化為輸出表格使用的字串
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case("2018-02-01", ymd(2018, 2, 1))]
    #[case("2018/02/01", ymd(2018, 2, 1))]
    #[case(" 2024-01-02 ", ymd(2024, 1, 2))]
    #[case("2024-01-02 13:45:00", ymd(2024, 1, 2))]
    #[case("2024-01-02T23:59:59.250", ymd(2024, 1, 2))]
    #[case("01/02/2024", ymd(2024, 1, 2))]
    #[case("02-01-2024", ymd(2024, 2, 1))]
    #[case("12/31/2023", ymd(2023, 12, 31))]
    fn test_parse_date(#[case] raw: &str, #[case] expected: NaiveDate) {
        assert_eq!(parse_date(raw), Some(expected));
    }

    #[test]
    fn test_parse_date_invalid() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("yesterday"), None);
        assert_eq!(parse_date("2024-13-01"), None);
        // 情緒日期不接受日在前
        assert_eq!(parse_date("31/12/2023"), None);
    }

    #[rstest]
    #[case("02-12-2024 22:50", ymd(2024, 12, 2))]
    #[case("02-12-2024 22:50:13", ymd(2024, 12, 2))]
    #[case("02/12/2024 00:00", ymd(2024, 12, 2))]
    #[case("2024-12-02 22:50:00", ymd(2024, 12, 2))]
    #[case("2024-12-02T22:50:00+05:30", ymd(2024, 12, 2))]
    #[case("02-12-2024", ymd(2024, 12, 2))]
    fn test_parse_timestamp_day_first(#[case] raw: &str, #[case] expected: NaiveDate) {
        let ts = parse_timestamp(raw, None).unwrap();
        assert_eq!(ts.date(), expected);
    }

    #[test]
    fn test_parse_timestamp_keeps_clock_time() {
        let ts = parse_timestamp("02-12-2024 22:50", None).unwrap();
        assert_eq!(ts.format("%H:%M").to_string(), "22:50");
    }

    #[test]
    fn test_parse_timestamp_with_explicit_format() {
        let ts = parse_timestamp("12/02/2024 08:15", Some("%m/%d/%Y %H:%M")).unwrap();
        assert_eq!(ts.date(), ymd(2024, 12, 2));

        let day = parse_timestamp("2024.12.02", Some("%Y.%m.%d")).unwrap();
        assert_eq!(day.date(), ymd(2024, 12, 2));

        // 指定格式時不回退到其他格式
        assert!(parse_timestamp("02-12-2024 22:50", Some("%Y-%m-%d %H:%M")).is_none());
    }

    #[test]
    fn test_parse_timestamp_invalid() {
        assert!(parse_timestamp("", None).is_none());
        assert!(parse_timestamp("not a time", None).is_none());
        assert!(parse_timestamp("32-01-2024 10:00", None).is_none());
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(ymd(2024, 1, 5)), "2024-01-05");
    }
}
