use thiserror::Error;

/// 配置驗證錯誤
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("缺少必要配置項: {0}")]
    MissingField(String),

    #[error("無效的配置值: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("配置範圍錯誤: {field} 的值 {value} 必須落在 {bounds}")]
    RangeError {
        field: String,
        value: String,
        bounds: String,
    },

    #[error("依賴錯誤: {dependent} 依賴於 {dependency} 的配置")]
    DependencyError {
        dependent: String,
        dependency: String,
    },
}

impl ValidationError {
    fn invalid(field: &str, value: impl ToString, reason: &str) -> Self {
        ValidationError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    fn range(field: &str, value: impl ToString, bounds: &str) -> Self {
        ValidationError::RangeError {
            field: field.to_string(),
            value: value.to_string(),
            bounds: bounds.to_string(),
        }
    }
}

/// 配置驗證器trait
pub trait Validator {
    /// 驗證配置
    fn validate(&self) -> Result<(), ValidationError>;
}

/// 驗證配置區段
pub fn validate_config<T: Validator>(config: &T) -> Result<(), ValidationError> {
    config.validate()
}

/// 各配置區段共用的檢查
pub struct ValidationUtils;

impl ValidationUtils {
    /// 欄位名稱、路徑等字串不可為空白
    pub fn not_empty(value: &str, field_name: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::MissingField(field_name.to_string()));
        }
        Ok(())
    }

    /// 不分大小寫比對固定的關鍵字集合
    pub fn keyword(value: &str, allowed: &[&str], field_name: &str) -> Result<(), ValidationError> {
        if allowed.iter().any(|k| k.eq_ignore_ascii_case(value.trim())) {
            return Ok(());
        }
        Err(ValidationError::invalid(
            field_name,
            value,
            &format!("可用值: {}", allowed.join(" / ")),
        ))
    }

    /// 分層分位數：0 < lower < upper < 1，NaN 一律無效
    pub fn quantile_pair(lower: f64, upper: f64) -> Result<(), ValidationError> {
        if !(lower > 0.0 && lower < 1.0) {
            return Err(ValidationError::range("analysis.lower_quantile", lower, "(0, 1)"));
        }
        if !(upper > 0.0 && upper < 1.0) {
            return Err(ValidationError::range("analysis.upper_quantile", upper, "(0, 1)"));
        }
        if upper <= lower {
            return Err(ValidationError::invalid(
                "analysis.upper_quantile",
                upper,
                &format!("必須大於 analysis.lower_quantile ({})", lower),
            ));
        }
        Ok(())
    }

    /// 槓桿上下限：1 <= min <= max
    pub fn leverage_range(min: u32, max: u32) -> Result<(), ValidationError> {
        if min < 1 {
            return Err(ValidationError::range("analysis.min_leverage", min, ">= 1"));
        }
        if max < min {
            return Err(ValidationError::range(
                "analysis.max_leverage",
                max,
                &format!(">= analysis.min_leverage ({})", min),
            ));
        }
        Ok(())
    }

    /// 直方圖設定：箱數至少 1，兩端截尾比例落在 [0, 0.5)
    pub fn histogram(bins: usize, clip: f64) -> Result<(), ValidationError> {
        if bins == 0 {
            return Err(ValidationError::range("analysis.histogram_bins", bins, ">= 1"));
        }
        if !(0.0..0.5).contains(&clip) {
            return Err(ValidationError::range("analysis.histogram_clip", clip, "[0, 0.5)"));
        }
        Ok(())
    }

    /// CSV 分隔符需為單一 ASCII 字元
    pub fn ascii_separator(separator: char) -> Result<(), ValidationError> {
        if !separator.is_ascii() {
            return Err(ValidationError::invalid(
                "data.separator",
                format!("{:?}", separator),
                "必須是 ASCII 字元",
            ));
        }
        Ok(())
    }

    /// `dependent` 有設定時 `dependency` 也必須設定
    pub fn check_dependency(
        has_dependent: bool,
        has_dependency: bool,
        dependent_name: &str,
        dependency_name: &str,
    ) -> Result<(), ValidationError> {
        if has_dependent && !has_dependency {
            return Err(ValidationError::DependencyError {
                dependent: dependent_name.to_string(),
                dependency: dependency_name.to_string(),
            });
        }
        Ok(())
    }
}
