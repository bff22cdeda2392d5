//! Numeric coercion for duration cells.

use contract_model::{CellValue, FieldWarning};

/// Upper bound for contract terms; longer values are capped.
pub const MAX_DURATION_MONTHS: u32 = 12_000;

/// Parses a string as i64, returning None for invalid or empty strings.
pub fn parse_i64(value: &str) -> Option<i64> {
    if value.trim().is_empty() {
        return None;
    }
    value.trim().parse::<i64>().ok()
}

/// Parses a string as f64, returning None for invalid, empty or non-finite values.
pub fn parse_f64(value: &str) -> Option<f64> {
    if value.trim().is_empty() {
        return None;
    }
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Reads the leading integer of a string such as `"12 Monate"`.
pub fn parse_leading_int(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let digits_start = usize::from(trimmed.starts_with(['-', '+']));
    let digits_len = trimmed[digits_start..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits_len == 0 {
        return None;
    }
    trimmed[..digits_start + digits_len].parse().ok()
}

fn truncate(value: f64) -> i64 {
    // `as` saturates at the i64 bounds.
    value.trunc() as i64
}

/// Best-effort integer reading of a cell.
///
/// Numbers are truncated toward zero; text tries an integer, a decimal, then
/// a leading integer prefix.
pub fn coerce_integer(cell: &CellValue) -> Option<i64> {
    match cell {
        CellValue::Number(value) if value.is_finite() => Some(truncate(*value)),
        CellValue::Text(text) => parse_i64(text)
            .or_else(|| parse_f64(text).map(truncate))
            .or_else(|| parse_leading_int(text)),
        _ => None,
    }
}

/// Duration in months after coercion and clamping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoercedDuration {
    pub months: u32,
    pub warning: Option<FieldWarning>,
}

/// Coerces a duration cell to a non-negative month count.
///
/// Missing cells give 0 silently; unreadable values give 0 with a warning;
/// negative values clamp to 0 and values above [`MAX_DURATION_MONTHS`] are capped.
pub fn coerce_duration_months(cell: &CellValue) -> CoercedDuration {
    if cell.is_blank() {
        return CoercedDuration {
            months: 0,
            warning: None,
        };
    }
    let Some(value) = coerce_integer(cell) else {
        return CoercedDuration {
            months: 0,
            warning: Some(FieldWarning::InvalidDuration {
                value: cell.display_text().unwrap_or_default(),
            }),
        };
    };
    if value < 0 {
        return CoercedDuration {
            months: 0,
            warning: Some(FieldWarning::NegativeDurationClamped { value }),
        };
    }
    match u32::try_from(value) {
        Ok(months) if months <= MAX_DURATION_MONTHS => CoercedDuration {
            months,
            warning: None,
        },
        _ => CoercedDuration {
            months: MAX_DURATION_MONTHS,
            warning: Some(FieldWarning::DurationCapped {
                value,
                max: MAX_DURATION_MONTHS,
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn months(cell: CellValue) -> u32 {
        coerce_duration_months(&cell).months
    }

    #[test]
    fn numbers_truncate_toward_zero() {
        assert_eq!(months(CellValue::Number(12.0)), 12);
        assert_eq!(months(CellValue::Number(12.9)), 12);
        assert_eq!(months(CellValue::Number(f64::NAN)), 0);
    }

    #[test]
    fn text_is_parsed_leniently() {
        assert_eq!(months("24".into()), 24);
        assert_eq!(months(" 6.5 ".into()), 6);
        assert_eq!(months("12 Monate".into()), 12);
        assert_eq!(months("zwölf".into()), 0);
    }

    #[test]
    fn negative_values_clamp_to_zero() {
        let coerced = coerce_duration_months(&CellValue::Number(-5.0));
        assert_eq!(coerced.months, 0);
        assert_eq!(
            coerced.warning,
            Some(FieldWarning::NegativeDurationClamped { value: -5 })
        );
        assert_eq!(months("-3".into()), 0);
    }

    #[test]
    fn huge_values_are_capped() {
        let coerced = coerce_duration_months(&CellValue::Number(1e12));
        assert_eq!(coerced.months, MAX_DURATION_MONTHS);
        assert!(matches!(
            coerced.warning,
            Some(FieldWarning::DurationCapped { .. })
        ));
    }

    #[test]
    fn non_numeric_cells_default_to_zero() {
        assert_eq!(coerce_duration_months(&CellValue::Missing).warning, None);
        assert_eq!(months(CellValue::Boolean(true)), 0);
        assert_eq!(
            coerce_duration_months(&"abc".into()).warning,
            Some(FieldWarning::InvalidDuration {
                value: "abc".to_string()
            })
        );
    }

    #[test]
    fn leading_int_prefix() {
        assert_eq!(parse_leading_int("-4 months"), Some(-4));
        assert_eq!(parse_leading_int("months"), None);
        assert_eq!(parse_leading_int("+7"), Some(7));
    }
}
