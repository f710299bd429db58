//! Column extraction and numeric coercion.
//!
//! Cells that are empty or not numeric become `None`. They are never replaced
//! by a default number, so "no data" stays distinguishable from zero.

use polars::prelude::*;

use crate::error::{IngestError, Result};

/// Parses a numeric string, returning `None` for empty, non-numeric or
/// non-finite input.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parses an integer string. Integral decimals such as `"1990.0"` are accepted.
pub fn parse_i64(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(parsed) = trimmed.parse::<i64>() {
        return Some(parsed);
    }
    let float = parse_f64(trimmed)?;
    if float.fract() == 0.0 && float.abs() < i64::MAX as f64 {
        Some(float as i64)
    } else {
        None
    }
}

fn column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    df.column(name).map_err(|_| IngestError::ColumnNotFound {
        column: name.to_string(),
    })
}

/// Trimmed text values of a column; blank cells become `None`.
pub fn string_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let casted = column(df, name)?.cast(&DataType::String)?;
    let values = casted
        .str()?
        .into_iter()
        .map(|value| {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(ToString::to_string)
        })
        .collect();
    Ok(values)
}

/// Numeric values of a column, coercing non-numeric cells to `None`.
pub fn f64_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    Ok(string_values(df, name)?
        .into_iter()
        .map(|value| value.as_deref().and_then(parse_f64))
        .collect())
}

/// Integer values of a column, coercing non-integer cells to `None`.
pub fn i64_values(df: &DataFrame, name: &str) -> Result<Vec<Option<i64>>> {
    Ok(string_values(df, name)?
        .into_iter()
        .map(|value| value.as_deref().and_then(parse_i64))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_f64_coerces_junk_to_none() {
        assert_eq!(parse_f64(" 12.5 "), Some(12.5));
        assert_eq!(parse_f64("0"), Some(0.0));
        assert_eq!(parse_f64(""), None);
        assert_eq!(parse_f64("n/a"), None);
        assert_eq!(parse_f64("NaN"), None);
        assert_eq!(parse_f64("inf"), None);
    }

    #[test]
    fn parse_i64_accepts_integral_decimals() {
        assert_eq!(parse_i64("1990"), Some(1990));
        assert_eq!(parse_i64("1990.0"), Some(1990));
        assert_eq!(parse_i64("1990.5"), None);
        assert_eq!(parse_i64("year"), None);
    }

    #[test]
    fn extracts_columns_with_missing_cells() {
        let df = DataFrame::new(vec![
            Column::new("v".into(), ["1", " ", "x", "2.5"]),
            Column::new("n".into(), [Some("a"), None, Some(" b "), Some("")]),
        ])
        .unwrap();

        assert_eq!(
            f64_values(&df, "v").unwrap(),
            vec![Some(1.0), None, None, Some(2.5)]
        );
        assert_eq!(
            string_values(&df, "n").unwrap(),
            vec![Some("a".to_string()), None, Some("b".to_string()), None]
        );
        assert!(matches!(
            string_values(&df, "missing"),
            Err(IngestError::ColumnNotFound { .. })
        ));
    }
}
