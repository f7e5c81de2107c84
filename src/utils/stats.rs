// Numeric helpers shared by the outlier and scaling steps.

use serde_json::{Number, Value};

use crate::data_model::Table;

/// Indices of columns whose non-null cells are all numbers (and that have at
/// least one such cell).
pub fn numeric_columns(table: &Table) -> Vec<usize> {
    (0..table.num_columns())
        .filter(|&idx| {
            let mut seen_number = false;
            for row in &table.rows {
                match &row[idx] {
                    Value::Null => {}
                    Value::Number(_) => seen_number = true,
                    _ => return false,
                }
            }
            seen_number
        })
        .collect()
}

/// Non-null values of one column as f64.
pub fn column_f64(table: &Table, idx: usize) -> Vec<f64> {
    table.rows.iter().filter_map(|row| row[idx].as_f64()).collect()
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Standard deviation with `ddof` delta degrees of freedom (1 = sample,
/// 0 = population). `None` when there are not enough values.
pub fn std_dev(values: &[f64], ddof: usize) -> Option<f64> {
    if values.len() <= ddof {
        return None;
    }
    let m = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some((sum_sq / (values.len() - ddof) as f64).sqrt())
}

/// Quantile with linear interpolation between closest ranks. `sorted` must
/// be in ascending order.
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=1.0).contains(&q) {
        return None;
    }
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64))
}

/// Wraps a float as a JSON number; NaN and infinities become null.
pub fn number(value: f64) -> Value {
    Number::from_f64(value).map(Value::Number).unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mean_and_std() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(mean(&values), Some(5.0));
        assert_eq!(std_dev(&values, 0), Some(2.0));
        assert!((std_dev(&values, 1).unwrap() - 2.138_089_935).abs() < 1e-6);
        assert_eq!(std_dev(&[1.0], 1), None);
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn test_quantile_interpolates() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&sorted, 0.0), Some(1.0));
        assert_eq!(quantile(&sorted, 0.25), Some(1.75));
        assert_eq!(quantile(&sorted, 0.5), Some(2.5));
        assert_eq!(quantile(&sorted, 1.0), Some(4.0));
        assert_eq!(quantile(&sorted, 1.5), None);
    }

    #[test]
    fn test_numeric_columns_skip_mixed_and_all_null() {
        let table = Table::from_rows(
            vec!["n".into(), "s".into(), "mixed".into(), "empty".into()],
            vec![
                vec![json!(1), json!("a"), json!(1), Value::Null],
                vec![Value::Null, json!("b"), json!("x"), Value::Null],
                vec![json!(2.5), json!("c"), json!(2), Value::Null],
            ],
        )
        .unwrap();
        assert_eq!(numeric_columns(&table), vec![0]);
        assert_eq!(column_f64(&table, 0), vec![1.0, 2.5]);
    }

    #[test]
    fn test_number_rejects_nan() {
        assert_eq!(number(f64::NAN), Value::Null);
        assert_eq!(number(1.5), json!(1.5));
    }
}
