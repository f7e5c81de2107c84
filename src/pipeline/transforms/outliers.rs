use serde::Deserialize;
use tracing::debug;

use crate::args::StepArgs;
use crate::data_model::Table;
use crate::error::{PipelineError, Result};
use crate::executor::PipelineStep;
use crate::pipeline::require_input;
use crate::utils::stats::{column_f64, mean, numeric_columns, quantile, std_dev};

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct ZScoreParams {
    #[serde(default = "default_method")]
    method: String,
    #[serde(default = "default_z_thresh")]
    z_thresh: f64,
}

fn default_method() -> String {
    "remove".to_string()
}

fn default_z_thresh() -> f64 {
    3.0
}

/// Drops rows where any numeric column has `|z| >= z_thresh`.
///
/// z uses the sample standard deviation. Null cells and zero-variance
/// columns never mark a row as an outlier, even though a NaN-based
/// `z < z_thresh` test would drop those rows; keep it that way.
#[derive(Debug, Default, Clone, Copy)]
pub struct HandleOutliersZScore;

impl PipelineStep for HandleOutliersZScore {
    fn name(&self) -> &str {
        "HandleOutliersZScore"
    }

    fn process(&self, data: Option<Table>, args: &StepArgs) -> Result<Table> {
        let params: ZScoreParams = args.parse(self.name())?;
        if params.method != "remove" {
            return Err(PipelineError::argument(
                self.name(),
                format!("Unsupported method: {}", params.method),
            ));
        }
        let mut table = require_input(self.name(), data)?;

        // (column, mean, std) for columns where a z-score is defined
        let moments: Vec<(usize, f64, f64)> = numeric_columns(&table)
            .into_iter()
            .filter_map(|idx| {
                let values = column_f64(&table, idx);
                let m = mean(&values)?;
                let s = std_dev(&values, 1)?;
                (s > 0.0).then_some((idx, m, s))
            })
            .collect();

        let before = table.num_rows();
        table.retain_rows(|row| {
            moments.iter().all(|&(idx, m, s)| match row[idx].as_f64() {
                Some(v) => ((v - m) / s).abs() < params.z_thresh,
                None => true,
            })
        });
        debug!(
            removed = before - table.num_rows(),
            z_thresh = params.z_thresh,
            "Removed z-score outliers"
        );
        Ok(table)
    }
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct IqrParams {
    #[serde(default = "default_iqr_factor")]
    iqr_factor: f64,
}

fn default_iqr_factor() -> f64 {
    1.5
}

/// Drops rows where any numeric column falls outside
/// `[Q1 - k*IQR, Q3 + k*IQR]`. Quantiles interpolate linearly.
#[derive(Debug, Default, Clone, Copy)]
pub struct HandleOutliersIQR;

impl PipelineStep for HandleOutliersIQR {
    fn name(&self) -> &str {
        "HandleOutliersIQR"
    }

    fn process(&self, data: Option<Table>, args: &StepArgs) -> Result<Table> {
        let params: IqrParams = args.parse(self.name())?;
        let mut table = require_input(self.name(), data)?;

        let bounds: Vec<(usize, f64, f64)> = numeric_columns(&table)
            .into_iter()
            .filter_map(|idx| {
                let mut values = column_f64(&table, idx);
                values.sort_by(f64::total_cmp);
                let q1 = quantile(&values, 0.25)?;
                let q3 = quantile(&values, 0.75)?;
                let iqr = q3 - q1;
                Some((idx, q1 - params.iqr_factor * iqr, q3 + params.iqr_factor * iqr))
            })
            .collect();

        let before = table.num_rows();
        table.retain_rows(|row| {
            bounds.iter().all(|&(idx, lower, upper)| match row[idx].as_f64() {
                Some(v) => v >= lower && v <= upper,
                None => true,
            })
        });
        debug!(
            removed = before - table.num_rows(),
            iqr_factor = params.iqr_factor,
            "Removed IQR outliers"
        );
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn with_spike() -> Table {
        let mut rows: Vec<Vec<Value>> = (0..20)
            .map(|i| vec![json!(10 + i % 3), json!(format!("row{}", i))])
            .collect();
        rows.push(vec![json!(1000), json!("spike")]);
        Table::from_rows(vec!["qty".into(), "label".into()], rows).unwrap()
    }

    #[test]
    fn test_zscore_removes_spike() {
        let out = HandleOutliersZScore
            .execute(Some(with_spike()), &StepArgs::new())
            .unwrap();
        assert_eq!(out.num_rows(), 20);
        assert!(out.rows.iter().all(|r| r[1] != json!("spike")));
    }

    #[test]
    fn test_zscore_unsupported_method() {
        let args = StepArgs::new().with("method", "clip");
        match HandleOutliersZScore.execute(Some(with_spike()), &args) {
            Err(PipelineError::ArgumentError { message, .. }) => {
                assert_eq!(message, "Unsupported method: clip")
            }
            other => panic!("Expected ArgumentError, got {:?}", other),
        }
    }

    #[test]
    fn test_zscore_constant_column_keeps_rows() {
        let table = Table::from_rows(
            vec!["x".into()],
            vec![vec![json!(5)], vec![json!(5)], vec![Value::Null]],
        )
        .unwrap();
        let out = HandleOutliersZScore.execute(Some(table), &StepArgs::new()).unwrap();
        assert_eq!(out.num_rows(), 3);
    }

    #[test]
    fn test_iqr_bounds() {
        // Q1 = 2.5, Q3 = 5.5, IQR = 3 -> keep [-2, 10]
        let table = Table::from_rows(
            vec!["x".into()],
            [1, 2, 3, 4, 5, 6, 30]
                .iter()
                .map(|v| vec![json!(v)])
                .collect::<Vec<_>>(),
        )
        .unwrap();
        let sorted: Vec<f64> = column_f64(&table, 0);
        assert_eq!(quantile(&sorted, 0.25), Some(2.5));
        assert_eq!(quantile(&sorted, 0.75), Some(5.5));

        let out = HandleOutliersIQR.execute(Some(table), &StepArgs::new()).unwrap();
        let kept: Vec<i64> = out.rows.iter().filter_map(|r| r[0].as_i64()).collect();
        assert_eq!(kept, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_iqr_custom_factor() {
        let args = StepArgs::new().with("iqr_factor", 1000.0);
        let out = HandleOutliersIQR.execute(Some(with_spike()), &args).unwrap();
        assert_eq!(out.num_rows(), 21);
    }
}
