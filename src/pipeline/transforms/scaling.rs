use serde::Deserialize;
use tracing::debug;

use crate::args::StepArgs;
use crate::data_model::Table;
use crate::error::{PipelineError, Result};
use crate::executor::PipelineStep;
use crate::pipeline::{require_input, NoParams};
use crate::utils::stats::{column_f64, mean, number, numeric_columns, std_dev};

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct NormalizeParams {
    #[serde(default = "default_feature_range")]
    feature_range: (f64, f64),
}

fn default_feature_range() -> (f64, f64) {
    (0.0, 1.0)
}

/// Applies `f` to every non-null cell of column `idx`.
fn map_column<F>(table: &mut Table, idx: usize, f: F)
where
    F: Fn(f64) -> f64,
{
    for row in table.rows.iter_mut() {
        if let Some(v) = row[idx].as_f64() {
            row[idx] = number(f(v));
        }
    }
}

/// Min-max scales every numeric column into `feature_range`.
/// A constant column maps to the lower end of the range.
#[derive(Debug, Default, Clone, Copy)]
pub struct NormalizeData;

impl PipelineStep for NormalizeData {
    fn name(&self) -> &str {
        "NormalizeData"
    }

    fn process(&self, data: Option<Table>, args: &StepArgs) -> Result<Table> {
        let params: NormalizeParams = args.parse(self.name())?;
        let (range_min, range_max) = params.feature_range;
        if range_min >= range_max {
            return Err(PipelineError::argument(
                self.name(),
                format!(
                    "Minimum of desired feature range must be smaller than maximum, got ({}, {})",
                    range_min, range_max
                ),
            ));
        }
        let mut table = require_input(self.name(), data)?;

        let columns = numeric_columns(&table);
        for &idx in &columns {
            let values = column_f64(&table, idx);
            let min = values.iter().copied().fold(f64::INFINITY, f64::min);
            let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let span = max - min;
            map_column(&mut table, idx, |v| {
                if span > 0.0 {
                    range_min + (v - min) / span * (range_max - range_min)
                } else {
                    range_min
                }
            });
        }
        debug!(columns = columns.len(), "Normalized numeric columns");
        Ok(table)
    }
}

/// Centers every numeric column to mean 0 and scales it to unit population
/// variance. Zero-variance columns become 0.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardizeData;

impl PipelineStep for StandardizeData {
    fn name(&self) -> &str {
        "StandardizeData"
    }

    fn process(&self, data: Option<Table>, args: &StepArgs) -> Result<Table> {
        let _: NoParams = args.parse(self.name())?;
        let mut table = require_input(self.name(), data)?;

        let columns = numeric_columns(&table);
        for &idx in &columns {
            let values = column_f64(&table, idx);
            let (Some(m), Some(s)) = (mean(&values), std_dev(&values, 0)) else {
                continue;
            };
            map_column(&mut table, idx, |v| if s > 0.0 { (v - m) / s } else { 0.0 });
        }
        debug!(columns = columns.len(), "Standardized numeric columns");
        Ok(table)
    }
}
