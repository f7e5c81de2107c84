use std::collections::HashSet;

use tracing::info;

use crate::args::StepArgs;
use crate::data_model::Table;
use crate::error::{PipelineError, Result};
use crate::executor::PipelineStep;
use crate::pipeline::cleaning::remove_duplicates::row_key;
use crate::pipeline::{require_input, NoParams};

/// Fails when the table still has null cells or duplicate rows; otherwise
/// passes it through untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct ValidateData;

impl PipelineStep for ValidateData {
    fn name(&self) -> &str {
        "ValidateData"
    }

    fn process(&self, data: Option<Table>, args: &StepArgs) -> Result<Table> {
        let _: NoParams = args.parse(self.name())?;
        let table = require_input(self.name(), data)?;

        if table.rows.iter().flatten().any(|cell| cell.is_null()) {
            return Err(PipelineError::data(
                self.name(),
                "Data contains missing values after handling",
            ));
        }

        let mut seen = HashSet::new();
        if !table.rows.iter().all(|row| seen.insert(row_key(row))) {
            return Err(PipelineError::data(
                self.name(),
                "Data contains duplicates after handling",
            ));
        }

        info!("Data validation passed");
        Ok(table)
    }
}
