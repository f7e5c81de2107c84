use tracing::info;

use crate::args::StepArgs;
use crate::data_model::Table;
use crate::error::Result;
use crate::executor::PipelineStep;
use crate::pipeline::{require_input, NoParams};

/// Logs the table dimensions and passes it on.
#[derive(Debug, Default, Clone, Copy)]
pub struct DataframeShape;

impl PipelineStep for DataframeShape {
    fn name(&self) -> &str {
        "DataframeShape"
    }

    fn process(&self, data: Option<Table>, args: &StepArgs) -> Result<Table> {
        let _: NoParams = args.parse(self.name())?;
        let table = require_input(self.name(), data)?;
        let (rows, columns) = table.shape();
        info!(
            "The data is made up of {} row(s) and {} column(s).",
            rows, columns
        );
        Ok(table)
    }
}
