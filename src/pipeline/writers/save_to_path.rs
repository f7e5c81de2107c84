use std::path::PathBuf;

use serde::Deserialize;
use tracing::info;

use crate::args::StepArgs;
use crate::data_model::Table;
use crate::error::{PipelineError, Result};
use crate::executor::PipelineStep;
use crate::pipeline::require_input;
use crate::pipeline::writers::{BaseWriter, CsvWriter, JsonWriter, WriteMode};

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct SaveParams {
    path: PathBuf,
    #[serde(default = "default_file_type")]
    file_type: String,
    #[serde(default)]
    if_exists: WriteMode,
}

fn default_file_type() -> String {
    "csv".to_string()
}

/// Writes the incoming table to a file and passes it on unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct SaveDataframeToPath;

impl PipelineStep for SaveDataframeToPath {
    fn name(&self) -> &str {
        "SaveDataframeToPath"
    }

    fn process(&self, data: Option<Table>, args: &StepArgs) -> Result<Table> {
        let params: SaveParams = args.parse(self.name())?;
        let table = require_input(self.name(), data)?;

        let writer: Box<dyn BaseWriter> = match params.file_type.as_str() {
            "csv" => Box::new(CsvWriter),
            "json" => Box::new(JsonWriter),
            other => {
                return Err(PipelineError::argument(
                    self.name(),
                    format!("Unsupported file format: {}", other),
                ))
            }
        };

        writer.write_table(&table, &params.path, params.if_exists)?;
        info!(
            path = %params.path.display(),
            rows = table.num_rows(),
            mode = ?params.if_exists,
            "Saved table"
        );
        Ok(table)
    }
}
