use std::path::PathBuf;

use serde::Deserialize;
use tracing::{debug, info};

use crate::args::StepArgs;
use crate::data_model::Table;
use crate::error::{PipelineError, Result};
use crate::executor::PipelineStep;
use crate::pipeline::readers::{BaseReader, CsvReader, JsonReader};

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct LoadParams {
    #[serde(alias = "path")]
    filepath_or_buffer: PathBuf,
    #[serde(default = "default_file_type")]
    file_type: String,
    delimiter: Option<char>,
}

fn default_file_type() -> String {
    "csv".to_string()
}

/// Produces a table from a file. Whatever data came in is discarded, so this
/// is normally the first step of a pipeline.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoadDataframeFromPath;

impl PipelineStep for LoadDataframeFromPath {
    fn name(&self) -> &str {
        "LoadDataframeFromPath"
    }

    fn process(&self, data: Option<Table>, args: &StepArgs) -> Result<Table> {
        let params: LoadParams = args.parse(self.name())?;
        if data.is_some() {
            debug!("Discarding incoming data; loading from file instead");
        }

        let reader: Box<dyn BaseReader> = match params.file_type.as_str() {
            "csv" => {
                let delimiter = match params.delimiter {
                    Some(c) if c.is_ascii() => c as u8,
                    Some(c) => {
                        return Err(PipelineError::argument(
                            self.name(),
                            format!("delimiter must be a single ASCII character, got '{}'", c),
                        ))
                    }
                    None => b',',
                };
                Box::new(CsvReader::new(delimiter))
            }
            "json" => Box::new(JsonReader),
            other => {
                return Err(PipelineError::argument(
                    self.name(),
                    format!("Unsupported file format: {}", other),
                ))
            }
        };

        let table = reader.read_table(&params.filepath_or_buffer)?;
        info!(
            path = %params.filepath_or_buffer.display(),
            rows = table.num_rows(),
            columns = table.num_columns(),
            "Loaded table"
        );
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_loads_csv_by_default() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "a,b\n1,2\n3,4\n").unwrap();
        let args = StepArgs::new().with("filepath_or_buffer", file.path().to_str().unwrap());

        let table = LoadDataframeFromPath.execute(None, &args).unwrap();
        assert_eq!(table.shape(), (2, 2));
    }

    #[test]
    fn test_path_alias_and_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"[{{"a": 1}}]"#).unwrap();
        let args = StepArgs::new()
            .with("path", file.path().to_str().unwrap())
            .with("file_type", "json");

        let table = LoadDataframeFromPath.execute(None, &args).unwrap();
        assert_eq!(table.columns, vec!["a"]);
    }

    #[test]
    fn test_unsupported_format() {
        let args = StepArgs::new()
            .with("filepath_or_buffer", "data.xlsx")
            .with("file_type", "xlsx");
        match LoadDataframeFromPath.execute(None, &args) {
            Err(PipelineError::ArgumentError { message, .. }) => {
                assert!(message.contains("Unsupported file format: xlsx"))
            }
            other => panic!("Expected ArgumentError, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_path_argument() {
        assert!(matches!(
            LoadDataframeFromPath.execute(None, &StepArgs::new()),
            Err(PipelineError::ArgumentError { .. })
        ));
    }
}
