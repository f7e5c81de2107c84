use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::data_model::Table;
use crate::error::{PipelineError, Result};
use crate::pipeline::writers::base_writer::already_exists;
use crate::pipeline::writers::{BaseWriter, WriteMode};

/// Writes a table as a pretty-printed JSON array of records.
#[derive(Debug, Clone, Default)]
pub struct JsonWriter;

impl BaseWriter for JsonWriter {
    fn write_table(&self, table: &Table, path: &Path, mode: WriteMode) -> Result<()> {
        let exists = path.exists();
        if exists && mode == WriteMode::Fail {
            return Err(already_exists(path).into());
        }

        let mut records: Vec<Map<String, Value>> = Vec::new();
        if exists && mode == WriteMode::Append {
            let content = fs::read_to_string(path)?;
            if !content.trim().is_empty() {
                records = serde_json::from_str(&content).map_err(|e| {
                    PipelineError::SchemaError(format!(
                        "Cannot append to '{}': not a JSON array of records ({})",
                        path.display(),
                        e
                    ))
                })?;
            }
        }
        records.extend(table.to_records());

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, serde_json::to_string_pretty(&records)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::readers::{BaseReader, JsonReader};
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_append_extends_existing_records() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.json");
        let table = Table::from_rows(vec!["a".into()], vec![vec![json!(1)]]).unwrap();

        JsonWriter.write_table(&table, &path, WriteMode::Append).unwrap();
        JsonWriter.write_table(&table, &path, WriteMode::Append).unwrap();

        let read_back = JsonReader.read_table(&path).unwrap();
        assert_eq!(read_back.num_rows(), 2);
    }

    #[test]
    fn test_replace_overwrites() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.json");
        let table = Table::from_rows(vec!["a".into()], vec![vec![json!(1)]]).unwrap();

        JsonWriter.write_table(&table, &path, WriteMode::Replace).unwrap();
        JsonWriter.write_table(&table, &path, WriteMode::Replace).unwrap();

        assert_eq!(JsonReader.read_table(&path).unwrap().num_rows(), 1);
    }
}
