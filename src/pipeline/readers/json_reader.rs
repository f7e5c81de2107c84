use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::data_model::Table;
use crate::error::{PipelineError, Result};
use crate::pipeline::readers::BaseReader;

/// Reads either a JSON array of records or a serialized [`Table`]
/// (`{"columns": [...], "rows": [[...]]}`).
#[derive(Debug, Clone, Default)]
pub struct JsonReader;

impl BaseReader for JsonReader {
    fn read_table(&self, path: &Path) -> Result<Table> {
        let content = fs::read_to_string(path)?;
        let value: Value = serde_json::from_str(&content)?;

        let is_table_layout = value
            .as_object()
            .is_some_and(|map| map.contains_key("columns") && map.contains_key("rows"));
        if is_table_layout {
            let table: Table = serde_json::from_value(value)?;
            return Table::from_rows(table.columns, table.rows);
        }

        match value {
            Value::Array(items) => {
                let mut records = Vec::with_capacity(items.len());
                for (idx, item) in items.into_iter().enumerate() {
                    match item {
                        Value::Object(map) => records.push(map),
                        other => {
                            return Err(PipelineError::SchemaError(format!(
                                "Record {} in '{}' is not a JSON object: {}",
                                idx,
                                path.display(),
                                other
                            )))
                        }
                    }
                }
                Ok(Table::from_records(records))
            }
            _ => Err(PipelineError::SchemaError(format!(
                "Unsupported JSON layout in '{}': expected an array of records",
                path.display()
            ))),
        }
    }
}
