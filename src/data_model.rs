use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{PipelineError, Result};

/// In-memory tabular dataset threaded through the bundled steps.
///
/// Cells are JSON values; `Value::Null` marks a missing cell. Every row has
/// exactly `columns.len()` cells.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Table {
            columns,
            rows: Vec::new(),
        }
    }

    /// Builds a table, rejecting rows whose width does not match the header.
    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Result<Self> {
        let mut table = Table::new(columns);
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    /// Builds a table from record-oriented JSON objects. Columns appear in
    /// first-seen order; keys missing from a record become null.
    pub fn from_records(records: Vec<Map<String, Value>>) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for record in &records {
            for key in record.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }

        let rows = records
            .into_iter()
            .map(|mut record| {
                columns
                    .iter()
                    .map(|column| record.remove(column).unwrap_or(Value::Null))
                    .collect()
            })
            .collect();

        Table { columns, rows }
    }

    pub fn to_records(&self) -> Vec<Map<String, Value>> {
        self.rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .cloned()
                    .zip(row.iter().cloned())
                    .collect::<Map<String, Value>>()
            })
            .collect()
    }

    pub fn push_row(&mut self, row: Vec<Value>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(PipelineError::SchemaError(format!(
                "Row {} has {} values but the table has {} columns",
                self.rows.len(),
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.columns.len())
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn column_values(&self, name: &str) -> Option<impl Iterator<Item = &Value> + '_> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| &row[idx]))
    }

    /// Keeps only the rows for which `keep` returns true.
    pub fn retain_rows<F>(&mut self, mut keep: F)
    where
        F: FnMut(&[Value]) -> bool,
    {
        self.rows.retain(|row| keep(row));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Table {
        Table::from_rows(
            vec!["id".into(), "name".into()],
            vec![vec![json!(1), json!("a")], vec![json!(2), Value::Null]],
        )
        .unwrap()
    }

    #[test]
    fn test_shape_and_lookup() {
        let table = sample();
        assert_eq!(table.shape(), (2, 2));
        assert_eq!(table.column_index("name"), Some(1));
        assert_eq!(table.column_index("missing"), None);
        let ids: Vec<&Value> = table.column_values("id").unwrap().collect();
        assert_eq!(ids, vec![&json!(1), &json!(2)]);
    }

    #[test]
    fn test_push_row_rejects_wrong_width() {
        let mut table = sample();
        let err = table.push_row(vec![json!(3)]).unwrap_err();
        assert!(matches!(err, PipelineError::SchemaError(_)));
        assert_eq!(table.num_rows(), 2);
    }

    #[test]
    fn test_from_records_fills_missing_keys_with_null() {
        let records = vec![
            json!({"a": 1, "b": 2}).as_object().unwrap().clone(),
            json!({"b": 3, "c": "x"}).as_object().unwrap().clone(),
        ];
        let table = Table::from_records(records);
        assert_eq!(table.columns, vec!["a", "b", "c"]);
        assert_eq!(table.rows[1], vec![Value::Null, json!(3), json!("x")]);
        assert_eq!(table.to_records()[0].get("c"), Some(&Value::Null));
    }
}
