use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use crate::data_model::Table;
use crate::error::{PipelineError, Result};
use crate::pipeline::writers::base_writer::already_exists;
use crate::pipeline::writers::{BaseWriter, WriteMode};
use crate::utils::values::cell_to_string;

/// Writes a table as comma-separated text with a header row.
#[derive(Debug, Clone, Default)]
pub struct CsvWriter;

impl BaseWriter for CsvWriter {
    fn write_table(&self, table: &Table, path: &Path, mode: WriteMode) -> Result<()> {
        if mode == WriteMode::Fail && path.exists() {
            return Err(already_exists(path).into());
        }

        // An empty file gets a header just like a missing one.
        let has_content = path.exists() && fs::metadata(path)?.len() > 0;
        let appending = has_content && mode == WriteMode::Append;
        if appending {
            // Appended rows must line up with the header already on disk.
            let mut existing = csv::Reader::from_path(path)?;
            let header: Vec<String> = existing.headers()?.iter().map(String::from).collect();
            if header != table.columns {
                return Err(PipelineError::SchemaError(format!(
                    "Cannot append to '{}': existing columns {:?} differ from {:?}",
                    path.display(),
                    header,
                    table.columns
                )));
            }
        }

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .append(appending)
            .truncate(!appending)
            .open(path)?;
        if appending && !ends_with_newline(path)? {
            (&file).write_all(b"\n")?;
        }
        let mut writer = csv::Writer::from_writer(file);

        if !appending {
            writer.write_record(&table.columns)?;
        }
        for row in &table.rows {
            writer.write_record(row.iter().map(cell_to_string))?;
        }
        writer.flush()?;
        Ok(())
    }
}

fn ends_with_newline(path: &Path) -> Result<bool> {
    let mut file = File::open(path)?;
    if file.metadata()?.len() == 0 {
        return Ok(true);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use tempfile::tempdir;

    fn table() -> Table {
        Table::from_rows(
            vec!["id".into(), "note".into()],
            vec![vec![json!(1), json!("a, b")], vec![json!(2), Value::Null]],
        )
        .unwrap()
    }

    #[test]
    fn test_replace_then_append() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out/data.csv");

        CsvWriter.write_table(&table(), &path, WriteMode::Replace).unwrap();
        CsvWriter.write_table(&table(), &path, WriteMode::Append).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "id,note\n1,\"a, b\"\n2,\n1,\"a, b\"\n2,\n");
    }

    #[test]
    fn test_fail_mode_refuses_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.csv");
        CsvWriter.write_table(&table(), &path, WriteMode::Fail).unwrap();

        match CsvWriter.write_table(&table(), &path, WriteMode::Fail) {
            Err(PipelineError::IoError { source }) => {
                assert_eq!(source.kind(), std::io::ErrorKind::AlreadyExists)
            }
            other => panic!("Expected IoError, got {:?}", other),
        }
    }

    #[test]
    fn test_fail_mode_refuses_existing_empty_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        fs::write(&path, "").unwrap();

        match CsvWriter.write_table(&table(), &path, WriteMode::Fail) {
            Err(PipelineError::IoError { source }) => {
                assert_eq!(source.kind(), std::io::ErrorKind::AlreadyExists)
            }
            other => panic!("Expected IoError, got {:?}", other),
        }
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_append_to_empty_file_writes_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        fs::write(&path, "").unwrap();

        CsvWriter.write_table(&table(), &path, WriteMode::Append).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "id,note\n1,\"a, b\"\n2,\n"
        );
    }

    #[test]
    fn test_append_after_missing_trailing_newline() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.csv");
        fs::write(&path, "a,b\n1,2").unwrap();

        let more = Table::from_rows(
            vec!["a".into(), "b".into()],
            vec![vec![json!(3), json!(4)]],
        )
        .unwrap();
        CsvWriter.write_table(&more, &path, WriteMode::Append).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "a,b\n1,2\n3,4\n");
    }

    #[test]
    fn test_append_with_different_columns_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.csv");
        CsvWriter.write_table(&table(), &path, WriteMode::Replace).unwrap();

        let other = Table::new(vec!["id".into()]);
        assert!(matches!(
            CsvWriter.write_table(&other, &path, WriteMode::Append),
            Err(PipelineError::SchemaError(_))
        ));
    }
}
