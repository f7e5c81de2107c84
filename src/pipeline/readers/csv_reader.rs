use std::path::Path;

use tracing::debug;

use crate::data_model::Table;
use crate::error::Result;
use crate::pipeline::readers::BaseReader;
use crate::utils::parse_cell;

/// Reads delimited text with a header row. Cell types are inferred per cell.
#[derive(Debug, Clone)]
pub struct CsvReader {
    delimiter: u8,
}

impl CsvReader {
    pub fn new(delimiter: u8) -> Self {
        CsvReader { delimiter }
    }
}

impl Default for CsvReader {
    fn default() -> Self {
        CsvReader::new(b',')
    }
}

impl BaseReader for CsvReader {
    fn read_table(&self, path: &Path) -> Result<Table> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .from_path(path)?;

        let columns: Vec<String> = reader.headers()?.iter().map(String::from).collect();
        let mut table = Table::new(columns);

        for record in reader.records() {
            let record = record?;
            table.push_row(record.iter().map(parse_cell).collect())?;
        }

        debug!(path = %path.display(), rows = table.num_rows(), "Read CSV file");
        Ok(table)
    }
}
