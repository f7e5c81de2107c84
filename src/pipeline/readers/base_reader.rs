use std::path::Path;

use crate::data_model::Table;
use crate::error::Result;

/// Reads a whole file into a [`Table`].
pub trait BaseReader {
    fn read_table(&self, path: &Path) -> Result<Table>;
}
