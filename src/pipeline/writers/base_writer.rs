use std::path::Path;

use serde::Deserialize;

use crate::data_model::Table;
use crate::error::Result;

/// What to do when the target file already exists.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    Fail,
    Replace,
    #[default]
    Append,
}

/// Trait for writing a table to an output sink (e.g. file).
pub trait BaseWriter {
    fn write_table(&self, table: &Table, path: &Path, mode: WriteMode) -> Result<()>;
}

pub(crate) fn already_exists(path: &Path) -> std::io::Error {
    std::io::Error::new(
        std::io::ErrorKind::AlreadyExists,
        format!("'{}' already exists", path.display()),
    )
}
