pub mod base_writer;
pub mod csv_writer;
pub mod json_writer;
mod save_to_path;

pub use base_writer::{BaseWriter, WriteMode};
pub use csv_writer::CsvWriter;
pub use json_writer::JsonWriter;
pub use save_to_path::SaveDataframeToPath;
