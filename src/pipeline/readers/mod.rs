// src/pipeline/readers/mod.rs

pub mod base_reader;
pub mod csv_reader;
pub mod json_reader;
mod load_from_path;

pub use base_reader::BaseReader;
pub use csv_reader::CsvReader;
pub use json_reader::JsonReader;
pub use load_from_path::LoadDataframeFromPath;
