// Utils

pub mod stats;
pub mod values;

pub use stats::{column_f64, mean, numeric_columns, quantile, std_dev};
pub use values::parse_cell;
