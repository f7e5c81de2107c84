// src/pipeline/cleaning/mod.rs

mod remove_duplicates;
mod remove_nulls;
mod shape;
mod validate_data;

pub use remove_duplicates::RemoveDuplicates;
pub use remove_nulls::RemoveNulls;
pub use shape::DataframeShape;
pub use validate_data::ValidateData;
