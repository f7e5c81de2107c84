// src/pipeline/transforms/mod.rs

mod conversions;
mod outliers;
mod scaling;

pub use conversions::{ConvertFloatToStr, ConvertStrToDatetime};
pub use outliers::{HandleOutliersIQR, HandleOutliersZScore};
pub use scaling::{NormalizeData, StandardizeData};
