// src/pipeline/mod.rs

pub mod cleaning;
pub mod readers; // Looks for src/pipeline/readers/mod.rs
pub mod transforms;
pub mod writers;

use serde::Deserialize;

use crate::data_model::Table;
use crate::error::{PipelineError, Result};
use crate::registry::StepRegistry;

use cleaning::{DataframeShape, RemoveDuplicates, RemoveNulls, ValidateData};
use readers::LoadDataframeFromPath;
use transforms::{
    ConvertFloatToStr, ConvertStrToDatetime, HandleOutliersIQR, HandleOutliersZScore,
    NormalizeData, StandardizeData,
};
use writers::SaveDataframeToPath;

/// Registers every bundled step under its class name.
pub fn register_builtin_steps(registry: &mut StepRegistry<Table>) {
    registry
        .register_default::<LoadDataframeFromPath>("LoadDataframeFromPath")
        .register_default::<SaveDataframeToPath>("SaveDataframeToPath")
        .register_default::<RemoveNulls>("RemoveNulls")
        .register_default::<RemoveDuplicates>("RemoveDuplicates")
        .register_default::<ValidateData>("ValidateData")
        .register_default::<DataframeShape>("DataframeShape")
        .register_default::<ConvertStrToDatetime>("ConvertStrToDatetime")
        .register_default::<ConvertFloatToStr>("ConvertFloatToStr")
        .register_default::<HandleOutliersZScore>("HandleOutliersZScore")
        .register_default::<HandleOutliersIQR>("HandleOutliersIQR")
        .register_default::<NormalizeData>("NormalizeData")
        .register_default::<StandardizeData>("StandardizeData");
}

/// Params for steps that take no arguments; any key is rejected.
#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub(crate) struct NoParams {}

pub(crate) fn require_input(step: &str, data: Option<Table>) -> Result<Table> {
    data.ok_or_else(|| PipelineError::MissingInput {
        step: step.to_string(),
    })
}

pub(crate) fn require_column(step: &str, table: &Table, column: &str) -> Result<usize> {
    table.column_index(column).ok_or_else(|| {
        PipelineError::data(step, format!("column '{}' not found in table", column))
    })
}
