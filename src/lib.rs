#![allow(non_snake_case)]

// Library modules, shared by the `etl` binary and the integration tests.
pub mod args;
pub mod assembler;
pub mod config;
pub mod data_model;
pub mod error;
pub mod executor;
pub mod pipeline;
pub mod registry;
pub mod utils;

pub use args::StepArgs;
pub use assembler::{build_pipeline_from_config, execute_pipeline};
pub use data_model::Table;
pub use error::{PipelineError, Result};
pub use executor::{Pipeline, PipelineBuilder, PipelineStep};
pub use registry::StepRegistry;
