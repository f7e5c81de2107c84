use crate::args::{null_as_empty, StepArgs};
use crate::error::{PipelineError, Result};
use crate::registry::StepRegistry;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs; // For reading the file
use std::path::Path;

/// Section read when the caller does not name one.
pub const DEFAULT_SECTION: &str = "pipeline_steps";

/// The whole configuration file. Each top-level key may hold a list of step
/// descriptors; sections are only parsed when asked for, so unrelated keys
/// can live alongside them.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct PipelineConfig {
    #[serde(flatten)]
    sections: HashMap<String, serde_yaml::Value>,
}

/// A declarative reference to a step plus the arguments it runs with.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct StepDescriptor {
    pub class: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub kwargs: StepArgs,
}

impl StepDescriptor {
    pub fn new(class: impl Into<String>, kwargs: StepArgs) -> Self {
        StepDescriptor {
            class: class.into(),
            kwargs,
        }
    }
}

impl PipelineConfig {
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        parse_config(content, None)
    }

    pub fn has_section(&self, section: &str) -> bool {
        self.sections.contains_key(section)
    }

    /// Ordered step descriptors of one section.
    pub fn steps(&self, section: &str) -> Result<Vec<StepDescriptor>> {
        let raw = self.sections.get(section).ok_or_else(|| {
            PipelineError::ConfigError(format!(
                "Section '{}' not found in pipeline config",
                section
            ))
        })?;

        if raw.is_null() {
            return Ok(Vec::new());
        }

        serde_yaml::from_value(raw.clone()).map_err(|e| {
            PipelineError::ConfigError(format!(
                "Failed to parse step list in section '{}': {}",
                section, e
            ))
        })
    }
}

/// Loads and parses the pipeline configuration YAML file.
pub fn load_pipeline_config<P: AsRef<Path>>(config_path: P) -> Result<PipelineConfig> {
    let path_ref = config_path.as_ref();
    let config_content = fs::read_to_string(path_ref).map_err(|e| {
        PipelineError::ConfigError(format!(
            "Failed to read pipeline config file '{}': {}",
            path_ref.display(),
            e
        ))
    })?;

    parse_config(&config_content, Some(path_ref))
}

/// An empty document is an empty config. `source` only feeds the error text.
fn parse_config(content: &str, source: Option<&Path>) -> Result<PipelineConfig> {
    serde_yaml::from_str::<Option<PipelineConfig>>(content)
        .map(Option::unwrap_or_default)
        .map_err(|e| {
            let message = match source {
                Some(path) => format!(
                    "Failed to parse pipeline config YAML from '{}': {}",
                    path.display(),
                    e
                ),
                None => format!("Failed to parse pipeline config YAML: {}", e),
            };
            PipelineError::ConfigError(message)
        })
}

/// Checks descriptors against a registry without running anything.
pub fn validate_steps<D: 'static>(steps: &[StepDescriptor], registry: &StepRegistry<D>) -> Result<()> {
    for (idx, descriptor) in steps.iter().enumerate() {
        if descriptor.class.trim().is_empty() {
            return Err(PipelineError::ConfigValidationError(format!(
                "Step at index {} has an empty class name",
                idx
            )));
        }
        if !registry.contains(&descriptor.class) {
            return Err(PipelineError::ConfigValidationError(format!(
                "Step at index {} names unknown class '{}'",
                idx, descriptor.class
            )));
        }
    }
    Ok(())
}
