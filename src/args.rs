use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::{PipelineError, Result};

/// Keyword arguments bound to a step when it is added to a pipeline.
///
/// Keys keep their insertion order. The engine never looks inside; each step
/// decides which keys it needs, usually by deserializing into its own params
/// struct with [`StepArgs::parse`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepArgs(Map<String, Value>);

impl StepArgs {
    pub fn new() -> Self {
        StepArgs(Map::new())
    }

    /// Chainable insert, handy when building pipelines in code.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Deserializes the arguments into a typed params struct. Any mismatch
    /// (missing required key, wrong type, unknown key when the struct denies
    /// them) becomes an `ArgumentError` attributed to `step`.
    pub fn parse<T: DeserializeOwned>(&self, step: &str) -> Result<T> {
        serde_json::from_value(Value::Object(self.0.clone()))
            .map_err(|e| PipelineError::argument(step, e.to_string()))
    }

    pub fn require_str(&self, step: &str, key: &str) -> Result<&str> {
        match self.0.get(key) {
            Some(Value::String(s)) => Ok(s),
            Some(other) => Err(PipelineError::argument(
                step,
                format!("argument '{}' must be a string, got {}", key, other),
            )),
            None => Err(PipelineError::argument(
                step,
                format!("missing required argument '{}'", key),
            )),
        }
    }
}

impl From<Map<String, Value>> for StepArgs {
    fn from(map: Map<String, Value>) -> Self {
        StepArgs(map)
    }
}

impl FromIterator<(String, Value)> for StepArgs {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        StepArgs(iter.into_iter().collect())
    }
}

/// Treats an explicit `kwargs: null` (or an empty `kwargs:` line in YAML) the
/// same as an absent mapping.
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<StepArgs, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<StepArgs>::deserialize(deserializer)?.unwrap_or_default())
}
