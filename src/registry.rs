use std::collections::HashMap;

use itertools::Itertools;
use tracing::{debug, warn};

use crate::data_model::Table;
use crate::error::{PipelineError, Result};
use crate::executor::PipelineStep;

pub type StepFactory<D> = Box<dyn Fn() -> Box<dyn PipelineStep<D>> + Send + Sync>;

/// Name → factory table consulted when turning configuration into steps.
///
/// Names are matched exactly and case-sensitively. A factory may capture
/// whatever shared handle its steps need; the registry owner decides how long
/// that handle lives.
pub struct StepRegistry<D = Table> {
    factories: HashMap<String, StepFactory<D>>,
}

impl<D: 'static> StepRegistry<D> {
    pub fn new() -> Self {
        StepRegistry {
            factories: HashMap::new(),
        }
    }

    pub fn register<F>(&mut self, name: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn() -> Box<dyn PipelineStep<D>> + Send + Sync + 'static,
    {
        let name = name.into();
        if self.factories.contains_key(&name) {
            warn!(step = %name, "Replacing previously registered step");
        } else {
            debug!(step = %name, "Registering step");
        }
        self.factories.insert(name, Box::new(factory));
        self
    }

    /// Registers a step type that can be built with `Default`.
    pub fn register_default<S>(&mut self, name: impl Into<String>) -> &mut Self
    where
        S: PipelineStep<D> + Default + 'static,
    {
        self.register(name, || Box::new(S::default()) as Box<dyn PipelineStep<D>>)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).sorted().collect()
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Builds a fresh instance of the named step.
    pub fn resolve(&self, name: &str) -> Result<Box<dyn PipelineStep<D>>> {
        match self.factories.get(name) {
            Some(factory) => Ok(factory()),
            None => {
                debug!(
                    step = name,
                    available = %self.names().iter().join(", "),
                    "Step lookup failed"
                );
                Err(PipelineError::UnknownStep {
                    name: name.to_string(),
                })
            }
        }
    }
}

impl<D: 'static> Default for StepRegistry<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl StepRegistry<Table> {
    /// Registry preloaded with every step bundled in [`crate::pipeline`].
    pub fn with_builtin_steps() -> Self {
        let mut registry = StepRegistry::new();
        crate::pipeline::register_builtin_steps(&mut registry);
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::StepArgs;

    #[derive(Default)]
    struct Echo;

    impl PipelineStep<String> for Echo {
        fn name(&self) -> &str {
            "Echo"
        }

        fn process(&self, data: Option<String>, _args: &StepArgs) -> Result<String> {
            Ok(data.unwrap_or_default())
        }
    }

    #[test]
    fn test_resolve_registered_step() {
        let mut registry: StepRegistry<String> = StepRegistry::new();
        registry.register_default::<Echo>("Echo");
        let step = registry.resolve("Echo").unwrap();
        assert_eq!(step.name(), "Echo");
        assert_eq!(step.execute(Some("hi".into()), &StepArgs::new()).unwrap(), "hi");
    }

    #[test]
    fn test_resolve_is_case_sensitive() {
        let mut registry: StepRegistry<String> = StepRegistry::new();
        registry.register_default::<Echo>("Echo");
        match registry.resolve("echo") {
            Err(PipelineError::UnknownStep { name }) => assert_eq!(name, "echo"),
            other => panic!("Expected UnknownStep, got {:?}", other.map(|s| s.name().to_string())),
        }
    }

    #[test]
    fn test_names_are_sorted() {
        let mut registry: StepRegistry<String> = StepRegistry::new();
        registry
            .register_default::<Echo>("Zed")
            .register_default::<Echo>("Alpha");
        assert_eq!(registry.names(), vec!["Alpha", "Zed"]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_builtin_registry_has_loader() {
        let registry = StepRegistry::with_builtin_steps();
        assert!(registry.contains("LoadDataframeFromPath"));
        assert!(registry.contains("RemoveNulls"));
        assert!(!registry.contains("ExecuteQuery"));
    }
}
