use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::args::StepArgs;
use crate::data_model::Table;
use crate::error::Result;

/// A named unit of work in a pipeline.
///
/// Implementors provide `process`; callers go through `execute`, which is the
/// one place step-agnostic logging hooks in. Steps hold no state between
/// invocations, so one instance can serve repeated runs.
pub trait PipelineStep<D = Table>: Send + Sync {
    fn name(&self) -> &str;

    /// The step's transformation. `data` is `None` when the step is the first
    /// one in a pipeline that was started without an initial value.
    fn process(&self, data: Option<D>, args: &StepArgs) -> Result<D>;

    fn execute(&self, data: Option<D>, args: &StepArgs) -> Result<D> {
        info!(step = self.name(), "Executing step");
        self.process(data, args)
    }
}

/// A step bound to the arguments it will be called with.
pub struct PipelineEntry<D> {
    step: Arc<dyn PipelineStep<D>>,
    args: StepArgs,
}

impl<D> PipelineEntry<D> {
    pub fn step_name(&self) -> &str {
        self.step.name()
    }

    pub fn args(&self) -> &StepArgs {
        &self.args
    }
}

impl<D> Clone for PipelineEntry<D> {
    fn clone(&self) -> Self {
        PipelineEntry {
            step: Arc::clone(&self.step),
            args: self.args.clone(),
        }
    }
}

/// Ordered, immutable sequence of steps. Built by [`PipelineBuilder`].
pub struct Pipeline<D = Table> {
    entries: Vec<PipelineEntry<D>>,
}

impl<D> Pipeline<D> {
    pub fn new(entries: Vec<PipelineEntry<D>>) -> Self {
        if entries.is_empty() {
            warn!("Pipeline created with no steps.");
        }
        Pipeline { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[PipelineEntry<D>] {
        &self.entries
    }

    pub fn step_names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.step.name()).collect()
    }

    /// Runs every step in insertion order, feeding each one the previous
    /// step's output. The first error stops the run and is returned exactly
    /// as the step produced it; side effects of earlier steps are not undone.
    #[instrument(skip_all, fields(num_steps = self.entries.len()))]
    pub fn execute(&self, initial_data: Option<D>) -> Result<Option<D>> {
        let mut current = initial_data;
        for (index, entry) in self.entries.iter().enumerate() {
            debug!(index, step = entry.step.name(), "Running step");
            current = Some(entry.step.execute(current, &entry.args)?);
        }
        Ok(current)
    }
}

impl<D> Clone for Pipeline<D> {
    fn clone(&self) -> Self {
        Pipeline {
            entries: self.entries.clone(),
        }
    }
}

impl<D> std::fmt::Debug for Pipeline<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("steps", &self.step_names())
            .finish()
    }
}

/// Accumulates steps for a [`Pipeline`].
///
/// ```
/// use StepForge::args::StepArgs;
/// use StepForge::data_model::Table;
/// use StepForge::executor::PipelineBuilder;
/// use StepForge::pipeline::cleaning::{RemoveDuplicates, RemoveNulls};
///
/// let pipeline = PipelineBuilder::<Table>::new()
///     .add_step(RemoveNulls, StepArgs::new())
///     .add_step(RemoveDuplicates, StepArgs::new())
///     .build();
/// assert_eq!(pipeline.step_names(), vec!["RemoveNulls", "RemoveDuplicates"]);
/// ```
pub struct PipelineBuilder<D = Table> {
    entries: Vec<PipelineEntry<D>>,
}

impl<D: 'static> PipelineBuilder<D> {
    pub fn new() -> Self {
        PipelineBuilder {
            entries: Vec::new(),
        }
    }

    pub fn add_step<S>(&mut self, step: S, args: StepArgs) -> &mut Self
    where
        S: PipelineStep<D> + 'static,
    {
        self.entries.push(PipelineEntry {
            step: Arc::new(step),
            args,
        });
        self
    }

    /// Same as `add_step` for steps that are already boxed, such as the ones
    /// handed out by a registry.
    pub fn add_boxed_step(&mut self, step: Box<dyn PipelineStep<D>>, args: StepArgs) -> &mut Self {
        self.entries.push(PipelineEntry {
            step: Arc::from(step),
            args,
        });
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snapshots the accumulated steps. The builder stays usable; anything
    /// added afterwards does not reach pipelines that were already built.
    pub fn build(&self) -> Pipeline<D> {
        Pipeline::new(self.entries.clone())
    }
}

impl<D: 'static> Default for PipelineBuilder<D> {
    fn default() -> Self {
        Self::new()
    }
}
