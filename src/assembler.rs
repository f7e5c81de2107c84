// src/assembler.rs

use crate::config::pipeline::StepDescriptor;
use crate::error::Result;
use crate::executor::{Pipeline, PipelineBuilder};
use crate::registry::StepRegistry;
use tracing::{debug, info, info_span, instrument, warn};

/// Resolves every descriptor against the registry and builds the pipeline.
///
/// Resolution of the whole list happens here, before anything runs, so an
/// unknown class aborts with no step having executed.
#[instrument(skip_all, fields(num_steps = steps.len()))]
pub fn build_pipeline_from_config<D: 'static>(
    steps: &[StepDescriptor],
    registry: &StepRegistry<D>,
) -> Result<Pipeline<D>> {
    let mut builder = PipelineBuilder::new();
    info!("Building pipeline from configuration...");

    for (i, descriptor) in steps.iter().enumerate() {
        let step_span = info_span!("pipeline_step", index = i, class = %descriptor.class);
        let _enter = step_span.enter();

        let step = registry.resolve(&descriptor.class)?;
        debug!(kwargs = ?descriptor.kwargs, "Adding {}", descriptor.class);
        builder.add_boxed_step(step, descriptor.kwargs.clone());
        info!("Added step: {}", descriptor.class);
    }

    if builder.is_empty() {
        warn!("Warning: Building an empty pipeline from configuration!");
    } else {
        info!("Pipeline built successfully with {} steps.", builder.len());
    }
    Ok(builder.build())
}

/// Builds the configured pipeline and runs it from no initial data,
/// returning whatever the last step produced.
pub fn execute_pipeline<D: 'static>(
    steps: &[StepDescriptor],
    registry: &StepRegistry<D>,
) -> Result<Option<D>> {
    let pipeline = build_pipeline_from_config(steps, registry)?;
    pipeline.execute(None)
}
