// src/bin/etl.rs

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};
use StepForge::assembler::execute_pipeline;
use StepForge::config::cli::Args;
use StepForge::config::{load_pipeline_config, validate_steps};
use StepForge::registry::StepRegistry;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = fmt::Subscriber::builder().with_env_filter(filter);
    if args.json_logs {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    println!("StepForge etl v{}", env!("CARGO_PKG_VERSION"));

    let registry = StepRegistry::with_builtin_steps();
    if args.list_steps {
        for name in registry.names() {
            println!("{}", name);
        }
        return Ok(());
    }

    info!(
        "Loading pipeline configuration from: {}",
        args.config.display()
    );
    let config = load_pipeline_config(&args.config)?;
    let steps = config
        .steps(&args.section)
        .with_context(|| format!("Cannot read steps from '{}'", args.config.display()))?;

    if let Err(e) = validate_steps(&steps, &registry) {
        error!("Pipeline configuration is invalid: {}", e);
        return Err(e.into());
    }
    if args.validate_config {
        println!(
            "Configuration '{}' is valid: {} step(s) in section '{}'.",
            args.config.display(),
            steps.len(),
            args.section
        );
        return Ok(());
    }

    let output = execute_pipeline(&steps, &registry)
        .with_context(|| format!("Pipeline '{}' failed", args.section))?;

    match output {
        Some(table) => {
            let (rows, columns) = table.shape();
            println!("Pipeline finished: {} row(s), {} column(s).", rows, columns);
        }
        None => println!("Pipeline finished with no output."),
    }
    Ok(())
}
