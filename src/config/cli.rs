use std::path::PathBuf;

use clap::Parser;

use super::pipeline::DEFAULT_SECTION;

// Define command-line arguments
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Run a configured data pipeline", long_about = None)]
pub struct Args {
    /// Path to the pipeline configuration YAML file.
    #[arg(short = 'c', long, default_value = "configs/config.yml")]
    pub config: PathBuf,

    /// Configuration section holding the ordered step list
    #[arg(short = 's', long, default_value = DEFAULT_SECTION)]
    pub section: String,

    /// Validate the pipeline configuration and exit
    #[arg(long)]
    pub validate_config: bool,

    /// Print the registered step names and exit
    #[arg(long)]
    pub list_steps: bool,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,
}
