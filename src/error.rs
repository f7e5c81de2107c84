use thiserror::Error;

/// Custom Result type for this crate.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// The Error type for pipeline operations.
///
/// Steps return these values directly and the pipeline hands them back to the
/// caller untouched, so the variant a step picks is the variant the caller sees.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Configuration validation error: {0}")]
    ConfigValidationError(String),

    #[error("Unknown step kind '{name}'")]
    UnknownStep { name: String },

    #[error("Invalid arguments for step '{step}': {message}")]
    ArgumentError { step: String, message: String },

    #[error("Step '{step}' requires input data but none was provided")]
    MissingInput { step: String },

    #[error("Data error in step '{step}': {message}")]
    DataError { step: String, message: String },

    #[error("Table schema error: {0}")]
    SchemaError(String),

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("CSV error: {source}")]
    CsvError {
        #[from]
        source: csv::Error,
    },

    #[error("Serialization/Deserialization error: {source}")]
    SerializationError {
        #[from]
        source: serde_json::Error,
    },

    // Escape hatch for steps defined outside this crate.
    #[error(transparent)]
    Other(Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl PipelineError {
    pub fn argument(step: &str, message: impl Into<String>) -> Self {
        PipelineError::ArgumentError {
            step: step.to_string(),
            message: message.into(),
        }
    }

    pub fn data(step: &str, message: impl Into<String>) -> Self {
        PipelineError::DataError {
            step: step.to_string(),
            message: message.into(),
        }
    }
}
