//! Error types for shimgen-build.

use miette::Diagnostic;
use thiserror::Error;

/// Result type for shimgen-build operations.
pub type Result<T> = std::result::Result<T, BuildError>;

/// Errors that can occur while loading generator inputs.
#[derive(Error, Debug, Diagnostic)]
pub enum BuildError {
    /// Failed to read an input file.
    #[error("Failed to read input file: {0}")]
    #[diagnostic(code(shimgen::build::io))]
    Read(#[from] std::io::Error),

    /// Failed to parse TOML configuration.
    #[error("Failed to parse TOML config: {0}")]
    #[diagnostic(code(shimgen::build::toml))]
    ParseToml(#[from] toml::de::Error),

    /// Failed to parse the JSON class model.
    #[error("Failed to parse class model: {0}")]
    #[diagnostic(code(shimgen::build::json))]
    ParseJson(#[from] serde_json::Error),

    /// Configuration validation error.
    #[error("Config validation error: {0}")]
    #[diagnostic(code(shimgen::build::config))]
    Validation(String),

    /// The same class is described twice.
    #[error("Class `{0}` is defined more than once")]
    #[diagnostic(
        code(shimgen::build::duplicate_class),
        help("class names must be unique across all modules")
    )]
    DuplicateClass(String),
}
