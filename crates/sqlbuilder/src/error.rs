//! Error types for sqlbuilder

use thiserror::Error;

/// Result type alias for sqlbuilder operations
pub type TemplateResult<T> = Result<T, TemplateError>;

/// Error types for template registration and resolution
#[derive(Debug, Error)]
pub enum TemplateError {
    /// A `@T:name@` placeholder referenced a name that was not supplied
    #[error("Missing parameter: {0}")]
    MissingParameter(String),

    /// A single-use clause group was registered more than once
    #[error("Duplicate configuration: {0}")]
    DuplicateConfiguration(String),

    /// Configuration could not be parsed or selected
    #[error("Configuration error: {0}")]
    Config(String),
}

impl TemplateError {
    /// Create a missing parameter error
    pub fn missing_parameter(name: impl Into<String>) -> Self {
        Self::MissingParameter(name.into())
    }

    /// Create a duplicate configuration error
    pub fn duplicate_configuration(name: impl Into<String>) -> Self {
        Self::DuplicateConfiguration(name.into())
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Check if this is a missing parameter error
    pub fn is_missing_parameter(&self) -> bool {
        matches!(self, Self::MissingParameter(_))
    }

    /// Check if this is a duplicate configuration error
    pub fn is_duplicate_configuration(&self) -> bool {
        matches!(self, Self::DuplicateConfiguration(_))
    }
}

impl From<toml::de::Error> for TemplateError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}
