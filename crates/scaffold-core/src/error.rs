//! Core error types.

/// Errors raised by the shared C vocabulary.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A name is not usable as a C identifier.
    #[error("invalid identifier '{name}': {reason}")]
    InvalidIdentifier { name: String, reason: String },

    /// A C type string could not be parsed.
    #[error("invalid C type: {detail}")]
    InvalidType { detail: String },

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
