//! Configuration error types.

/// Structural problems in a host triple or probe set.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The host triple is empty.
    #[error("host triple is empty")]
    EmptyHostTriple,

    /// Two probes declare the same symbol.
    #[error("duplicate probe symbol '{symbol}'")]
    DuplicateSymbol { symbol: String },

    /// A host pattern is outside the supported glob grammar.
    #[error("probe '{symbol}': malformed pattern '{pattern}': {reason}")]
    MalformedPattern {
        symbol: String,
        pattern: String,
        reason: String,
    },

    /// A symbol or function name is not a usable C identifier.
    #[error("invalid identifier '{name}': {reason}")]
    InvalidIdentifier { name: String, reason: String },

    /// A probe declaration is neither a pattern nor a function probe.
    #[error("invalid probe '{symbol}': {detail}")]
    InvalidProbe { symbol: String, detail: String },

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
