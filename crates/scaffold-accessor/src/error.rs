//! Schema error types.

/// Structural problems in a record schema, detected before any output is
/// produced.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// The record type name is not a usable C identifier.
    #[error("invalid record name '{record}': {reason}")]
    InvalidRecordName { record: String, reason: String },

    /// A field has an empty name.
    #[error("record '{record}': field #{index} has an empty name")]
    EmptyFieldName { record: String, index: usize },

    /// A field name is not a usable C identifier.
    #[error("record '{record}': invalid field name '{field}': {reason}")]
    InvalidFieldName {
        record: String,
        field: String,
        reason: String,
    },

    /// The same field name appears twice in one record.
    #[error("record '{record}': duplicate field '{field}'")]
    DuplicateField { record: String, field: String },

    /// A field type is not a recognised scalar or pointer kind.
    #[error("record '{record}': field '{field}' has unknown type '{type_name}': {detail}")]
    UnknownType {
        record: String,
        field: String,
        type_name: String,
        detail: String,
    },

    /// The same record type name appears twice in one schema.
    #[error("duplicate record '{record}'")]
    DuplicateRecord { record: String },

    /// Two records would be written to the same file.
    #[error("records '{first}' and '{second}' both map to '{file}'")]
    FileNameCollision {
        first: String,
        second: String,
        file: String,
    },

    /// Two records generate an accessor with the same function name.
    #[error("records '{first}' and '{second}' both generate '{name}'")]
    AccessorCollision {
        name: String,
        first: String,
        second: String,
    },

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type alias for schema operations.
pub type Result<T> = std::result::Result<T, SchemaError>;
