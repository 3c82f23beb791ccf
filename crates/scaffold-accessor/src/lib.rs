//! Getter/setter accessor generation for C record schemas.
//!
//! Turns a [`RecordSpec`] (a named record with ordered, typed fields) into
//! one getter and one setter per field, named `<Type>_get_<field>` and
//! `<Type>_set_<field>`.
//!
//! ## Modules
//!
//! - [`schema`] — record/field/type model and TOML schema parsing
//! - [`generate`] — accessor function units and record units
//! - [`render`] — C header and source text for a record unit

pub mod error;
pub mod generate;
pub mod render;
pub mod schema;

pub use error::SchemaError;
pub use generate::{generate_accessors, generate_schema, AccessorFn, AccessorKind, RecordUnit};
pub use render::{render_header, render_source};
pub use schema::{FieldSpec, PointeeKind, RecordSpec, ScalarKind, SchemaFile, TypeRef};
