//! Shared vocabulary for the scaffold code generators.
//!
//! Both generators emit C-facing text, so the pieces they have in common
//! live here:
//!
//! - [`ident`] — C identifier validation
//! - [`ctype`] — C type model and type-string parser
//! - [`digest`] — SHA-256 content digests for generated-file banners
//! - [`config`] — render configuration loaded from TOML
//! - [`text`] — small helpers for emitting C source text

pub mod config;
pub mod ctype;
pub mod digest;
pub mod error;
pub mod ident;
pub mod text;

pub use config::{NegativeStyle, RenderConfig};
pub use ctype::CType;
pub use digest::ContentDigest;
pub use error::CoreError;
pub use ident::validate_identifier;
