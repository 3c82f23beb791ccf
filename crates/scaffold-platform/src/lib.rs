//! Platform configuration generation.
//!
//! Classifies a host triple and a set of feature probes into flat boolean
//! symbols for conditional compilation, in the spirit of an autoconf
//! `config.h`.
//!
//! ## Modules
//!
//! - [`triple`] — host-triple validation and component split
//! - [`pattern`] — the `*`-anchored glob used by host probes
//! - [`probe`] — probe declarations, probe files, function availability
//! - [`generate`] — probe evaluation into a [`ConfigResult`]
//! - [`render`] — `config.h` and JSON renderings of a result

pub mod error;
pub mod generate;
pub mod pattern;
pub mod probe;
pub mod render;
pub mod triple;

pub use error::ConfigError;
pub use generate::{generate_config, ConfigResult};
pub use pattern::HostPattern;
pub use probe::{standard_os_probes, FunctionAvailability, ProbeFile, ProbeKind, ProbeSpec};
pub use render::render_config_header;
pub use triple::HostTriple;
