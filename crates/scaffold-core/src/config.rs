//! Render configuration.
//!
//! Controls the cosmetic side of the emitted C text. Loaded from TOML,
//! every key optional:
//!
//! ```toml
//! guard-prefix = "MYPROJECT_"
//! banner = true
//! negative-style = "zero"
//! indent = 2
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// How a false configuration symbol is written to a header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NegativeStyle {
    /// `/* #undef SYM */`, the autoconf convention.
    #[default]
    Undef,
    /// `#define SYM 0`, for `#if SYM` consumers.
    Zero,
}

/// Options shared by every text renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RenderConfig {
    /// Prefix prepended to include-guard macros.
    pub guard_prefix: String,
    /// Whether to emit the generated-file banner comment.
    pub banner: bool,
    /// Spelling of false symbols in configuration headers.
    pub negative_style: NegativeStyle,
    /// Spaces per indentation level in function bodies.
    pub indent: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            guard_prefix: String::new(),
            banner: true,
            negative_style: NegativeStyle::Undef,
            indent: 4,
        }
    }
}

impl RenderConfig {
    /// Parse a render configuration from a TOML string.
    pub fn parse(input: &str) -> Result<Self> {
        Ok(toml::from_str(input)?)
    }

    /// Indentation string for one level.
    pub fn indent_str(&self) -> String {
        " ".repeat(self.indent)
    }
}
