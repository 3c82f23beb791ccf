//! Host triples.
//!
//! A triple is kept verbatim for pattern matching. The component split
//! mirrors `host_cpu`/`host_vendor`/`host_os` from `AC_CANONICAL_HOST`,
//! without config.sub's canonicalisation.

use crate::error::{ConfigError, Result};

/// OS names that may appear directly after the CPU when the vendor is
/// omitted, as in `x86_64-linux-gnu` or `wasm32-wasi`.
const VENDORLESS_OS: &[&str] = &["linux", "darwin", "wasi", "windows", "mingw32", "freebsd"];

/// A validated, non-empty host triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HostTriple(String);

impl HostTriple {
    /// Validate a host triple. Empty or whitespace-only input is rejected.
    pub fn parse(input: &str) -> Result<Self> {
        if input.trim().is_empty() {
            return Err(ConfigError::EmptyHostTriple);
        }
        Ok(HostTriple(input.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Architecture, e.g. `x86_64`.
    pub fn cpu(&self) -> &str {
        self.parts().0
    }

    /// Vendor, e.g. `pc` or `apple`; `None` for vendorless triples.
    pub fn vendor(&self) -> Option<&str> {
        self.parts().1
    }

    /// Operating system, e.g. `linux` or `darwin23.1.0`.
    pub fn os(&self) -> Option<&str> {
        self.parts().2
    }

    /// Environment/ABI suffix, e.g. `gnu` or `musleabihf`.
    pub fn env(&self) -> Option<&str> {
        self.parts().3
    }

    fn parts(&self) -> (&str, Option<&str>, Option<&str>, Option<&str>) {
        let mut it = self.0.splitn(2, '-');
        let cpu = it.next().unwrap_or_default();
        let Some(rest) = it.next() else {
            return (cpu, None, None, None);
        };

        let (first, tail) = match rest.split_once('-') {
            Some((first, tail)) => (first, Some(tail)),
            None => (rest, None),
        };
        let vendorless = tail.is_none() || VENDORLESS_OS.iter().any(|os| first.starts_with(os));
        if vendorless {
            return (cpu, None, Some(first), tail);
        }

        let tail = tail.unwrap_or_default();
        match tail.split_once('-') {
            Some((os, env)) => (cpu, Some(first), Some(os), Some(env)),
            None => (cpu, Some(first), Some(tail), None),
        }
    }
}

impl std::fmt::Display for HostTriple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
