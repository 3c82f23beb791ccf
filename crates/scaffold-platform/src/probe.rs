//! Probe declarations.
//!
//! A probe names one boolean configuration symbol and says how to decide
//! it: by matching the host triple, or by looking up whether a function
//! is available. Availability itself comes from the caller; nothing here
//! compiles or links anything.
//!
//! Probe files are TOML:
//!
//! ```toml
//! [[probes]]
//! symbol = "OS_LINUX"
//! pattern = "*-linux*"
//!
//! [[probes]]
//! function = "getopt"      # symbol defaults to HAVE_GETOPT
//! ```

use std::collections::BTreeMap;

use scaffold_core::ident::macro_case;
use serde::Deserialize;

use crate::error::{ConfigError, Result};

/// How a probe is decided.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProbeKind {
    /// True when the host triple matches the glob.
    HostPattern(String),
    /// True when the caller reports the function as available.
    FunctionExists(String),
}

/// A named boolean fact about the target platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProbeSpec {
    pub symbol: String,
    pub kind: ProbeKind,
}

impl ProbeSpec {
    pub fn new(symbol: impl Into<String>, kind: ProbeKind) -> Self {
        Self {
            symbol: symbol.into(),
            kind,
        }
    }

    /// Host-pattern probe.
    pub fn host_pattern(symbol: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::new(symbol, ProbeKind::HostPattern(pattern.into()))
    }

    /// Function probe named the way `AC_CHECK_FUNCS` names it:
    /// `getopt` becomes `HAVE_GETOPT`.
    pub fn function_exists(function: impl Into<String>) -> Self {
        let function = function.into();
        Self::new(have_symbol(&function), ProbeKind::FunctionExists(function))
    }
}

/// `HAVE_<FUNCTION>`.
pub fn have_symbol(function: &str) -> String {
    format!("HAVE_{}", macro_case(function))
}

/// The classic host-OS classification.
///
/// The patterns are disjoint for well-formed triples, but nothing
/// enforces that; see [`crate::generate`].
pub fn standard_os_probes() -> Vec<ProbeSpec> {
    vec![
        ProbeSpec::host_pattern("OS_LINUX", "*-linux*"),
        ProbeSpec::host_pattern("OS_MACOS", "*-darwin*"),
        ProbeSpec::host_pattern("OS_WINDOWS", "*-mingw*"),
        ProbeSpec::host_pattern("OS_FREEBSD", "*-freebsd*"),
    ]
}

/// Caller-supplied answers for function probes.
///
/// Functions that were never recorded count as unavailable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FunctionAvailability(BTreeMap<String, bool>);

impl FunctionAvailability {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record whether `function` is available.
    pub fn set(&mut self, function: impl Into<String>, available: bool) -> &mut Self {
        self.0.insert(function.into(), available);
        self
    }

    pub fn is_available(&self, function: &str) -> bool {
        self.0.get(function).copied().unwrap_or(false)
    }
}

impl<S: Into<String>> FromIterator<(S, bool)> for FunctionAvailability {
    fn from_iter<I: IntoIterator<Item = (S, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// A parsed probe document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeFile {
    pub probes: Vec<ProbeSpec>,
}

impl ProbeFile {
    /// Parse probes from a TOML string.
    ///
    /// Each entry needs exactly one of `pattern` or `function`. `symbol`
    /// is required for pattern probes and defaults to `HAVE_<FUNCTION>`
    /// for function probes.
    pub fn parse(input: &str) -> Result<Self> {
        let raw: RawProbeFile = toml::from_str(input)?;
        let probes = raw
            .probes
            .into_iter()
            .map(RawProbe::into_spec)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { probes })
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawProbeFile {
    #[serde(default)]
    probes: Vec<RawProbe>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawProbe {
    symbol: Option<String>,
    pattern: Option<String>,
    function: Option<String>,
}

impl RawProbe {
    fn into_spec(self) -> Result<ProbeSpec> {
        let label = self
            .symbol
            .clone()
            .or_else(|| self.function.as_deref().map(have_symbol))
            .unwrap_or_else(|| "<unnamed>".to_string());
        let invalid = |detail: &str| ConfigError::InvalidProbe {
            symbol: label.clone(),
            detail: detail.to_string(),
        };

        match (self.symbol, self.pattern, self.function) {
            (_, Some(_), Some(_)) => Err(invalid("has both 'pattern' and 'function'")),
            (_, None, None) => Err(invalid("needs one of 'pattern' or 'function'")),
            (Some(symbol), Some(pattern), None) => Ok(ProbeSpec::host_pattern(symbol, pattern)),
            (None, Some(_), None) => Err(invalid("pattern probes need a 'symbol'")),
            (Some(symbol), None, Some(function)) => {
                Ok(ProbeSpec::new(symbol, ProbeKind::FunctionExists(function)))
            }
            (None, None, Some(function)) => Ok(ProbeSpec::function_exists(function)),
        }
    }
}
