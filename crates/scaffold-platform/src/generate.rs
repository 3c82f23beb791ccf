//! Probe evaluation.
//!
//! Every probe is evaluated on its own and yields exactly one entry, true
//! or false, in declared order. No exclusivity is applied between
//! probes: if two host patterns both match, both symbols are true, and
//! keeping a classification disjoint is up to whoever writes the
//! patterns.

use std::collections::HashSet;

use scaffold_core::error::CoreError;
use scaffold_core::ident::{validate_identifier, validate_spelling};
use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::{debug, trace};

use crate::error::{ConfigError, Result};
use crate::pattern::HostPattern;
use crate::probe::{FunctionAvailability, ProbeKind, ProbeSpec};
use crate::triple::HostTriple;

/// Symbol values in declared probe order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigResult {
    entries: Vec<(String, bool)>,
}

impl ConfigResult {
    /// Value of `symbol`, if it was declared.
    pub fn get(&self, symbol: &str) -> Option<bool> {
        self.entries.iter().find(|(s, _)| s == symbol).map(|(_, v)| *v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in declared order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.entries.iter().map(|(s, v)| (s.as_str(), *v))
    }

    /// Symbols that evaluated true.
    pub fn enabled(&self) -> impl Iterator<Item = &str> {
        self.iter().filter(|(_, v)| *v).map(|(s, _)| s)
    }

    /// Build variables as a JSON object, keys in declared order.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Canonical `SYMBOL=0|1` lines, used as the digest input for headers.
    pub fn canonical(&self) -> String {
        self.iter()
            .map(|(s, v)| format!("{s}={}\n", u8::from(v)))
            .collect()
    }
}

impl Serialize for ConfigResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (symbol, value) in &self.entries {
            map.serialize_entry(symbol, value)?;
        }
        map.end()
    }
}

/// A probe that passed validation.
enum Compiled<'a> {
    Host(HostPattern),
    Function(&'a str),
}

/// Evaluate `probes` against `host` and the caller's function
/// availability.
///
/// The whole probe set is validated before anything is evaluated, so an
/// error never comes with a partial result.
pub fn generate_config(
    host: &str,
    probes: &[ProbeSpec],
    available: &FunctionAvailability,
) -> Result<ConfigResult> {
    let host = HostTriple::parse(host)?;
    let compiled = compile(probes)?;

    let entries: Vec<(String, bool)> = probes
        .iter()
        .zip(&compiled)
        .map(|(probe, check)| {
            let value = match check {
                Compiled::Host(pattern) => pattern.matches(host.as_str()),
                Compiled::Function(function) => available.is_available(function),
            };
            trace!(symbol = probe.symbol.as_str(), value, "evaluated probe");
            (probe.symbol.clone(), value)
        })
        .collect();

    let result = ConfigResult { entries };
    debug!(
        host = host.as_str(),
        probes = result.len(),
        enabled = result.enabled().count(),
        "generated platform config"
    );
    Ok(result)
}

fn compile(probes: &[ProbeSpec]) -> Result<Vec<Compiled<'_>>> {
    let mut seen = HashSet::new();
    let mut compiled = Vec::with_capacity(probes.len());

    for probe in probes {
        check_identifier(&probe.symbol, validate_identifier)?;
        if !seen.insert(probe.symbol.as_str()) {
            return Err(ConfigError::DuplicateSymbol {
                symbol: probe.symbol.clone(),
            });
        }

        let check = match &probe.kind {
            ProbeKind::HostPattern(pattern) => {
                let matcher =
                    HostPattern::parse(pattern).map_err(|reason| ConfigError::MalformedPattern {
                        symbol: probe.symbol.clone(),
                        pattern: pattern.clone(),
                        reason: reason.to_string(),
                    })?;
                Compiled::Host(matcher)
            }
            ProbeKind::FunctionExists(function) => {
                check_identifier(function, validate_spelling)?;
                Compiled::Function(function)
            }
        };
        compiled.push(check);
    }
    Ok(compiled)
}

fn check_identifier(
    name: &str,
    validate: fn(&str) -> scaffold_core::error::Result<()>,
) -> Result<()> {
    validate(name).map_err(|e| match e {
        CoreError::InvalidIdentifier { name, reason } => {
            ConfigError::InvalidIdentifier { name, reason }
        }
        other => ConfigError::InvalidIdentifier {
            name: name.to_string(),
            reason: other.to_string(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::standard_os_probes;

    const LINUX: &str = "x86_64-pc-linux-gnu";

    fn os_probes() -> Vec<ProbeSpec> {
        vec![
            ProbeSpec::host_pattern("OS_LINUX", "*-linux*"),
            ProbeSpec::host_pattern("OS_MACOS", "*-darwin*"),
        ]
    }

    #[test]
    fn linux_host_classification() {
        let result = generate_config(LINUX, &os_probes(), &FunctionAvailability::new()).unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result.get("OS_LINUX"), Some(true));
        assert_eq!(result.get("OS_MACOS"), Some(false));
        assert_eq!(result.get("OS_WINDOWS"), None);
    }

    #[test]
    fn darwin_host_classification() {
        let result = generate_config(
            "aarch64-apple-darwin23.1.0",
            &standard_os_probes(),
            &FunctionAvailability::new(),
        )
        .unwrap();
        assert_eq!(result.enabled().collect::<Vec<_>>(), vec!["OS_MACOS"]);
        assert_eq!(result.len(), 4);
    }

    #[test]
    fn overlapping_patterns_both_true() {
        let probes = vec![
            ProbeSpec::host_pattern("OS_LINUX", "*-linux*"),
            ProbeSpec::host_pattern("LINUX_GNU", "*linux-gnu*"),
        ];
        let result = generate_config(LINUX, &probes, &FunctionAvailability::new()).unwrap();
        assert_eq!(result.get("OS_LINUX"), Some(true));
        assert_eq!(result.get("LINUX_GNU"), Some(true));
    }

    #[test]
    fn one_entry_per_probe_in_order() {
        let mut probes = standard_os_probes();
        probes.push(ProbeSpec::function_exists("getopt"));
        probes.push(ProbeSpec::function_exists("strlcpy"));
        let avail: FunctionAvailability = [("getopt", true)].into_iter().collect();

        let result = generate_config(LINUX, &probes, &avail).unwrap();
        let symbols: Vec<_> = result.iter().map(|(s, _)| s).collect();
        assert_eq!(
            symbols,
            vec!["OS_LINUX", "OS_MACOS", "OS_WINDOWS", "OS_FREEBSD", "HAVE_GETOPT", "HAVE_STRLCPY"]
        );
        assert_eq!(result.get("HAVE_GETOPT"), Some(true));
        assert_eq!(result.get("HAVE_STRLCPY"), Some(false));
    }

    #[test]
    fn empty_probe_set() {
        let result = generate_config(LINUX, &[], &FunctionAvailability::new()).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn empty_host_rejected() {
        let err = generate_config("", &os_probes(), &FunctionAvailability::new()).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyHostTriple));
    }

    #[test]
    fn duplicate_symbol_rejected() {
        let probes = vec![
            ProbeSpec::host_pattern("OS_LINUX", "*-linux*"),
            ProbeSpec::host_pattern("OS_LINUX", "*-gnu*"),
        ];
        let err = generate_config(LINUX, &probes, &FunctionAvailability::new()).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateSymbol { ref symbol } if symbol == "OS_LINUX"));
    }

    #[test]
    fn malformed_pattern_names_probe() {
        let probes = vec![
            ProbeSpec::host_pattern("OS_LINUX", "*-linux*"),
            ProbeSpec::host_pattern("ODD", "x86*gnu"),
        ];
        let err = generate_config(LINUX, &probes, &FunctionAvailability::new()).unwrap_err();
        match err {
            ConfigError::MalformedPattern { symbol, pattern, .. } => {
                assert_eq!(symbol, "ODD");
                assert_eq!(pattern, "x86*gnu");
            }
            other => panic!("expected MalformedPattern, got {other:?}"),
        }
    }

    #[test]
    fn invalid_names_rejected() {
        let probes = vec![ProbeSpec::host_pattern("OS-LINUX", "*-linux*")];
        let err = generate_config(LINUX, &probes, &FunctionAvailability::new()).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidIdentifier { ref name, .. } if name == "OS-LINUX"
        ));

        let probes = vec![ProbeSpec::new("HAVE_X", ProbeKind::FunctionExists(String::new()))];
        let err = generate_config(LINUX, &probes, &FunctionAvailability::new()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidIdentifier { .. }));
    }

    #[test]
    fn reserved_function_names_pass_spelling_check() {
        let probes = vec![ProbeSpec::function_exists("_Exit")];
        let avail: FunctionAvailability = [("_Exit", true)].into_iter().collect();
        let result = generate_config(LINUX, &probes, &avail).unwrap();
        assert_eq!(result.get("HAVE__EXIT"), Some(true));
    }

    #[test]
    fn json_keeps_declared_order() {
        let probes = vec![
            ProbeSpec::host_pattern("OS_MACOS", "*-darwin*"),
            ProbeSpec::host_pattern("OS_LINUX", "*-linux*"),
        ];
        let result = generate_config(LINUX, &probes, &FunctionAvailability::new()).unwrap();
        assert_eq!(
            result.to_json().unwrap(),
            "{\n  \"OS_MACOS\": false,\n  \"OS_LINUX\": true\n}"
        );
        assert_eq!(result.canonical(), "OS_MACOS=0\nOS_LINUX=1\n");
    }

    #[test]
    fn repeated_and_parallel_evaluation_identical() {
        let probes = standard_os_probes();
        let avail = FunctionAvailability::new();
        let expected = generate_config(LINUX, &probes, &avail).unwrap();
        assert_eq!(generate_config(LINUX, &probes, &avail).unwrap(), expected);
        std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| s.spawn(|| generate_config(LINUX, &probes, &avail).unwrap()))
                .collect();
            for h in handles {
                assert_eq!(h.join().unwrap(), expected);
            }
        });
    }
}
