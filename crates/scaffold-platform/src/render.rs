//! `config.h` rendering.

use scaffold_core::config::{NegativeStyle, RenderConfig};
use scaffold_core::digest::ContentDigest;
use scaffold_core::text::{banner, comment_text, include_guard};

use crate::generate::ConfigResult;
use crate::triple::HostTriple;

/// File name the header is guarded as.
pub const CONFIG_HEADER_NAME: &str = "config.h";

/// Render a configuration header.
///
/// True symbols become `#define SYM 1`. False symbols are still written,
/// as `/* #undef SYM */` or `#define SYM 0` depending on
/// [`RenderConfig::negative_style`].
pub fn render_config_header(
    result: &ConfigResult,
    host: &HostTriple,
    config: &RenderConfig,
) -> String {
    let guard = include_guard(CONFIG_HEADER_NAME, config);
    let digest = ContentDigest::compute(format!("host={host}\n{}", result.canonical()).as_bytes());

    let mut text = banner(&format!("host {host}"), &digest, config);
    text.push_str(&format!("#ifndef {guard}\n#define {guard}\n\n"));
    text.push_str(&format!("/* Host: {} */\n", comment_text(host.as_str())));

    for (symbol, value) in result.iter() {
        let line = match (value, config.negative_style) {
            (true, _) => format!("#define {symbol} 1\n"),
            (false, NegativeStyle::Undef) => format!("/* #undef {symbol} */\n"),
            (false, NegativeStyle::Zero) => format!("#define {symbol} 0\n"),
        };
        text.push_str(&line);
    }

    text.push_str(&format!("\n#endif /* {guard} */\n"));
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::generate_config;
    use crate::probe::{FunctionAvailability, ProbeSpec};

    const LINUX: &str = "x86_64-pc-linux-gnu";

    fn result() -> ConfigResult {
        let probes = vec![
            ProbeSpec::host_pattern("OS_LINUX", "*-linux*"),
            ProbeSpec::host_pattern("OS_MACOS", "*-darwin*"),
            ProbeSpec::function_exists("getopt"),
        ];
        let avail: FunctionAvailability = [("getopt", true)].into_iter().collect();
        generate_config(LINUX, &probes, &avail).unwrap()
    }

    #[test]
    fn autoconf_style_header() {
        let cfg = RenderConfig {
            banner: false,
            ..RenderConfig::default()
        };
        let host = HostTriple::parse(LINUX).unwrap();
        let expected = "\
#ifndef CONFIG_H
#define CONFIG_H

/* Host: x86_64-pc-linux-gnu */
#define OS_LINUX 1
/* #undef OS_MACOS */
#define HAVE_GETOPT 1

#endif /* CONFIG_H */
";
        assert_eq!(render_config_header(&result(), &host, &cfg), expected);
    }

    #[test]
    fn zero_style_negatives() {
        let cfg = RenderConfig {
            banner: false,
            negative_style: NegativeStyle::Zero,
            guard_prefix: "MYPROJECT_".into(),
            ..RenderConfig::default()
        };
        let host = HostTriple::parse(LINUX).unwrap();
        let text = render_config_header(&result(), &host, &cfg);
        assert!(text.contains("#define OS_MACOS 0\n"));
        assert!(!text.contains("#undef"));
        assert!(text.starts_with("#ifndef MYPROJECT_CONFIG_H\n"));
    }

    #[test]
    fn banner_is_deterministic() {
        let host = HostTriple::parse(LINUX).unwrap();
        let cfg = RenderConfig::default();
        let a = render_config_header(&result(), &host, &cfg);
        let b = render_config_header(&result(), &host, &cfg);
        assert_eq!(a, b);
        assert!(a.starts_with("/* Generated by scaffold from host x86_64-pc-linux-gnu."));
    }

    #[test]
    fn host_cannot_escape_comments() {
        let raw = "x86_64-*/int bogus;/*-linux-gnu";
        let host = HostTriple::parse(raw).unwrap();
        let probes = vec![ProbeSpec::host_pattern("OS_LINUX", "*-linux*")];
        let result = generate_config(raw, &probes, &FunctionAvailability::new()).unwrap();
        let text = render_config_header(&result, &host, &RenderConfig::default());

        assert!(text.contains("/* Host: x86_64-* /int bogus;/*-linux-gnu */\n"));
        assert!(text.contains("from host x86_64-* /int bogus;/*-linux-gnu. Do not edit."));
        assert!(!text.contains("*/int"));
    }

    #[test]
    fn every_symbol_written() {
        let host = HostTriple::parse(LINUX).unwrap();
        let text = render_config_header(&result(), &host, &RenderConfig::default());
        for (symbol, _) in result().iter() {
            assert!(text.contains(symbol), "{symbol} missing");
        }
    }
}
