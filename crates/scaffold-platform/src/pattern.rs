//! Host patterns.
//!
//! The grammar is the subset of shell `case` globs used for host
//! classification: literal text with an optional leading `*` and an
//! optional trailing `*`. Matching is case-sensitive and covers the whole
//! triple, so `*-linux*` matches `x86_64-pc-linux-gnu` but `-linux`
//! does not.

/// Characters with glob meaning that the grammar does not support.
const UNSUPPORTED: &[char] = &['*', '?', '[', ']'];

/// A compiled host pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HostPattern {
    literal: String,
    leading_wildcard: bool,
    trailing_wildcard: bool,
}

impl HostPattern {
    /// Compile a pattern, or return why it is malformed.
    pub fn parse(pattern: &str) -> Result<Self, &'static str> {
        if pattern.is_empty() {
            return Err("empty pattern");
        }

        let (leading_wildcard, rest) = match pattern.strip_prefix('*') {
            Some(rest) => (true, rest),
            None => (false, pattern),
        };
        let (trailing_wildcard, literal) = match rest.strip_suffix('*') {
            Some(literal) => (true, literal),
            None => (false, rest),
        };

        if literal.contains(UNSUPPORTED) {
            return Err("only a single leading and/or trailing '*' is supported");
        }

        Ok(Self {
            literal: literal.to_string(),
            leading_wildcard,
            trailing_wildcard,
        })
    }

    /// Whether the pattern matches the whole of `input`.
    pub fn matches(&self, input: &str) -> bool {
        let literal = self.literal.as_str();
        match (self.leading_wildcard, self.trailing_wildcard) {
            (true, true) => input.contains(literal),
            (true, false) => input.ends_with(literal),
            (false, true) => input.starts_with(literal),
            (false, false) => input == literal,
        }
    }
}

impl std::fmt::Display for HostPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let lead = if self.leading_wildcard { "*" } else { "" };
        let trail = if self.trailing_wildcard { "*" } else { "" };
        write!(f, "{lead}{}{trail}", self.literal)
    }
}
