//! C identifier rules.
//!
//! Record names, field names, and configuration symbols all end up as C
//! identifiers or parts of them, so they share one validator.

use crate::error::{CoreError, Result};

/// Keywords that may not be used as identifiers (C11 plus `bool`).
const RESERVED: &[&str] = &[
    "auto", "bool", "break", "case", "char", "const", "continue", "default", "do", "double",
    "else", "enum", "extern", "float", "for", "goto", "if", "inline", "int", "long",
    "register", "restrict", "return", "short", "signed", "sizeof", "static", "struct",
    "switch", "typedef", "union", "unsigned", "void", "volatile", "while", "_Alignas",
    "_Alignof", "_Atomic", "_Bool", "_Complex", "_Generic", "_Imaginary", "_Noreturn",
    "_Static_assert", "_Thread_local",
];

/// Names declared by the standard headers generated files include.
const STANDARD_NAMES: &[&str] = &[
    "size_t", "ptrdiff_t", "wchar_t", "max_align_t", "offsetof", "NULL", "true", "false",
    "int8_t", "int16_t", "int32_t", "int64_t", "uint8_t", "uint16_t", "uint32_t", "uint64_t",
    "intptr_t", "uintptr_t", "intmax_t", "uintmax_t",
];

/// Check that `name` is a valid C identifier.
///
/// Identifiers start with an ASCII letter or `_`, continue with ASCII
/// alphanumerics or `_`, and must not be a keyword, a name reserved for
/// the implementation (`__x`, `_X`), or a name from `<stddef.h>`,
/// `<stdbool.h>` or `<stdint.h>`.
pub fn validate_identifier(name: &str) -> Result<()> {
    validate_spelling(name)?;

    let invalid = |reason: &str| CoreError::InvalidIdentifier {
        name: name.to_string(),
        reason: reason.to_string(),
    };
    let first = name.chars().next().unwrap_or_default();
    if RESERVED.contains(&name) {
        return Err(invalid("reserved word"));
    }
    let second = name.chars().nth(1);
    if first == '_' && second.is_some_and(|c| c == '_' || c.is_ascii_uppercase()) {
        return Err(invalid("reserved for the implementation"));
    }
    if STANDARD_NAMES.contains(&name) {
        return Err(invalid("declared by a standard header"));
    }
    Ok(())
}

/// Check only the spelling of an identifier: non-empty, letter or `_`
/// first, then alphanumerics or `_`.
///
/// Used for names that refer to existing library symbols, such as
/// `_Exit`, which the stricter rules would reject.
pub fn validate_spelling(name: &str) -> Result<()> {
    let invalid = |reason: &str| CoreError::InvalidIdentifier {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    let mut chars = name.chars();
    let first = chars.next().ok_or_else(|| invalid("empty"))?;
    if !(first.is_ascii_alphabetic() || first == '_') {
        return Err(invalid("must start with a letter or '_'"));
    }
    if let Some(bad) = chars.find(|c| !(c.is_ascii_alphanumeric() || *c == '_')) {
        return Err(invalid(&format!("unexpected character '{bad}'")));
    }
    Ok(())
}

/// Whether `name` is a valid C identifier.
pub fn is_identifier(name: &str) -> bool {
    validate_identifier(name).is_ok()
}

/// Turn an arbitrary name into an upper-case macro fragment.
///
/// Non-alphanumeric characters become `_`, matching the way autoconf
/// derives `HAVE_*` symbols and include guards.
pub fn macro_case(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}
