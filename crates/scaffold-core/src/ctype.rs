//! C type model and type-string parser.
//!
//! Handles the declarations that appear in record schemas: arithmetic
//! types, stdint types, `const` qualifiers, pointers, and named structs.
//! Does NOT handle function pointers, arrays, or attributes.

use crate::error::{CoreError, Result};

/// A C type representation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CType {
    Void,
    Char,
    SignedChar,
    UnsignedChar,
    Short,
    UnsignedShort,
    Int,
    UnsignedInt,
    Long,
    UnsignedLong,
    LongLong,
    UnsignedLongLong,
    Float,
    Double,
    LongDouble,
    // stdint types
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    SizeT,
    Bool,
    /// Pointer to another type.
    Pointer(Box<CType>),
    /// Const-qualified type.
    Const(Box<CType>),
    /// Struct reference (by name).
    Struct(String),
    /// Typedef'd name, e.g. the record type a receiver points at.
    Named(String),
}

impl CType {
    /// Parse a C type string such as `"unsigned long"` or `"const char *"`.
    pub fn parse(input: &str) -> Result<Self> {
        let tokens = tokenize(input);
        if tokens.is_empty() {
            return Err(CoreError::InvalidType {
                detail: "empty type".to_string(),
            });
        }

        let (base, consumed) = parse_base_type(&tokens)?;
        let mut ty = base;
        for tok in &tokens[consumed..] {
            match *tok {
                "*" => ty = CType::Pointer(Box::new(ty)),
                // `char* const`: a const pointer stores the same way
                "const" => {}
                other => {
                    return Err(CoreError::InvalidType {
                        detail: format!("unexpected token '{other}' in '{}'", input.trim()),
                    });
                }
            }
        }
        Ok(ty)
    }

    /// Pointer to `self`.
    pub fn pointer_to(self) -> Self {
        CType::Pointer(Box::new(self))
    }

    /// Strip const qualifiers from outer level.
    pub fn strip_const(&self) -> &CType {
        match self {
            CType::Const(inner) => inner.strip_const(),
            other => other,
        }
    }

    /// Whether this is an arithmetic (copyable scalar) type.
    pub fn is_arithmetic(&self) -> bool {
        !matches!(
            self.strip_const(),
            CType::Void | CType::Pointer(_) | CType::Struct(_) | CType::Named(_) | CType::Const(_)
        )
    }

    /// Whether emitting this type needs `<stdint.h>`.
    pub fn needs_stdint(&self) -> bool {
        match self {
            CType::Int8
            | CType::Int16
            | CType::Int32
            | CType::Int64
            | CType::UInt8
            | CType::UInt16
            | CType::UInt32
            | CType::UInt64 => true,
            CType::Pointer(inner) | CType::Const(inner) => inner.needs_stdint(),
            _ => false,
        }
    }

    /// Whether emitting this type needs `<stdbool.h>`.
    pub fn needs_stdbool(&self) -> bool {
        match self {
            CType::Bool => true,
            CType::Pointer(inner) | CType::Const(inner) => inner.needs_stdbool(),
            _ => false,
        }
    }

    /// Whether emitting this type needs `<stddef.h>`.
    pub fn needs_stddef(&self) -> bool {
        match self {
            CType::SizeT => true,
            CType::Pointer(inner) | CType::Const(inner) => inner.needs_stddef(),
            _ => false,
        }
    }
}

impl std::fmt::Display for CType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CType::Void => write!(f, "void"),
            CType::Char => write!(f, "char"),
            CType::SignedChar => write!(f, "signed char"),
            CType::UnsignedChar => write!(f, "unsigned char"),
            CType::Short => write!(f, "short"),
            CType::UnsignedShort => write!(f, "unsigned short"),
            CType::Int => write!(f, "int"),
            CType::UnsignedInt => write!(f, "unsigned int"),
            CType::Long => write!(f, "long"),
            CType::UnsignedLong => write!(f, "unsigned long"),
            CType::LongLong => write!(f, "long long"),
            CType::UnsignedLongLong => write!(f, "unsigned long long"),
            CType::Float => write!(f, "float"),
            CType::Double => write!(f, "double"),
            CType::LongDouble => write!(f, "long double"),
            CType::Int8 => write!(f, "int8_t"),
            CType::Int16 => write!(f, "int16_t"),
            CType::Int32 => write!(f, "int32_t"),
            CType::Int64 => write!(f, "int64_t"),
            CType::UInt8 => write!(f, "uint8_t"),
            CType::UInt16 => write!(f, "uint16_t"),
            CType::UInt32 => write!(f, "uint32_t"),
            CType::UInt64 => write!(f, "uint64_t"),
            CType::SizeT => write!(f, "size_t"),
            CType::Bool => write!(f, "bool"),
            CType::Pointer(inner) => write!(f, "{inner}*"),
            CType::Const(inner) => write!(f, "const {inner}"),
            CType::Struct(name) => write!(f, "struct {name}"),
            CType::Named(name) => write!(f, "{name}"),
        }
    }
}

/// Parse a type specifier from the front of a token sequence.
///
/// Returns the type and the number of tokens consumed.
fn parse_base_type(tokens: &[&str]) -> Result<(CType, usize)> {
    let mut pos = 0;
    let mut is_const = false;

    if tokens[pos] == "const" {
        is_const = true;
        pos += 1;
        if pos >= tokens.len() {
            return Err(CoreError::InvalidType {
                detail: "expected type after 'const'".to_string(),
            });
        }
    }

    let wrap = |ct: CType| if is_const { CType::Const(Box::new(ct)) } else { ct };

    if tokens[pos] == "struct" {
        pos += 1;
        let name = tokens
            .get(pos)
            .filter(|t| **t != "*")
            .ok_or_else(|| CoreError::InvalidType {
                detail: "expected struct name".to_string(),
            })?;
        return Ok((wrap(CType::Struct(name.to_string())), pos + 1));
    }

    let is_unsigned = tokens[pos] == "unsigned";
    let is_signed = tokens[pos] == "signed";

    if is_unsigned || is_signed {
        pos += 1;
        let next = tokens.get(pos).copied().unwrap_or("");
        let ct = match next {
            "char" => {
                pos += 1;
                if is_unsigned { CType::UnsignedChar } else { CType::SignedChar }
            }
            "short" => {
                pos += 1;
                if is_unsigned { CType::UnsignedShort } else { CType::Short }
            }
            "int" => {
                pos += 1;
                if is_unsigned { CType::UnsignedInt } else { CType::Int }
            }
            "long" => {
                pos += 1;
                if tokens.get(pos) == Some(&"long") {
                    pos += 1;
                    if is_unsigned { CType::UnsignedLongLong } else { CType::LongLong }
                } else if is_unsigned {
                    CType::UnsignedLong
                } else {
                    CType::Long
                }
            }
            // bare `unsigned` / `signed` means `unsigned int` / `int`
            _ => {
                if is_unsigned { CType::UnsignedInt } else { CType::Int }
            }
        };
        return Ok((wrap(ct), pos));
    }

    let ct = match tokens[pos] {
        "void" => CType::Void,
        "char" => CType::Char,
        "short" => CType::Short,
        "int" => CType::Int,
        "long" => match tokens.get(pos + 1) {
            Some(&"long") => {
                pos += 1;
                CType::LongLong
            }
            Some(&"double") => {
                pos += 1;
                CType::LongDouble
            }
            _ => CType::Long,
        },
        "float" => CType::Float,
        "double" => CType::Double,
        "_Bool" | "bool" => CType::Bool,
        "size_t" => CType::SizeT,
        "int8_t" => CType::Int8,
        "int16_t" => CType::Int16,
        "int32_t" => CType::Int32,
        "int64_t" => CType::Int64,
        "uint8_t" => CType::UInt8,
        "uint16_t" => CType::UInt16,
        "uint32_t" => CType::UInt32,
        "uint64_t" => CType::UInt64,
        other => {
            return Err(CoreError::InvalidType {
                detail: format!("unknown type '{other}'"),
            });
        }
    };
    Ok((wrap(ct), pos + 1))
}

/// Tokenize a C declaration fragment, splitting on whitespace but keeping `*` as separate tokens.
fn tokenize(s: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    for part in s.split_whitespace() {
        let mut remaining = part;
        while !remaining.is_empty() {
            if let Some(star_pos) = remaining.find('*') {
                if star_pos > 0 {
                    tokens.push(&remaining[..star_pos]);
                }
                tokens.push("*");
                remaining = &remaining[star_pos + 1..];
            } else {
                tokens.push(remaining);
                break;
            }
        }
    }
    tokens
}
