//! Record schema model and TOML schema parsing.
//!
//! A schema file declares one or more records:
//!
//! ```toml
//! [[records]]
//! name = "User"
//!
//! [[records.fields]]
//! name = "id"
//! type = "int"
//!
//! [[records.fields]]
//! name = "name"
//! type = "char*"
//! ```

use std::collections::HashSet;

use scaffold_core::ctype::CType;
use scaffold_core::error::CoreError;
use scaffold_core::ident::validate_identifier;
use serde::Deserialize;

use crate::error::{Result, SchemaError};

/// An arithmetic C type stored and passed by copy.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScalarKind(CType);

impl ScalarKind {
    pub const CHAR: ScalarKind = ScalarKind(CType::Char);
    pub const INT: ScalarKind = ScalarKind(CType::Int);
    pub const LONG: ScalarKind = ScalarKind(CType::Long);
    pub const FLOAT: ScalarKind = ScalarKind(CType::Float);
    pub const DOUBLE: ScalarKind = ScalarKind(CType::Double);
    pub const BOOL: ScalarKind = ScalarKind(CType::Bool);
    pub const SIZE: ScalarKind = ScalarKind(CType::SizeT);

    /// Wrap an unqualified arithmetic type; anything else is rejected.
    pub fn new(ty: CType) -> Option<Self> {
        (ty.is_arithmetic() && !matches!(ty, CType::Const(_))).then_some(ScalarKind(ty))
    }

    /// The underlying C type.
    pub fn c_type(&self) -> &CType {
        &self.0
    }
}

/// What a pointer field points at.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PointeeKind {
    /// `char*`: a string the record holds by pointer.
    String,
    /// `const char*`: a string the record only borrows.
    BorrowedString,
    /// `void*`: an opaque handle.
    Opaque,
    /// Pointer to an arithmetic value.
    Scalar(ScalarKind),
}

impl PointeeKind {
    /// The C type of the pointer itself.
    pub fn c_type(&self) -> CType {
        match self {
            PointeeKind::String => CType::Char.pointer_to(),
            PointeeKind::BorrowedString => CType::Const(Box::new(CType::Char)).pointer_to(),
            PointeeKind::Opaque => CType::Void.pointer_to(),
            PointeeKind::Scalar(kind) => kind.c_type().clone().pointer_to(),
        }
    }
}

/// The type of a record field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// Copied in and out by value.
    Scalar(ScalarKind),
    /// Stored as a bare pointer; ownership is the caller's business.
    Pointer(PointeeKind),
}

impl TypeRef {
    /// Parse a C type string into a field type.
    pub fn parse(input: &str) -> scaffold_core::error::Result<Self> {
        Self::from_ctype(&CType::parse(input)?)
    }

    /// Classify a parsed C type as a field type.
    ///
    /// Only unqualified arithmetic types and single-level pointers to
    /// `char`, `const char`, `void`, or an arithmetic type are storable.
    pub fn from_ctype(ty: &CType) -> scaffold_core::error::Result<Self> {
        let unsupported = |detail: &str| CoreError::InvalidType {
            detail: detail.to_string(),
        };

        match ty {
            CType::Pointer(inner) => match inner.as_ref() {
                CType::Char => Ok(TypeRef::Pointer(PointeeKind::String)),
                CType::Const(c) if **c == CType::Char => {
                    Ok(TypeRef::Pointer(PointeeKind::BorrowedString))
                }
                CType::Void => Ok(TypeRef::Pointer(PointeeKind::Opaque)),
                other => ScalarKind::new(other.clone())
                    .map(|kind| TypeRef::Pointer(PointeeKind::Scalar(kind)))
                    .ok_or_else(|| unsupported(&format!("unsupported pointee '{other}'"))),
            },
            CType::Const(_) => Err(unsupported("const-qualified fields cannot have a setter")),
            CType::Void => Err(unsupported("void is not a storable field type")),
            CType::Struct(_) | CType::Named(_) => {
                Err(unsupported("aggregate fields are not supported"))
            }
            other => ScalarKind::new(other.clone())
                .map(TypeRef::Scalar)
                .ok_or_else(|| unsupported(&format!("unsupported type '{other}'"))),
        }
    }

    /// The C type of the stored field.
    pub fn c_type(&self) -> CType {
        match self {
            TypeRef::Scalar(kind) => kind.c_type().clone(),
            TypeRef::Pointer(pointee) => pointee.c_type(),
        }
    }

    /// Whether the field is pointer-typed.
    pub fn is_pointer(&self) -> bool {
        matches!(self, TypeRef::Pointer(_))
    }
}

impl std::fmt::Display for TypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.c_type())
    }
}

/// A named, typed field of a record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldSpec {
    pub name: String,
    pub ty: TypeRef,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// A record type with an ordered field list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordSpec {
    type_name: String,
    fields: Vec<FieldSpec>,
}

impl RecordSpec {
    /// Create a record with no fields.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field, builder style.
    pub fn field(mut self, name: impl Into<String>, ty: TypeRef) -> Self {
        self.fields.push(FieldSpec::new(name, ty));
        self
    }

    /// Create a record from an existing field list.
    pub fn with_fields(type_name: impl Into<String>, fields: Vec<FieldSpec>) -> Self {
        Self {
            type_name: type_name.into(),
            fields,
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Check names: a valid type name, and non-empty, valid, unique field names.
    pub fn validate(&self) -> Result<()> {
        validate_identifier(&self.type_name).map_err(|e| SchemaError::InvalidRecordName {
            record: self.type_name.clone(),
            reason: identifier_reason(e),
        })?;

        let mut seen = HashSet::new();
        for (index, field) in self.fields.iter().enumerate() {
            if field.name.is_empty() {
                return Err(SchemaError::EmptyFieldName {
                    record: self.type_name.clone(),
                    index,
                });
            }
            validate_identifier(&field.name).map_err(|e| SchemaError::InvalidFieldName {
                record: self.type_name.clone(),
                field: field.name.clone(),
                reason: identifier_reason(e),
            })?;
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField {
                    record: self.type_name.clone(),
                    field: field.name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Parse a single record from a TOML document with top-level
    /// `name` and `[[fields]]`.
    pub fn parse_toml(input: &str) -> Result<Self> {
        let raw: RawRecord = toml::from_str(input)?;
        raw.into_spec()
    }
}

/// Canonical one-line form, used as the digest input for generated files.
impl std::fmt::Display for RecordSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {{", self.type_name)?;
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, " {}: {}", field.name, field.ty)?;
        }
        write!(f, " }}")
    }
}

fn identifier_reason(err: CoreError) -> String {
    match err {
        CoreError::InvalidIdentifier { reason, .. } => reason,
        other => other.to_string(),
    }
}

/// A parsed schema document holding several records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaFile {
    pub records: Vec<RecordSpec>,
}

impl SchemaFile {
    /// Parse a schema from a TOML string.
    ///
    /// Field types are resolved here, so an unknown type fails with
    /// [`SchemaError::UnknownType`] naming the record and field.
    pub fn parse(input: &str) -> Result<Self> {
        let raw: RawSchema = toml::from_str(input)?;
        let records = raw
            .records
            .into_iter()
            .map(RawRecord::into_spec)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { records })
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSchema {
    #[serde(default)]
    records: Vec<RawRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRecord {
    name: String,
    #[serde(default)]
    fields: Vec<RawField>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawField {
    name: String,
    #[serde(rename = "type")]
    type_name: String,
}

impl RawRecord {
    fn into_spec(self) -> Result<RecordSpec> {
        let mut fields = Vec::with_capacity(self.fields.len());
        for raw in self.fields {
            let ty = TypeRef::parse(&raw.type_name).map_err(|e| SchemaError::UnknownType {
                record: self.name.clone(),
                field: raw.name.clone(),
                type_name: raw.type_name.clone(),
                detail: e.to_string(),
            })?;
            fields.push(FieldSpec::new(raw.name, ty));
        }
        Ok(RecordSpec::with_fields(self.name, fields))
    }
}
