//! Accessor generation.
//!
//! Every field yields a getter and a setter, in field order. Both take a
//! pointer to the record as their receiver. Scalars go in and out by
//! copy. Pointers are handed out and stored as-is, and the setter never
//! frees what it replaces. Accessors do not allocate or validate values.

use std::collections::{HashMap, HashSet};

use scaffold_core::ctype::CType;
use scaffold_core::digest::ContentDigest;
use tracing::debug;

use crate::error::{Result, SchemaError};
use crate::schema::{FieldSpec, RecordSpec, SchemaFile};

/// Ownership note attached to pointer getters.
pub const POINTER_GETTER_NOTE: &str =
    "Returns the stored pointer. Ownership is not transferred; the caller must not free it.";

/// Ownership note attached to pointer setters.
pub const POINTER_SETTER_NOTE: &str = "Stores the pointer as-is. The previous value is \
     replaced, not freed; releasing it is the caller's responsibility.";

/// Name of the receiver parameter.
pub const RECEIVER: &str = "obj";

/// Name of the setter's value parameter.
pub const VALUE_PARAM: &str = "value";

/// Getter or setter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessorKind {
    Getter,
    Setter,
}

impl AccessorKind {
    /// The verb used in the function name.
    pub fn verb(&self) -> &'static str {
        match self {
            AccessorKind::Getter => "get",
            AccessorKind::Setter => "set",
        }
    }
}

/// What the body of an accessor does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessorBody {
    /// `return obj->field;`
    ReturnField,
    /// `obj->field = value;`
    StoreField,
}

/// A function parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Param {
    pub name: String,
    pub ty: CType,
}

/// One generated accessor function.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccessorFn {
    /// `<Type>_get_<field>` or `<Type>_set_<field>`.
    pub name: String,
    pub kind: AccessorKind,
    /// Record type name.
    pub record: String,
    /// Field the accessor reads or writes.
    pub field: String,
    /// Receiver first, then the value for setters.
    pub params: Vec<Param>,
    /// Field type for getters, `void` for setters.
    pub returns: CType,
    pub body: AccessorBody,
    /// Ownership contract for pointer-typed fields.
    pub ownership_note: Option<&'static str>,
}

impl AccessorFn {
    fn getter(record: &str, field: &FieldSpec) -> Self {
        let pointer = field.ty.is_pointer();
        Self {
            name: accessor_name(record, AccessorKind::Getter, &field.name),
            kind: AccessorKind::Getter,
            record: record.to_string(),
            field: field.name.clone(),
            params: vec![receiver(record)],
            returns: field.ty.c_type(),
            body: AccessorBody::ReturnField,
            ownership_note: pointer.then_some(POINTER_GETTER_NOTE),
        }
    }

    fn setter(record: &str, field: &FieldSpec) -> Self {
        let pointer = field.ty.is_pointer();
        Self {
            name: accessor_name(record, AccessorKind::Setter, &field.name),
            kind: AccessorKind::Setter,
            record: record.to_string(),
            field: field.name.clone(),
            params: vec![
                receiver(record),
                Param {
                    name: VALUE_PARAM.to_string(),
                    ty: field.ty.c_type(),
                },
            ],
            returns: CType::Void,
            body: AccessorBody::StoreField,
            ownership_note: pointer.then_some(POINTER_SETTER_NOTE),
        }
    }

    /// C prototype without the trailing semicolon, e.g.
    /// `void User_set_id(User* obj, int value)`.
    pub fn prototype(&self) -> String {
        let params = self
            .params
            .iter()
            .map(|p| format!("{} {}", p.ty, p.name))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{} {}({params})", self.returns, self.name)
    }

    /// The single statement making up the body.
    pub fn statement(&self) -> String {
        match self.body {
            AccessorBody::ReturnField => format!("return {RECEIVER}->{};", self.field),
            AccessorBody::StoreField => format!("{RECEIVER}->{} = {VALUE_PARAM};", self.field),
        }
    }
}

/// `<Type>_<verb>_<field>`.
pub fn accessor_name(record: &str, kind: AccessorKind, field: &str) -> String {
    format!("{record}_{}_{field}", kind.verb())
}

fn receiver(record: &str) -> Param {
    Param {
        name: RECEIVER.to_string(),
        ty: CType::Named(record.to_string()).pointer_to(),
    }
}

/// Generate the getter and setter for every field of `record`.
///
/// Validation runs first; on error nothing is produced. A record with no
/// fields yields an empty list.
pub fn generate_accessors(record: &RecordSpec) -> Result<Vec<AccessorFn>> {
    record.validate()?;

    let accessors: Vec<AccessorFn> = record
        .fields()
        .iter()
        .flat_map(|field| {
            [
                AccessorFn::getter(record.type_name(), field),
                AccessorFn::setter(record.type_name(), field),
            ]
        })
        .collect();

    debug!(
        record = record.type_name(),
        fields = record.fields().len(),
        accessors = accessors.len(),
        "generated accessors"
    );
    Ok(accessors)
}

/// A record's full output: the type itself plus its accessors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordUnit<'a> {
    pub spec: &'a RecordSpec,
    pub accessors: Vec<AccessorFn>,
    /// Digest of the canonical schema text.
    pub digest: ContentDigest,
}

impl<'a> RecordUnit<'a> {
    /// Validate `spec` and generate its accessors.
    pub fn build(spec: &'a RecordSpec) -> Result<Self> {
        let accessors = generate_accessors(spec)?;
        let digest = ContentDigest::compute(spec.to_string().as_bytes());
        Ok(Self {
            spec,
            accessors,
            digest,
        })
    }

    /// Header file name, e.g. `user.h`.
    pub fn header_name(&self) -> String {
        format!("{}.h", self.spec.type_name().to_lowercase())
    }

    /// Source file name, e.g. `user.c`.
    pub fn source_name(&self) -> String {
        format!("{}.c", self.spec.type_name().to_lowercase())
    }

    /// Whether the record has no fields and renders as an opaque type.
    pub fn is_opaque(&self) -> bool {
        self.spec.fields().is_empty()
    }
}

/// Generate every record in a schema, all-or-nothing.
///
/// Besides per-record validation, records must not share a type name,
/// an output file name, or a generated function name.
pub fn generate_schema(schema: &SchemaFile) -> Result<Vec<RecordUnit<'_>>> {
    let mut seen = HashSet::new();
    for record in &schema.records {
        if !seen.insert(record.type_name()) {
            return Err(SchemaError::DuplicateRecord {
                record: record.type_name().to_string(),
            });
        }
    }

    let units = schema
        .records
        .iter()
        .map(RecordUnit::build)
        .collect::<Result<Vec<_>>>()?;

    let mut files: HashMap<String, &str> = HashMap::new();
    let mut functions: HashMap<&str, &str> = HashMap::new();
    for unit in &units {
        let record = unit.spec.type_name();
        if let Some(first) = files.insert(unit.header_name(), record) {
            return Err(SchemaError::FileNameCollision {
                first: first.to_string(),
                second: record.to_string(),
                file: unit.header_name(),
            });
        }
        for accessor in &unit.accessors {
            if let Some(first) = functions.insert(&accessor.name, record) {
                return Err(SchemaError::AccessorCollision {
                    name: accessor.name.clone(),
                    first: first.to_string(),
                    second: record.to_string(),
                });
            }
        }
    }

    debug!(records = units.len(), "generated schema");
    Ok(units)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{PointeeKind, ScalarKind, TypeRef};

    fn user() -> RecordSpec {
        RecordSpec::new("User")
            .field("id", TypeRef::Scalar(ScalarKind::INT))
            .field("name", TypeRef::Pointer(PointeeKind::String))
            .field("age", TypeRef::Scalar(ScalarKind::INT))
    }

    fn names(accessors: &[AccessorFn]) -> Vec<&str> {
        accessors.iter().map(|a| a.name.as_str()).collect()
    }

    #[test]
    fn user_accessor_names_in_field_order() {
        let accessors = generate_accessors(&user()).unwrap();
        assert_eq!(
            names(&accessors),
            vec![
                "User_get_id",
                "User_set_id",
                "User_get_name",
                "User_set_name",
                "User_get_age",
                "User_set_age",
            ]
        );
    }

    #[test]
    fn two_accessors_per_field() {
        let mut rec = RecordSpec::new("Wide");
        for i in 0..17 {
            rec = rec.field(format!("f{i}"), TypeRef::Scalar(ScalarKind::DOUBLE));
        }
        let accessors = generate_accessors(&rec).unwrap();
        assert_eq!(accessors.len(), 34);
        assert!(accessors.iter().step_by(2).all(|a| a.kind == AccessorKind::Getter));
        assert!(accessors.iter().skip(1).step_by(2).all(|a| a.kind == AccessorKind::Setter));
    }

    #[test]
    fn scalar_accessors_copy() {
        let accessors = generate_accessors(&user()).unwrap();
        let get = &accessors[0];
        assert_eq!(get.prototype(), "int User_get_id(User* obj)");
        assert_eq!(get.statement(), "return obj->id;");
        assert!(get.ownership_note.is_none());

        let set = &accessors[1];
        assert_eq!(set.prototype(), "void User_set_id(User* obj, int value)");
        assert_eq!(set.statement(), "obj->id = value;");
        assert_eq!(set.returns, CType::Void);
        assert!(set.ownership_note.is_none());
    }

    #[test]
    fn pointer_accessors_carry_ownership_notes() {
        let accessors = generate_accessors(&user()).unwrap();
        let get = &accessors[2];
        assert_eq!(get.prototype(), "char* User_get_name(User* obj)");
        assert_eq!(get.ownership_note, Some(POINTER_GETTER_NOTE));

        let set = &accessors[3];
        assert_eq!(set.prototype(), "void User_set_name(User* obj, char* value)");
        assert_eq!(set.body, AccessorBody::StoreField);
        assert_eq!(set.ownership_note, Some(POINTER_SETTER_NOTE));
    }

    #[test]
    fn deterministic_output() {
        let a = generate_accessors(&user()).unwrap();
        let b = generate_accessors(&user()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn duplicate_field_produces_nothing() {
        let rec = user().field("name", TypeRef::Pointer(PointeeKind::BorrowedString));
        let err = generate_accessors(&rec).unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateField { ref field, .. } if field == "name"));
    }

    #[test]
    fn zero_fields_is_valid() {
        let rec = RecordSpec::new("Handle");
        assert!(generate_accessors(&rec).unwrap().is_empty());
        let unit = RecordUnit::build(&rec).unwrap();
        assert!(unit.is_opaque());
    }

    #[test]
    fn unit_file_names_and_digest() {
        let rec = user();
        let unit = RecordUnit::build(&rec).unwrap();
        assert_eq!(unit.header_name(), "user.h");
        assert_eq!(unit.source_name(), "user.c");
        assert_eq!(unit.digest, ContentDigest::compute(rec.to_string().as_bytes()));

        let changed = user().field("email", TypeRef::Pointer(PointeeKind::String));
        assert_ne!(RecordUnit::build(&changed).unwrap().digest, unit.digest);
    }

    #[test]
    fn schema_rejects_duplicate_records() {
        let schema = SchemaFile {
            records: vec![user(), RecordSpec::new("User")],
        };
        let err = generate_schema(&schema).unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateRecord { ref record } if record == "User"));
    }

    #[test]
    fn schema_is_all_or_nothing() {
        let bad = RecordSpec::new("Order")
            .field("id", TypeRef::Scalar(ScalarKind::INT))
            .field("id", TypeRef::Scalar(ScalarKind::INT));
        let schema = SchemaFile {
            records: vec![user(), bad],
        };
        assert!(generate_schema(&schema).is_err());
    }

    #[test]
    fn schema_rejects_records_sharing_a_file() {
        let schema = SchemaFile {
            records: vec![user(), RecordSpec::new("USER")],
        };
        match generate_schema(&schema).unwrap_err() {
            SchemaError::FileNameCollision { first, second, file } => {
                assert_eq!(first, "User");
                assert_eq!(second, "USER");
                assert_eq!(file, "user.h");
            }
            other => panic!("expected FileNameCollision, got {other:?}"),
        }
    }

    #[test]
    fn schema_rejects_colliding_accessor_names() {
        let a = RecordSpec::new("A").field("b_get_c", TypeRef::Scalar(ScalarKind::INT));
        let b = RecordSpec::new("A_get_b").field("c", TypeRef::Scalar(ScalarKind::INT));
        let schema = SchemaFile {
            records: vec![a, b],
        };
        match generate_schema(&schema).unwrap_err() {
            SchemaError::AccessorCollision { name, first, second } => {
                assert_eq!(name, "A_get_b_get_c");
                assert_eq!(first, "A");
                assert_eq!(second, "A_get_b");
            }
            other => panic!("expected AccessorCollision, got {other:?}"),
        }
    }

    #[test]
    fn schema_with_distinct_records_succeeds() {
        let order = RecordSpec::new("Order")
            .field("order_id", TypeRef::Scalar(ScalarKind::INT))
            .field("amount", TypeRef::Scalar(ScalarKind::FLOAT))
            .field("status", TypeRef::Pointer(PointeeKind::String));
        let schema = SchemaFile {
            records: vec![user(), order],
        };
        let units = generate_schema(&schema).unwrap();
        assert_eq!(units.len(), 2);
        assert_eq!(units[1].accessors.len(), 6);
    }

    #[test]
    fn parallel_generation_is_identical() {
        let rec = user();
        let expected = generate_accessors(&rec).unwrap();
        std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| s.spawn(|| generate_accessors(&rec).unwrap()))
                .collect();
            for h in handles {
                assert_eq!(h.join().unwrap(), expected);
            }
        });
    }
}
