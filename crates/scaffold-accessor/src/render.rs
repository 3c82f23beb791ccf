//! C text for a record unit.
//!
//! The header holds the struct typedef and prototypes; the source holds
//! the definitions. Pointer accessors get their ownership note as a
//! comment in both.

use scaffold_core::config::RenderConfig;
use scaffold_core::ctype::CType;
use scaffold_core::text::{banner, include_guard};

use crate::generate::{AccessorFn, AccessorKind, RecordUnit};

/// Render the header: banner, include guard, system includes, the struct
/// typedef, and one prototype per accessor.
///
/// A record without fields is declared opaque (`typedef struct T T;`).
pub fn render_header(unit: &RecordUnit<'_>, config: &RenderConfig) -> String {
    let header_name = unit.header_name();
    let guard = include_guard(&header_name, config);
    let type_name = unit.spec.type_name();
    let indent = config.indent_str();

    let mut text = banner(&format!("record {type_name}"), &unit.digest, config);
    text.push_str(&format!("#ifndef {guard}\n#define {guard}\n\n"));

    let includes = system_includes(unit);
    if !includes.is_empty() {
        for include in &includes {
            text.push_str(&format!("#include <{include}>\n"));
        }
        text.push('\n');
    }

    if unit.is_opaque() {
        text.push_str(&format!("typedef struct {type_name} {type_name};\n"));
    } else {
        text.push_str(&format!("typedef struct {type_name} {{\n"));
        for field in unit.spec.fields() {
            text.push_str(&format!("{indent}{} {};\n", field.ty, field.name));
        }
        text.push_str(&format!("}} {type_name};\n"));
    }

    for accessor in &unit.accessors {
        if accessor.kind == AccessorKind::Getter {
            text.push('\n');
        }
        push_note(&mut text, accessor);
        text.push_str(&format!("{};\n", accessor.prototype()));
    }

    text.push_str(&format!("\n#endif /* {guard} */\n"));
    text
}

/// Render the source file: banner, `#include` of the header, and one
/// definition per accessor.
pub fn render_source(unit: &RecordUnit<'_>, config: &RenderConfig) -> String {
    let indent = config.indent_str();

    let mut text = banner(&format!("record {}", unit.spec.type_name()), &unit.digest, config);
    text.push_str(&format!("#include \"{}\"\n", unit.header_name()));

    for accessor in &unit.accessors {
        text.push('\n');
        push_note(&mut text, accessor);
        text.push_str(&format!("{} {{\n", accessor.prototype()));
        text.push_str(&format!("{indent}{}\n", accessor.statement()));
        text.push_str("}\n");
    }
    text
}

fn push_note(text: &mut String, accessor: &AccessorFn) {
    if let Some(note) = accessor.ownership_note {
        text.push_str(&format!("/* {note} */\n"));
    }
}

/// Standard headers needed by the field types, in a fixed order.
fn system_includes(unit: &RecordUnit<'_>) -> Vec<&'static str> {
    let types: Vec<CType> = unit.spec.fields().iter().map(|f| f.ty.c_type()).collect();
    let mut includes = Vec::new();
    if types.iter().any(CType::needs_stdbool) {
        includes.push("stdbool.h");
    }
    if types.iter().any(CType::needs_stddef) {
        includes.push("stddef.h");
    }
    if types.iter().any(CType::needs_stdint) {
        includes.push("stdint.h");
    }
    includes
}
