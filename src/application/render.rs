//! Rendering of type descriptors into `type` elements.

use std::io::Write;

use crate::domain::types::CType;
use crate::infrastructure::json_writer::{JsonWriter, WriteError};

/// Write a complete `type` element for `ty`.
pub fn write_type<W: Write>(w: &mut JsonWriter<W>, ty: &CType) -> Result<(), WriteError> {
    w.element("type", |w| w.attributes(|w| type_attributes(w, ty)))
}

/// Identifier, spelling, kind, layout and array extents. Layout and kind
/// describe the base type once indirections have been stripped.
fn type_attributes<W: Write>(w: &mut JsonWriter<W>, ty: &CType) -> Result<(), WriteError> {
    let (base, levels) = ty.strip_indirection();

    match &ty.declaration {
        Some(decl) => {
            w.attribute("identifier", Some(decl.spelling.as_str()))?;
            w.attribute("origin", decl.origin.as_deref())?;
        }
        None => w.attribute("identifier", Some(base.spelling.as_str()))?,
    }

    w.attribute("syntax", Some(ty.spelling.as_str()))?;
    w.attribute("kind", Some(base.kind.spelling()))?;
    if levels > 0 {
        w.number_attribute("indirection", levels)?;
    }

    if let Some(align) = base.align {
        w.number_attribute("align", align)?;
    }
    if let Some(size) = base.size {
        w.number_attribute("size", size)?;
    }

    let dims = base.dimensions();
    if !dims.is_empty() {
        w.json_attribute("elements", &dims)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{TypeDeclaration, TypeKind};
    use serde_json::{json, Value};

    fn render(ty: &CType) -> Value {
        let mut w = JsonWriter::new(Vec::new());
        write_type(&mut w, ty).unwrap();
        serde_json::from_slice(&w.finish().unwrap()).unwrap()
    }

    #[test]
    fn test_pointer_to_record() {
        let mut record = CType::new(TypeKind::Record, "struct point");
        record.align = Some(4);
        record.size = Some(8);
        let mut ptr = CType::new(TypeKind::Pointer, "struct point *");
        ptr.pointee = Some(Box::new(record));

        assert_eq!(
            render(&ptr),
            json!(["type", [], {
                "identifier": "struct point",
                "syntax": "struct point *",
                "kind": "Record",
                "indirection": 1,
                "align": 4,
                "size": 8
            }])
        );
    }

    #[test]
    fn test_declared_type_uses_declaration() {
        let mut alias = CType::new(TypeKind::Typedef, "size_t");
        alias.declaration = Some(TypeDeclaration {
            spelling: "size_t".to_string(),
            origin: Some("/usr/include/stddef.h".to_string()),
        });

        let value = render(&alias);
        assert_eq!(value[2]["identifier"], "size_t");
        assert_eq!(value[2]["origin"], "/usr/include/stddef.h");
        assert_eq!(value[2]["kind"], "Typedef");
        assert!(value[2].get("indirection").is_none());
    }

    #[test]
    fn test_array_dimensions() {
        let mut row = CType::new(TypeKind::ConstantArray, "char[16]");
        row.array_size = Some(16);
        row.element = Some(Box::new(CType::new(TypeKind::CharS, "char")));
        let mut table = CType::new(TypeKind::ConstantArray, "char[4][16]");
        table.array_size = Some(4);
        table.size = Some(64);
        table.element = Some(Box::new(row));

        let value = render(&table);
        assert_eq!(value[2]["elements"], json!([4, 16]));
        assert_eq!(value[2]["size"], 64);
    }
}
