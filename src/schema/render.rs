use crate::schema::types::SpecialTypeSet;
use crate::schema::{capitalize, SchemaDocument, TableSchema};

/// Serializes the document as SDL object types. Every block is preceded by
/// a blank line. Declarations for special types are appended after the
/// tables, nothing is appended when none were used.
pub fn render(document: &SchemaDocument, special_types: &SpecialTypeSet) -> String {
    let mut out = String::new();

    for (table, columns) in document.tables() {
        render_table(&mut out, table, columns);
    }

    for special in special_types.iter() {
        out.push('\n');
        out.push_str(special.definition());
    }

    out
}

fn render_table(out: &mut String, table: &str, columns: &TableSchema) {
    out.push_str(&format!("\ntype {} {{\n", capitalize(table)));
    for (column, field) in columns {
        out.push_str(&format!("  {}: {}\n", column, field));
    }
    out.push_str("}\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::types::{Scalar, SpecialType};
    use crate::schema::FieldType;
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_blocks_with_leading_blank_line() {
        let mut document = SchemaDocument::new();
        document.insert_field("car", "id", FieldType::scalar(Scalar::Int, true));
        document.insert_field("car", "owner_id", FieldType::reference("User", false));
        document.insert_field("user", "profile", FieldType::scalar(Scalar::Json, false));

        let sdl = render(&document, &SpecialTypeSet::new());

        assert_eq!(
            sdl,
            "\ntype Car {\n  id: Int!\n  owner_id: User\n}\n\ntype User {\n  profile: JSON\n}\n"
        );
    }

    #[test]
    fn appends_point_declaration_when_used() {
        let mut document = SchemaDocument::new();
        document.insert_field("store", "location", FieldType::scalar(Scalar::Point, true));
        let mut special = SpecialTypeSet::new();
        special.insert(SpecialType::Point);

        let sdl = render(&document, &special);

        assert_eq!(
            sdl,
            "\ntype Store {\n  location: Point!\n}\n\ntype Point {\n  x: Float!\n  y: Float!\n}\n"
        );
    }

    #[test]
    fn empty_table_renders_empty_block() {
        let mut document = SchemaDocument::new();
        document.insert_table("x");

        assert_eq!(render(&document, &SpecialTypeSet::new()), "\ntype X {\n}\n");
    }

    #[test]
    fn empty_document_renders_nothing() {
        assert_eq!(render(&SchemaDocument::new(), &SpecialTypeSet::new()), "");
    }

    #[test]
    fn rendering_is_repeatable() {
        let mut document = SchemaDocument::new();
        document.insert_field("b", "z", FieldType::scalar(Scalar::String, false));
        document.insert_field("a", "y", FieldType::scalar(Scalar::Float, true));
        document.insert_field("b", "a", FieldType::scalar(Scalar::Int, true));
        let mut special = SpecialTypeSet::new();
        special.insert(SpecialType::Point);

        let first = render(&document, &special);
        let second = render(&document, &special);

        assert_eq!(first, second);
        assert!(first.starts_with("\ntype B {\n  z: String\n  a: Int!\n}\n"));
    }
}
