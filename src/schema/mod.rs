mod builder;
mod foreign_keys;
mod models;
mod render;
pub mod types;

pub use builder::{build_schema, FieldKind, FieldType, SchemaDocument, TableSchema};
pub use foreign_keys::ForeignKeyIndex;
pub use models::{ColumnRecord, ForeignKeyRecord};
pub use render::render;
pub use types::{classify, Scalar, SpecialType, SpecialTypeSet};

/// Upper-cases the first character and leaves the rest untouched.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Runs the whole transformation: index the foreign keys, fold the columns
/// into a document and render it.
pub fn generate_sdl(columns: &[ColumnRecord], foreign_keys: &[ForeignKeyRecord]) -> String {
    let index = ForeignKeyIndex::build(foreign_keys);
    let mut special_types = SpecialTypeSet::new();
    let document = build_schema(columns, &index, &mut special_types);
    render(&document, &special_types)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalizes_first_character_only() {
        assert_eq!(capitalize("user"), "User");
        assert_eq!(capitalize("user_account"), "User_account");
        assert_eq!(capitalize("carModel"), "CarModel");
        assert_eq!(capitalize("Car"), "Car");
        assert_eq!(capitalize("éclair"), "Éclair");
        assert_eq!(capitalize("1st"), "1st");
        assert_eq!(capitalize(""), "");
    }
}
