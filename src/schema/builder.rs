use std::fmt;

use indexmap::IndexMap;

use crate::schema::types::{classify, Scalar, SpecialTypeSet};
use crate::schema::{capitalize, ColumnRecord, ForeignKeyIndex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Scalar(Scalar),
    /// Capitalized name of the referenced table's type.
    Reference(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldType {
    pub kind: FieldKind,
    pub non_null: bool,
}

impl FieldType {
    pub fn scalar(scalar: Scalar, non_null: bool) -> Self {
        Self {
            kind: FieldKind::Scalar(scalar),
            non_null,
        }
    }

    pub fn reference(type_name: impl Into<String>, non_null: bool) -> Self {
        Self {
            kind: FieldKind::Reference(type_name.into()),
            non_null,
        }
    }

    pub fn type_name(&self) -> &str {
        match &self.kind {
            FieldKind::Scalar(scalar) => scalar.as_str(),
            FieldKind::Reference(name) => name,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())?;
        if self.non_null {
            f.write_str("!")?;
        }
        Ok(())
    }
}

/// Column name -> field type, in first-insertion order.
pub type TableSchema = IndexMap<String, FieldType>;

/// Tables keyed by their raw (uncapitalized) name, in first-insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaDocument {
    tables: IndexMap<String, TableSchema>,
}

impl SchemaDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-inserting an existing column replaces its type but keeps its position.
    pub fn insert_field(&mut self, table: &str, column: &str, field: FieldType) {
        self.tables
            .entry(table.to_string())
            .or_default()
            .insert(column.to_string(), field);
    }

    /// Registers a table with no columns yet. No-op if it already exists.
    pub fn insert_table(&mut self, table: &str) {
        self.tables.entry(table.to_string()).or_default();
    }

    pub fn table(&self, table: &str) -> Option<&TableSchema> {
        self.tables.get(table)
    }

    pub fn field(&self, table: &str, column: &str) -> Option<&FieldType> {
        self.tables.get(table).and_then(|schema| schema.get(column))
    }

    pub fn tables(&self) -> impl Iterator<Item = (&str, &TableSchema)> {
        self.tables.iter().map(|(name, schema)| (name.as_str(), schema))
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// Resolves the type of a single column. Foreign keys win over the native
/// type; an empty referenced table name counts as no foreign key.
fn resolve_field(
    column: &ColumnRecord,
    foreign_keys: &ForeignKeyIndex,
    special_types: &mut SpecialTypeSet,
) -> FieldType {
    let non_null = !column.nullable;

    match foreign_keys.lookup(&column.table, &column.column) {
        Some(referenced) if !referenced.is_empty() => {
            tracing::trace!(
                table = %column.table,
                column = %column.column,
                referenced,
                "column resolved as reference"
            );
            FieldType::reference(capitalize(referenced), non_null)
        }
        _ => {
            let (scalar, special) = classify(&column.native_type);
            if let Some(special) = special {
                if special_types.insert(special) {
                    tracing::debug!(special = special.as_str(), "special type in use");
                }
            }
            FieldType::scalar(scalar, non_null)
        }
    }
}

pub fn build_schema(
    columns: &[ColumnRecord],
    foreign_keys: &ForeignKeyIndex,
    special_types: &mut SpecialTypeSet,
) -> SchemaDocument {
    let document = columns
        .iter()
        .fold(SchemaDocument::new(), |mut document, column| {
            let field = resolve_field(column, foreign_keys, special_types);
            document.insert_field(&column.table, &column.column, field);
            document
        });

    tracing::debug!(
        tables = document.len(),
        columns = columns.len(),
        "schema document built"
    );

    document
}
