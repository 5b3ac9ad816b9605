/// One row of column metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRecord {
    pub table: String,
    pub column: String,
    pub nullable: bool,
    pub native_type: String,
}

impl ColumnRecord {
    pub fn new(table: &str, column: &str, nullable: bool, native_type: &str) -> Self {
        Self {
            table: table.to_string(),
            column: column.to_string(),
            nullable,
            native_type: native_type.to_string(),
        }
    }
}

/// One single-column foreign key constraint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ForeignKeyRecord {
    pub table: String,
    pub column: String,
    pub referenced_table: String,
    pub referenced_column: String,
}

impl ForeignKeyRecord {
    pub fn new(table: &str, column: &str, referenced_table: &str, referenced_column: &str) -> Self {
        Self {
            table: table.to_string(),
            column: column.to_string(),
            referenced_table: referenced_table.to_string(),
            referenced_column: referenced_column.to_string(),
        }
    }
}
