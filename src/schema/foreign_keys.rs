use std::collections::HashMap;

use crate::schema::ForeignKeyRecord;

/// (table, column) -> referenced table, raw names as given.
#[derive(Debug, Clone, Default)]
pub struct ForeignKeyIndex {
    references: HashMap<(String, String), String>,
}

impl ForeignKeyIndex {
    pub fn build<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a ForeignKeyRecord>,
    {
        let mut references = HashMap::new();
        for record in records {
            // Last one wins on duplicate (table, column) pairs
            references.insert(
                (record.table.clone(), record.column.clone()),
                record.referenced_table.clone(),
            );
        }
        Self { references }
    }

    pub fn lookup(&self, table: &str, column: &str) -> Option<&str> {
        self.references
            .get(&(table.to_string(), column.to_string()))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.references.len()
    }

    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }
}
