use std::collections::{HashMap, HashSet};

use tokio_postgres::Row;

use crate::schema::{ColumnRecord, ForeignKeyRecord};

// PostgreSQL spells a few types differently from the tags the type mapper
// understands; extension types (PostGIS geometry) show up as USER-DEFINED.
pub fn native_type_tag(data_type: &str, udt_name: &str) -> String {
    match data_type {
        "double precision" => "double".to_string(),
        "real" => "float".to_string(),
        "jsonb" => "json".to_string(),
        "USER-DEFINED" => udt_name.to_string(),
        other => other.to_string(),
    }
}

pub fn is_nullable(flag: &str) -> bool {
    flag == "YES"
}

pub fn column_from_row(row: &Row) -> ColumnRecord {
    let data_type: String = row.get("data_type");
    let udt_name: String = row.get("udt_name");
    let nullable: String = row.get("is_nullable");

    ColumnRecord {
        table: row.get("table_name"),
        column: row.get("column_name"),
        nullable: is_nullable(&nullable),
        native_type: native_type_tag(&data_type, &udt_name),
    }
}

pub fn foreign_key_from_row(row: &Row) -> ForeignKeyRecord {
    ForeignKeyRecord {
        table: row.get("table_name"),
        column: row.get("column_name"),
        referenced_table: row.get("referenced_table_name"),
        referenced_column: row.get("referenced_column_name"),
    }
}

/// Drops repeated rows, keeping the first occurrence. A column constrained
/// against more than one table is kept as is and logged; the index resolves
/// it last-wins.
pub fn collect_foreign_keys<I>(records: I) -> Vec<ForeignKeyRecord>
where
    I: IntoIterator<Item = ForeignKeyRecord>,
{
    let mut seen = HashSet::new();
    let mut targets: HashMap<(String, String), String> = HashMap::new();
    let mut collected = Vec::new();

    for record in records {
        if !seen.insert(record.clone()) {
            continue;
        }

        let key = (record.table.clone(), record.column.clone());
        if let Some(previous) = targets.insert(key, record.referenced_table.clone()) {
            if previous != record.referenced_table {
                tracing::warn!(
                    table = %record.table,
                    column = %record.column,
                    first = %previous,
                    second = %record.referenced_table,
                    "column references more than one table"
                );
            }
        }
        collected.push(record);
    }

    collected
}
