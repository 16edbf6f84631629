//! Relationships between tables derived from foreign key references.

use super::Schema;
use serde::Serialize;

/// A directed edge from a referenced table to the table referencing it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Relationship {
    /// Referenced (parent) table
    pub from_table: String,
    /// Referencing (child) table owning the FK column
    pub to_table: String,
    /// Edge label, `local_column->referenced_column`
    pub label: String,
}

impl Relationship {
    pub fn new(from_table: &str, to_table: &str, column: &str, referenced_column: &str) -> Self {
        Self {
            from_table: from_table.to_string(),
            to_table: to_table.to_string(),
            label: format!("{}->{}", column, referenced_column),
        }
    }
}

/// Build relationships for every foreign key whose referenced table is part
/// of the schema.
///
/// Edges come out in table order, then FK discovery order. References to
/// unknown tables are dropped; parallel edges are kept.
pub fn build_relationships(schema: &Schema) -> Vec<Relationship> {
    let mut relationships = Vec::new();

    for table in schema.iter() {
        for fk in &table.foreign_keys {
            if schema.contains(&fk.referenced_table) {
                relationships.push(Relationship::new(
                    &fk.referenced_table,
                    &table.name,
                    &fk.column,
                    &fk.referenced_column,
                ));
            }
        }
    }

    relationships
}
