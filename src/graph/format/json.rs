//! JSON format output for ERD data.

use crate::schema::{Relationship, Schema};
use serde::Serialize;

/// JSON representation of the ERD
#[derive(Debug, Serialize)]
pub struct ErdJson {
    pub title: String,
    pub tables: Vec<TableJson>,
    pub relationships: Vec<Relationship>,
    pub stats: ErdStats,
}

/// JSON representation of a table with its raw column lines
#[derive(Debug, Serialize)]
pub struct TableJson {
    pub name: String,
    pub columns: Vec<String>,
    pub foreign_keys: Vec<ForeignKeyJson>,
}

/// JSON representation of a foreign key reference
#[derive(Debug, Serialize)]
pub struct ForeignKeyJson {
    pub column: String,
    pub references_table: String,
    pub references_column: String,
}

/// ERD statistics
#[derive(Debug, Serialize)]
pub struct ErdStats {
    pub table_count: usize,
    pub column_count: usize,
    pub relationship_count: usize,
}

/// Generate JSON output from a schema and its relationships
pub fn to_json(schema: &Schema, relationships: &[Relationship], title: &str) -> String {
    let erd = build_erd_json(schema, relationships, title);
    serde_json::to_string_pretty(&erd).unwrap_or_else(|_| "{}".to_string())
}

/// Build the JSON structure
pub fn build_erd_json(schema: &Schema, relationships: &[Relationship], title: &str) -> ErdJson {
    let tables: Vec<TableJson> = schema
        .iter()
        .map(|table| TableJson {
            name: table.name.clone(),
            columns: table.columns.clone(),
            foreign_keys: table
                .foreign_keys
                .iter()
                .map(|fk| ForeignKeyJson {
                    column: fk.column.clone(),
                    references_table: fk.referenced_table.clone(),
                    references_column: fk.referenced_column.clone(),
                })
                .collect(),
        })
        .collect();

    ErdJson {
        title: title.to_string(),
        stats: ErdStats {
            table_count: tables.len(),
            column_count: schema.column_count(),
            relationship_count: relationships.len(),
        },
        tables,
        relationships: relationships.to_vec(),
    }
}
