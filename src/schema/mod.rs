//! Schema model for ERD generation.
//!
//! This module provides:
//! - Data models for tables, raw column lines and foreign key references
//! - `CREATE TABLE` extraction from SQL text
//! - Relationship construction between known tables

mod ddl;
mod graph;

pub use ddl::*;
pub use graph::*;

use ahash::AHashMap;
use glob::Pattern;

/// Foreign key reference recovered from a single column line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeyRef {
    /// Column name in the owning table
    pub column: String,
    /// Referenced table name
    pub referenced_table: String,
    /// Referenced column name
    pub referenced_column: String,
}

/// A table as declared by a `CREATE TABLE` statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    /// Table name
    pub name: String,
    /// Raw column definition lines in declaration order
    pub columns: Vec<String>,
    /// Foreign keys in discovery order
    pub foreign_keys: Vec<ForeignKeyRef>,
}

impl Table {
    /// Create a new empty table
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            foreign_keys: Vec::new(),
        }
    }

    /// Whether the given column text mentions one of this table's FK columns
    pub fn mentions_foreign_key(&self, column: &str) -> bool {
        self.foreign_keys
            .iter()
            .any(|fk| column.contains(fk.column.as_str()))
    }
}

/// All tables extracted from one SQL source.
///
/// Iteration follows first-declaration order; redeclaring a table replaces
/// it in place.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    /// Map from table name to position in `tables`
    index: AHashMap<String, usize>,
    /// Tables in declaration order
    tables: Vec<Table>,
}

impl Schema {
    /// Create a new empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a table, overwriting any previous table with the same name
    pub fn insert(&mut self, table: Table) {
        match self.index.get(&table.name) {
            Some(&pos) => self.tables[pos] = table,
            None => {
                self.index.insert(table.name.clone(), self.tables.len());
                self.tables.push(table);
            }
        }
    }

    /// Get a table by exact name
    pub fn get(&self, name: &str) -> Option<&Table> {
        self.index.get(name).map(|&pos| &self.tables[pos])
    }

    /// Check whether a table with this exact name exists
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Get the number of tables
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Check if schema is empty
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Iterate over tables in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &Table> {
        self.tables.iter()
    }

    /// Total number of stored column lines across all tables
    pub fn column_count(&self) -> usize {
        self.tables.iter().map(|t| t.columns.len()).sum()
    }

    /// Keep only tables matching at least one pattern
    pub fn filter_tables(&mut self, patterns: &[Pattern]) {
        if patterns.is_empty() {
            return;
        }
        self.retain(|t| patterns.iter().any(|p| p.matches(&t.name)));
    }

    /// Drop tables matching any pattern
    pub fn exclude_tables(&mut self, patterns: &[Pattern]) {
        self.retain(|t| !patterns.iter().any(|p| p.matches(&t.name)));
    }

    fn retain<F>(&mut self, keep: F)
    where
        F: Fn(&Table) -> bool,
    {
        self.tables.retain(|t| keep(t));
        self.index = self
            .tables
            .iter()
            .enumerate()
            .map(|(pos, t)| (t.name.clone(), pos))
            .collect();
    }
}

impl FromIterator<Table> for Schema {
    fn from_iter<I: IntoIterator<Item = Table>>(iter: I) -> Self {
        let mut schema = Schema::new();
        for table in iter {
            schema.insert(table);
        }
        schema
    }
}
