//! DDL extraction for ERD generation.
//!
//! Locates `CREATE TABLE` statements and keeps each column definition as raw
//! text. Foreign keys are only recognised from inline `REFERENCES t(c)`
//! annotations.

use super::{ForeignKeyRef, Schema, Table};
use once_cell::sync::Lazy;
use regex::Regex;

/// Regex for a whole CREATE TABLE statement.
/// The body ends at the first `);`, so a literal `);` inside a default or
/// CHECK expression truncates it.
static CREATE_TABLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)CREATE\s+TABLE\s+(\w+)\s*\((.*?)\);").unwrap());

/// Regex for an inline REFERENCES annotation
static REFERENCES_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)REFERENCES\s+(\w+)\s*\((\w+)\)").unwrap());

/// Regex for the leading column name of a line carrying a REFERENCES annotation
static FK_COLUMN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(\w+)\s+.*REFERENCES").unwrap());

/// Builder for constructing a schema from one or more SQL sources
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    schema: Schema,
}

impl SchemaBuilder {
    /// Create a new schema builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Add every CREATE TABLE statement found in `sql`.
    ///
    /// Returns the number of statements matched.
    pub fn add_sql(&mut self, sql: &str) -> usize {
        let mut matched = 0;
        for caps in CREATE_TABLE_RE.captures_iter(sql) {
            let name = &caps[1];
            let body = &caps[2];
            self.schema.insert(parse_table_body(name, body));
            matched += 1;
        }
        matched
    }

    /// Finish building
    pub fn build(self) -> Schema {
        self.schema
    }
}

/// Extract all tables from a SQL source.
///
/// Input without any CREATE TABLE statement yields an empty schema.
pub fn extract_schema(sql: &str) -> Schema {
    let mut builder = SchemaBuilder::new();
    builder.add_sql(sql);
    builder.build()
}

/// Build a table from its name and the text between the parentheses
pub fn parse_table_body(name: &str, body: &str) -> Table {
    let mut table = Table::new(name);

    for column in split_column_definitions(body) {
        if let Some(fk) = parse_foreign_key(&column) {
            table.foreign_keys.push(fk);
        }
        table.columns.push(column);
    }

    table
}

/// Split a table body into raw column definitions.
///
/// Blank lines and `--` comment lines are dropped and trailing commas are
/// stripped. Several definitions on one line are separated at depth-0 commas.
/// Parenthesis depth carries over line breaks, so the lines of a multi-line
/// expression stay separate entries but never split at their inner commas.
pub fn split_column_definitions(body: &str) -> Vec<String> {
    let mut depth = 0i32;
    body.lines()
        .flat_map(|line| split_line(line, &mut depth))
        .map(str::trim)
        .filter(|s| !s.is_empty() && !s.starts_with("--"))
        .map(|s| s.trim_end_matches(','))
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split one physical line at commas outside parentheses, quotes and
/// trailing comments. A comma followed only by a comment does not split.
fn split_line<'a>(line: &'a str, depth: &mut i32) -> Vec<&'a str> {
    let bytes = line.as_bytes();
    let mut parts = Vec::new();
    let mut quote: Option<u8> = None;
    let mut start = 0;

    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        match quote {
            Some(q) => {
                if b == q {
                    quote = None;
                }
            }
            None => match b {
                b'\'' | b'"' | b'`' => quote = Some(b),
                b'(' => *depth += 1,
                b')' => *depth = (*depth - 1).max(0),
                b'-' if bytes.get(i + 1) == Some(&b'-') => break,
                b',' if *depth == 0 => {
                    let rest = line[i + 1..].trim_start();
                    if !rest.is_empty() && !rest.starts_with("--") {
                        parts.push(&line[start..i]);
                        start = i + 1;
                    }
                }
                _ => {}
            },
        }
        i += 1;
    }

    parts.push(&line[start..]);
    parts
}

/// Recover a foreign key from a single column definition.
///
/// Returns `None` when there is no REFERENCES annotation or when the leading
/// column name cannot be recovered.
pub fn parse_foreign_key(column: &str) -> Option<ForeignKeyRef> {
    let refs = REFERENCES_RE.captures(column)?;
    let local = FK_COLUMN_RE.captures(column)?;

    Some(ForeignKeyRef {
        column: local[1].to_string(),
        referenced_table: refs[1].to_string(),
        referenced_column: refs[2].to_string(),
    })
}
