//! PostgreSQL SQL output for generated data.

use crate::generator::{Row, SqlValue};
use crate::schema::Table;
use std::io::{self, Write};

/// Writes DDL and batched multi-row INSERT statements
pub struct SqlWriter<W: Write> {
    out: W,
    statements: usize,
}

impl<W: Write> SqlWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out, statements: 0 }
    }

    /// Write a comment header describing the dump
    pub fn write_header(&mut self, lines: &[String]) -> io::Result<()> {
        for line in lines {
            writeln!(self.out, "-- {}", line)?;
        }
        writeln!(self.out, "SET client_encoding = 'UTF8';")?;
        writeln!(self.out)?;
        Ok(())
    }

    /// Write a CREATE TABLE statement
    pub fn write_create_table(&mut self, table: &Table) -> io::Result<()> {
        writeln!(self.out, "{}", table.create_statement())?;
        self.statements += 1;
        Ok(())
    }

    /// Write one INSERT statement holding all `rows`
    pub fn write_insert(&mut self, table: &str, columns: &[&str], rows: &[Row]) -> io::Result<()> {
        if rows.is_empty() {
            return Ok(());
        }

        writeln!(self.out, "INSERT INTO {} ({}) VALUES", table, columns.join(", "))?;
        for (i, row) in rows.iter().enumerate() {
            let values: Vec<String> = row.iter().map(SqlValue::to_postgres).collect();
            let terminator = if i + 1 == rows.len() { ";" } else { "," };
            writeln!(self.out, "({}){}", values.join(", "), terminator)?;
        }
        self.statements += 1;
        Ok(())
    }

    /// Move the serial sequence of `table` past the highest explicit id
    pub fn write_sequence_reset(&mut self, table: &str) -> io::Result<()> {
        writeln!(
            self.out,
            "SELECT setval(pg_get_serial_sequence('{0}', 'id'), COALESCE(MAX(id), 0) + 1, false) FROM {0};",
            table
        )?;
        self.statements += 1;
        Ok(())
    }

    /// Number of statements written so far
    pub fn statements(&self) -> usize {
        self.statements
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
