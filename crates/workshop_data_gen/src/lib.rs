//! Synthetic data generator for the database design workshop.
//!
//! Populates the denormalized ("bad") or normalized (3NF) workshop schema
//! with deterministic, realistic-looking rows and writes them as batched
//! PostgreSQL INSERT statements.
//!
//! # Example
//!
//! ```rust
//! use workshop_data_gen::{Generator, GeneratorConfig, SqlWriter, Variant};
//!
//! let config = GeneratorConfig {
//!     variant: Variant::Normalized,
//!     products: 20,
//!     orders: 10,
//!     customers: 5,
//!     include_schema: true,
//!     ..GeneratorConfig::default()
//! };
//!
//! let mut gen = Generator::new(config);
//! let mut writer = SqlWriter::new(Vec::new());
//! gen.generate(&mut writer, &mut |_, _, _| {}).unwrap();
//!
//! let sql = String::from_utf8(writer.into_inner()).unwrap();
//! assert!(sql.contains("INSERT INTO detalle_pedidos"));
//! ```

pub mod fake;
pub mod generator;
pub mod renderer;
pub mod schema;

pub use generator::{
    Generator, GeneratorConfig, ProgressFn, Row, SqlValue, TableSummary, Variant,
};
pub use renderer::SqlWriter;
pub use schema::{bad_schema, normalized_schema, Column, SqlType, Table};
