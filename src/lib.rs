//! ER diagram generation for the database design workshop.
//!
//! The pipeline runs in three steps: [`schema::extract_schema`] reads
//! `CREATE TABLE` statements, [`schema::build_relationships`] derives edges
//! between known tables and [`graph::to_dot`] renders the Graphviz source.

pub mod graph;
pub mod schema;
