//! Workshop command: diagrams for both conventional schema files.

use super::graph::{print_summary, sql_to_dot};
use super::render;
use crate::graph::Layout;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Input directory, relative to the workshop root
pub const SQL_DIR: &str = "sql";
/// Output directory, relative to the workshop root
pub const DIAGRAMS_DIR: &str = "diagrams";

/// One schema variant of the workshop
#[derive(Debug, Clone, Copy)]
pub struct SchemaVariant {
    /// Name used in progress messages
    pub label: &'static str,
    /// SQL file name inside `sql/`
    pub input: &'static str,
    /// Output file stem inside `diagrams/`
    pub output_stem: &'static str,
    /// Graph title
    pub title: &'static str,
}

pub const VARIANTS: [SchemaVariant; 2] = [
    SchemaVariant {
        label: "bad schema",
        input: "01_bad_schema.sql",
        output_stem: "bad_schema",
        title: "Bad Schema (Denormalized)",
    },
    SchemaVariant {
        label: "normalized schema",
        input: "02_normalized_schema.sql",
        output_stem: "normalized_schema",
        title: "Normalized Schema (3NF)",
    },
];

/// Run the workshop command
pub fn run(dir: PathBuf, no_render: bool) -> Result<()> {
    let sql_dir = dir.join(SQL_DIR);
    let diagrams_dir = dir.join(DIAGRAMS_DIR);

    let mut written = Vec::new();
    for variant in &VARIANTS {
        if let Some(path) = generate_variant(variant, &sql_dir, &diagrams_dir)? {
            written.push(path);
        }
    }

    if written.is_empty() {
        eprintln!("No schema files found in {}", sql_dir.display());
        return Ok(());
    }

    if !no_render {
        render_images(&written);
    }

    eprintln!("\nER diagrams generated successfully!");
    eprintln!("Use: dot -Tpng {0}/*.dot -o {0}/*.png", DIAGRAMS_DIR);
    Ok(())
}

/// Write the DOT file for one variant; `None` when its SQL file is absent
fn generate_variant(
    variant: &SchemaVariant,
    sql_dir: &Path,
    diagrams_dir: &Path,
) -> Result<Option<PathBuf>> {
    let input = sql_dir.join(variant.input);
    if !input.exists() {
        eprintln!("Skipping {}: {} not found", variant.label, input.display());
        return Ok(None);
    }

    eprintln!("Generating {} ER diagram...", variant.label);

    let sql = fs::read_to_string(&input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let (dot, schema, relationships) = sql_to_dot(&sql, variant.title, Layout::LR);

    fs::create_dir_all(diagrams_dir)
        .with_context(|| format!("failed to create {}", diagrams_dir.display()))?;
    let output = diagrams_dir.join(format!("{}.dot", variant.output_stem));
    fs::write(&output, dot).with_context(|| format!("failed to write {}", output.display()))?;

    eprintln!("Created: {}", output.display());
    print_summary(&schema, &relationships);
    Ok(Some(output))
}

/// Render PNG images with Graphviz, giving up after the first failure
fn render_images(dot_files: &[PathBuf]) {
    eprintln!("Generating PNG images...");

    for dot_path in dot_files {
        let png_path = dot_path.with_extension("png");
        match render::render_file(dot_path, &png_path) {
            Ok(()) => eprintln!("Created: {}", png_path.display()),
            Err(e) => {
                eprintln!("Warning: {e}");
                eprintln!("{}", render::manual_hint(dot_path, &png_path));
                return;
            }
        }
    }
}
