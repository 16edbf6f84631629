//! Graph command implementation for ERD generation.

use super::render;
use crate::graph::{to_dot, to_json, Layout, OutputFormat};
use crate::schema::{build_relationships, extract_schema, Relationship, Schema};
use anyhow::{anyhow, bail, Context, Result};
use glob::Pattern;
use std::fs;
use std::path::PathBuf;

/// Run the graph command
#[allow(clippy::too_many_arguments)]
pub fn run(
    file: PathBuf,
    output: Option<PathBuf>,
    title: String,
    format: Option<String>,
    layout: Option<String>,
    tables: Option<String>,
    exclude: Option<String>,
    render: bool,
) -> Result<()> {
    // Parse format
    let format = if let Some(ref f) = format {
        f.parse().map_err(|e: String| anyhow!(e))?
    } else if let Some(ref out) = output {
        out.extension()
            .and_then(|e| e.to_str())
            .and_then(OutputFormat::from_extension)
            .unwrap_or_default()
    } else {
        OutputFormat::Dot
    };

    // Parse layout
    let layout = layout
        .map(|l| l.parse())
        .transpose()
        .map_err(|e: String| anyhow!(e))?
        .unwrap_or(Layout::LR);

    if let Some(ref out) = output {
        if format != OutputFormat::Dot && render::is_image_path(out) {
            bail!(
                "cannot write {} output to image file {}, use a .{} path",
                format,
                out.display(),
                format.extension()
            );
        }
    }

    if !file.exists() {
        bail!("input file does not exist: {}", file.display());
    }

    let sql = fs::read_to_string(&file)
        .with_context(|| format!("failed to read {}", file.display()))?;

    let mut schema = extract_schema(&sql);
    if schema.is_empty() {
        eprintln!("No CREATE TABLE statements found in {}", file.display());
    }

    if let Some(ref tables) = tables {
        schema.filter_tables(&parse_patterns(tables));
    }
    if let Some(ref exclude) = exclude {
        schema.exclude_tables(&parse_patterns(exclude));
    }

    let relationships = build_relationships(&schema);

    let output_content = match format {
        OutputFormat::Dot => to_dot(&schema, &relationships, &title, layout),
        OutputFormat::Json => to_json(&schema, &relationships, &title),
    };

    let should_render = render || output.as_deref().is_some_and(render::is_image_path);

    match output {
        Some(ref out_path) if should_render && format == OutputFormat::Dot => {
            match render::render_source(&output_content, out_path) {
                Ok(()) => eprintln!("Rendered to: {}", out_path.display()),
                Err(e) => {
                    // Keep the DOT source so it can be rendered by hand
                    let dot_path = out_path.with_extension("dot");
                    fs::write(&dot_path, &output_content)
                        .with_context(|| format!("failed to write {}", dot_path.display()))?;
                    eprintln!("Warning: {e}");
                    eprintln!("ERD written to: {}", dot_path.display());
                    eprintln!("{}", render::manual_hint(&dot_path, out_path));
                }
            }
        }
        Some(ref out_path) => {
            if should_render {
                eprintln!("Warning: --render only applies to DOT output with an image path");
            }
            fs::write(out_path, &output_content)
                .with_context(|| format!("failed to write {}", out_path.display()))?;
            eprintln!("ERD written to: {}", out_path.display());
        }
        None => {
            if should_render {
                eprintln!("Warning: --render requires --output, printing DOT instead");
            }
            print!("{}", output_content);
        }
    }

    print_summary(&schema, &relationships);
    Ok(())
}

/// Parse, build relationships and render DOT for one SQL source
pub fn sql_to_dot(sql: &str, title: &str, layout: Layout) -> (String, Schema, Vec<Relationship>) {
    let schema = extract_schema(sql);
    let relationships = build_relationships(&schema);
    let dot = to_dot(&schema, &relationships, title, layout);
    (dot, schema, relationships)
}

pub fn print_summary(schema: &Schema, relationships: &[Relationship]) {
    eprintln!(
        "ERD: {} tables, {} columns, {} relationships",
        schema.len(),
        schema.column_count(),
        relationships.len()
    );
}

fn parse_patterns(list: &str) -> Vec<Pattern> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| match Pattern::new(s) {
            Ok(p) => Some(p),
            Err(e) => {
                eprintln!("Warning: ignoring invalid table pattern '{}': {}", s, e);
                None
            }
        })
        .collect()
}
