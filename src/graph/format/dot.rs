//! Graphviz DOT format output for ERD diagrams.

use crate::graph::format::Layout;
use crate::schema::{Relationship, Schema, Table};

/// Columns shown per table before the ellipsis row
pub const MAX_DISPLAY_COLUMNS: usize = 10;

/// Generate DOT output with one HTML-like table node per table and one
/// labelled edge per relationship
pub fn to_dot(
    schema: &Schema,
    relationships: &[Relationship],
    title: &str,
    layout: Layout,
) -> String {
    let mut output = String::new();

    // Header
    output.push_str(&format!("digraph \"{}\" {{\n", escape_dot_string(title)));
    output.push_str(&format!("    rankdir={};\n", layout.rankdir()));
    output.push_str("    node [shape=plaintext, fontsize=10];\n");
    output.push_str("    edge [fontsize=8];\n");

    for table in schema.iter() {
        output.push_str(&format!(
            "    {} [label=<{}>];\n",
            escape_dot_id(&table.name),
            generate_table_label(table)
        ));
    }

    for rel in relationships {
        output.push_str(&format!(
            "    {} -> {} [label=\"{}\"];\n",
            escape_dot_id(&rel.from_table),
            escape_dot_id(&rel.to_table),
            escape_dot_string(&rel.label)
        ));
    }

    output.push_str("}\n");
    output
}

/// Generate HTML-like table label for DOT
fn generate_table_label(table: &Table) -> String {
    let mut html = String::new();

    html.push_str("<table border=\"1\" cellborder=\"0\" cellspacing=\"0\">");
    html.push_str(&format!(
        "<tr><td bgcolor=\"lightblue\"><b>{}</b></td></tr>",
        escape_html(&table.name)
    ));

    for col in table.columns.iter().take(MAX_DISPLAY_COLUMNS) {
        let escaped = escape_html(col);
        let lower = col.to_lowercase();
        if lower.contains("(pk)") || lower.contains("primary key") {
            html.push_str(&format!("<tr><td align=\"left\"><b>{}</b></td></tr>", escaped));
        } else if table.mentions_foreign_key(col) {
            html.push_str(&format!("<tr><td align=\"left\"><i>{}</i></td></tr>", escaped));
        } else {
            html.push_str(&format!("<tr><td align=\"left\">{}</td></tr>", escaped));
        }
    }

    if table.columns.len() > MAX_DISPLAY_COLUMNS {
        html.push_str("<tr><td align=\"left\">...</td></tr>");
    }

    html.push_str("</table>");
    html
}

/// Escape a string for use in DOT HTML labels
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Escape a string for use inside a double-quoted DOT string
fn escape_dot_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Escape a string for use as a DOT node ID
fn escape_dot_id(s: &str) -> String {
    let plain = !s.is_empty()
        && !s.starts_with(|c: char| c.is_ascii_digit())
        && s.chars().all(|c| c.is_alphanumeric() || c == '_');
    if plain {
        s.to_string()
    } else {
        format!("\"{}\"", escape_dot_string(s))
    }
}
