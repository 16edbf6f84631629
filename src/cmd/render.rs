//! Graphviz `dot` invocation for turning DOT sources into images.

use anyhow::{anyhow, bail, Context, Result};
use std::io::{ErrorKind, Write};
use std::path::Path;
use std::process::{Command, Stdio};

/// Image format passed to `dot -T`, taken from the output extension
pub fn image_format(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("png")
        .to_lowercase()
}

/// Whether the output path asks for a rendered image
pub fn is_image_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| matches!(e.to_lowercase().as_str(), "png" | "svg" | "pdf"))
        .unwrap_or(false)
}

/// Render a DOT file on disk to an image next to it
pub fn render_file(dot_path: &Path, image_path: &Path) -> Result<()> {
    let output = Command::new("dot")
        .arg(format!("-T{}", image_format(image_path)))
        .arg(dot_path)
        .arg("-o")
        .arg(image_path)
        .output()
        .map_err(spawn_error)?;

    if !output.status.success() {
        bail!(
            "Graphviz dot command failed with status {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    Ok(())
}

/// Render DOT source piped through stdin to an image
pub fn render_source(dot_source: &str, image_path: &Path) -> Result<()> {
    let mut child = Command::new("dot")
        .arg(format!("-T{}", image_format(image_path)))
        .arg("-o")
        .arg(image_path)
        .stdin(Stdio::piped())
        .spawn()
        .map_err(spawn_error)?;

    // stdin is dropped before waiting so dot sees EOF
    let written = match child.stdin.take() {
        Some(mut stdin) => stdin.write_all(dot_source.as_bytes()),
        None => Ok(()),
    };

    let status = child.wait()?;
    written.context("failed to pipe DOT source to dot")?;
    if !status.success() {
        bail!("Graphviz dot command failed with status: {}", status);
    }

    Ok(())
}

fn spawn_error(e: std::io::Error) -> anyhow::Error {
    if e.kind() == ErrorKind::NotFound {
        anyhow!("Graphviz 'dot' command not found. Install graphviz to generate images.")
    } else {
        anyhow!("Failed to run dot: {}", e)
    }
}

/// Manual fallback printed when rendering is not possible
pub fn manual_hint(dot_path: &Path, image_path: &Path) -> String {
    format!(
        "You can generate manually: dot -T{} {} -o {}",
        image_format(image_path),
        dot_path.display(),
        image_path.display()
    )
}
