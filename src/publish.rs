//! Writing the generated calendar to its published location.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tempfile::NamedTempFile;

/// What [`write_if_changed`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    Unchanged,
}

/// Read the currently published document, if there is one
pub fn read_existing(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read published calendar at {}", path.display()))?;
    Ok(Some(content))
}

/// Write `content` to `path` unless it already holds exactly that content.
///
/// The document goes to a temporary file in the same directory first and is
/// then renamed over the target, so readers never see a partial file.
pub fn write_if_changed(path: &Path, content: &str) -> Result<WriteOutcome> {
    if read_existing(path)?.as_deref() == Some(content) {
        return Ok(WriteOutcome::Unchanged);
    }

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory at {}", dir.display()))?;

    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
    tmp.write_all(content.as_bytes())
        .context("Failed to write calendar to temporary file")?;
    tmp.persist(path)
        .with_context(|| format!("Failed to write calendar to {}", path.display()))?;

    Ok(WriteOutcome::Written)
}
