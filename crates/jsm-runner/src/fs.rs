//! Source file discovery, output naming and read/write helpers.

use jsm_core::error::{MinifyError, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// `<stem><suffix><ext>` next to the input, e.g. `app.js` -> `app.min.js`.
pub fn default_output_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
    let name = match input.extension() {
        Some(ext) => format!("{stem}{suffix}.{}", ext.to_string_lossy()),
        None => format!("{stem}{suffix}"),
    };
    input.with_file_name(name)
}

/// Does the file name look like an already-minified output (`*.min.js`)?
pub fn is_minified_name(path: &Path, suffix: &str) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(&format!("{suffix}.js")))
}

fn is_js(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "js")
}

/// List `*.js` files directly inside `dir`, skipping minified outputs. Sorted by path.
pub async fn list_js_files(dir: &Path, suffix: &str) -> Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(dir).await.map_err(|e| MinifyError::io(dir, e))?;
    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(|e| MinifyError::io(dir, e))? {
        let path = entry.path();
        if !is_js(&path) || is_minified_name(&path, suffix) {
            continue;
        }
        let is_file = entry.file_type().await.map(|t| t.is_file()).unwrap_or(false);
        if is_file {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Read a source file as UTF-8.
pub async fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).await.map_err(|e| MinifyError::io(path, e))
}

/// Write minified output, creating parent directories.
pub async fn write_output(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await.map_err(|e| MinifyError::io(parent, e))?;
    }
    fs::write(path, content).await.map_err(|e| MinifyError::io(path, e))
}
