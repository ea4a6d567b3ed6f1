//! Document store scanner

use std::path::Path;
use walkdir::WalkDir;

use crate::error::Result;

/// Enumerate document identifiers in a content directory.
///
/// Identifiers are the stems of `*.md` files directly in the directory
/// (subdirectories are not descended into). Order is not guaranteed.
pub fn scan_documents(dir: &Path) -> Result<Vec<String>> {
    // Surface an unreadable directory as an I/O error; WalkDir would only
    // report it lazily through its iterator.
    std::fs::read_dir(dir)?;

    let mut identifiers = Vec::new();
    for entry in WalkDir::new(dir)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if path.is_file() && is_markdown_file(path) {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                identifiers.push(stem.to_string());
            }
        }
    }

    Ok(identifiers)
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md")
        .unwrap_or(false)
}
