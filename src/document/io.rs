//! File I/O operations and validation
//!
//! This module handles input validation and splitting the text dump into
//! pages.

use anyhow::{bail, Context, Result};
use std::path::Path;

/// Page separator of the text dump
pub const FORM_FEED: char = '\x0c';

/// Validates that the file is a readable text dump and returns its content
pub(crate) fn read_text_dump(file_path: &Path) -> Result<String> {
    if !file_path.is_file() {
        bail!("Input not found or not a file: {}", file_path.display());
    }

    let bytes = std::fs::read(file_path)
        .with_context(|| format!("Failed to read {}", file_path.display()))?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(_) => bail!(
            "Invalid input: {} is not UTF-8 text.\n\
            Extract the document with a fixed-width layout text converter first.",
            file_path.display()
        ),
    }
}

/// Split a text dump into raw pages, dropping pages without any text
pub fn split_pages(text: &str) -> Vec<&str> {
    text.split(FORM_FEED)
        .filter(|page| !page.trim().is_empty())
        .collect()
}
