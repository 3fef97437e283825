//! Rendering of structured documents
//!
//! Three renderings are offered: the whole document as JSON, a typed dump
//! with one element per line, and the heading outline.

use anyhow::Result;
use std::fmt::Write;

use crate::{document::*, ExportFormat};

pub fn export(document: &Document, format: &ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Json => export_to_json(document),
        ExportFormat::Text => export_to_text(document),
        ExportFormat::Outline => export_to_outline(document),
    }
}

pub fn export_to_json(document: &Document) -> Result<String> {
    Ok(serde_json::to_string_pretty(document)?)
}

/// One line per element: the element kind in a fixed-width column, then the
/// element itself. Footnotes follow the body of each section.
pub fn export_to_text(document: &Document) -> Result<String> {
    let mut output = String::new();

    writeln!(output, "{}", document.title)?;
    writeln!(output, "- File: {}", document.metadata.file_path)?;
    writeln!(output, "- Pages: {}", document.metadata.page_count)?;
    writeln!(output, "- Footnotes: {}", document.metadata.footnote_count)?;

    for section in &document.sections {
        output.push('\n');
        writeln!(output, "== {} ==", section.name)?;
        if let Some(subheader) = &section.subheader {
            writeln!(output, "{}", subheader.join(" | "))?;
        }
        if let Some(title) = &section.title {
            writeln!(output, "{title}")?;
        }

        for element in &section.elements {
            writeln!(output, "{:25}{element}", element.kind())?;
        }
        for footnote in section.footnotes.iter() {
            let lines: Vec<String> = footnote
                .elements
                .iter()
                .map(|element| format!("{:17}{element}", element.kind()))
                .collect();
            writeln!(output, "{})\t{}", footnote.id, lines.join("\n\t"))?;
        }
    }

    Ok(output)
}

pub fn export_to_outline(document: &Document) -> Result<String> {
    let mut output = String::new();
    for item in generate_outline(document) {
        let indent = "  ".repeat(usize::from(item.level.saturating_sub(1)));
        writeln!(output, "{indent}{}", item.title)?;
    }
    Ok(output)
}
