//! Page segmentation
//!
//! A raw page is a header block, the content, and a footer block, separated
//! by blank lines. The content may carry paragraph numbers in a left margin
//! whose width is probed from the layout.

use std::collections::BTreeSet;

use super::cleanup::{is_int, leading_whitespace, split_at_column};
use super::error::{Result, StructureError};
use super::models::*;

/// Upper bound for the margin probe; no margin is wider than a line
const MAX_INDENT: usize = 80;

impl Page {
    pub fn new(content: Vec<String>, indent: usize) -> Self {
        Self {
            header: Vec::new(),
            footer: Vec::new(),
            content,
            indent,
        }
    }

    /// Width of the paragraph numbering margin, 0 if there is none
    pub fn indent(&self) -> usize {
        self.indent
    }

    /// Segment one raw page and probe its numbering margin
    pub fn parse(raw: &str) -> Result<Self> {
        let mut page = Self::parse_flat(raw)?;
        page.indent = probe_indent(&page.content);
        Ok(page)
    }

    /// Segment one raw page without a numbering margin
    pub fn parse_flat(raw: &str) -> Result<Self> {
        let lines: Vec<&str> = raw.split('\n').map(str::trim_end).collect();
        let is_blank = |index: usize| lines[index].is_empty();

        let header_begin = (0..lines.len())
            .find(|&i| !is_blank(i))
            .ok_or(StructureError::EmptyContent)?;
        let header_end = (header_begin..lines.len())
            .find(|&i| is_blank(i))
            .ok_or(StructureError::MissingBoundary("header"))?;

        // a non-blank line exists, so the footer search always ends
        let footer_end = (0..lines.len())
            .rev()
            .find(|&i| !is_blank(i))
            .map_or(0, |i| i + 1);
        let footer_begin = (0..footer_end)
            .rev()
            .find(|&i| is_blank(i))
            .map_or(0, |i| i + 1);
        if footer_begin <= header_begin {
            return Err(StructureError::MissingBoundary("footer"));
        }

        let content_begin = (header_end..footer_begin).find(|&i| !is_blank(i));
        let content_end = (header_end..footer_begin).rev().find(|&i| !is_blank(i));
        let (Some(content_begin), Some(content_end)) = (content_begin, content_end) else {
            return Err(StructureError::EmptyContent);
        };

        let to_owned = |range: &[&str]| -> Vec<String> {
            range.iter().map(|line| line.trim_start().to_string()).collect()
        };
        Ok(Self {
            header: to_owned(&lines[header_begin..header_end]),
            footer: to_owned(&lines[footer_begin..footer_end]),
            content: lines[content_begin..=content_end]
                .iter()
                .map(|line| line.to_string())
                .collect(),
            indent: 0,
        })
    }
}

/// Whether every non-blank margin of width `margin` holds an integer
fn only_numbers_in_margin(lines: &[String], margin: usize) -> bool {
    if margin == 0 {
        return true;
    }
    lines.iter().all(|line| {
        let (prefix, _) = split_at_column(line, margin);
        prefix.trim().is_empty() || is_int(prefix)
    })
}

/// Find the widest margin under which only paragraph numbers appear.
///
/// Uniformly indented content has no margin.
fn probe_indent(content: &[String]) -> usize {
    let indents: BTreeSet<usize> = content
        .iter()
        .filter(|line| !line.is_empty())
        .map(|line| leading_whitespace(line))
        .collect();
    let mut indents = indents.into_iter();
    let (Some(0), Some(second)) = (indents.next(), indents.next()) else {
        return 0;
    };

    let mut indent = second;
    if only_numbers_in_margin(content, indent) {
        while indent < MAX_INDENT && only_numbers_in_margin(content, indent + 1) {
            indent += 1;
        }
    } else {
        while indent > 0 && !only_numbers_in_margin(content, indent) {
            indent -= 1;
        }
    }
    log::trace!("Probed numbering margin of width {indent}");
    indent
}
