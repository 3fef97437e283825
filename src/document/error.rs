//! Structural assumption violations
//!
//! Every error here aborts the structuring of the current document: the
//! layout no longer matches what the classifier expects, and carrying on
//! would spread a misclassification through the rest of the text.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StructureError {
    #[error("page has no blank line after its {0}")]
    MissingBoundary(&'static str),

    #[error("page has no content between header and footer")]
    EmptyContent,

    #[error("could not parse margin of width {indent} as a paragraph number: {line:?}")]
    MarginNumber { indent: usize, line: String },

    #[error("unknown bullet {bullet:?}: {line:?}")]
    UnknownBullet { bullet: String, line: String },

    #[error("list item has no text after its marker: {line:?}")]
    EmptyListItem { line: String },

    #[error("could not parse ordered list number: {line:?}")]
    BadListNumber { line: String },

    #[error("ordered list item {found} follows item {previous}: {line:?}")]
    NonConsecutiveListItem {
        previous: u32,
        found: u32,
        line: String,
    },

    #[error("ordered list starts at {found} instead of 1: {line:?}")]
    ListNotStartingAtOne { found: u32, line: String },

    #[error("table of contents jumps from depth {previous} to depth {depth} at {key}")]
    TocDepthJump {
        key: String,
        previous: usize,
        depth: usize,
    },

    #[error("table of contents has no lines")]
    EmptyToc,

    #[error("footnote present multiple times: {0}")]
    DuplicateFootnote(u32),

    #[error("cover page has no {0} line")]
    MissingCoverLine(&'static str),

    #[error("no pages to merge")]
    NoPages,

    #[error("content line {number}: {source}\n{context}")]
    AtLine {
        number: usize,
        context: String,
        #[source]
        source: Box<StructureError>,
    },
}

impl StructureError {
    /// Attach the 1-based content line number and the surrounding lines.
    pub(crate) fn at_line(self, lines: &[String], index: usize) -> Self {
        let start = index.saturating_sub(2);
        let end = (index + 3).min(lines.len());
        let context = lines[start..end]
            .iter()
            .enumerate()
            .map(|(offset, line)| {
                let marker = if start + offset == index { '>' } else { ' ' };
                format!("{marker} {line}")
            })
            .collect::<Vec<_>>()
            .join("\n");
        StructureError::AtLine {
            number: index + 1,
            context,
            source: Box::new(self),
        }
    }

    /// The innermost error, without line context
    pub fn root(&self) -> &StructureError {
        match self {
            StructureError::AtLine { source, .. } => source.root(),
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, StructureError>;
