//! specdoc: structure recovery for text dumps of technical specifications
//!
//! This library turns the page-paginated, fixed-width text extracted from a
//! specification document into typed elements (headings, numbered
//! paragraphs, lists, code, value definitions and footnotes), using the
//! document's own table of contents to tell headings from body text.

use serde::{Deserialize, Serialize};

pub mod config;
pub mod document;
pub mod export;

/// Export format options
#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Text,
    Outline,
}

// Re-export commonly used types
pub use config::Config;
pub use document::{
    load_document, CoverPage, Document, Element, LoadOptions, Page, SectionSpec, StructureError,
    StructuredPage, TocMatcher,
};
