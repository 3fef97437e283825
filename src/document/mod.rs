//! Document structuring and data structures module
//!
//! This module turns the pages of a text dump into structured pages, and
//! structured pages into merged sections of typed elements.

pub(crate) mod cleanup;
pub mod error;
mod footnotes;
pub(crate) mod io;
pub mod loader;
pub mod merge;
pub mod models;
mod page;
pub mod parsing;
pub mod query;
mod structured;

// Re-export all models and query functions
pub use error::StructureError;
pub use io::split_pages;
pub use loader::{load_document, LoadOptions, PageRange, SectionSpec};
pub use merge::merge_pages;
pub use models::*;
pub use parsing::{parse_toc_line, LineClassifier, Toc, TocMatcher};
pub use query::*;
