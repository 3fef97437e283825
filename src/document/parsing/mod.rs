//! Line-level parsing
//!
//! This module contains the classifiers that turn the lines of a page into
//! document elements, and the table of contents they rely on.

pub(crate) mod heading;
pub(crate) mod line;
pub(crate) mod list;
pub(crate) mod numbering;
pub(crate) mod table;
pub(crate) mod text;
pub(crate) mod toc;

pub use heading::TocMatcher;
pub use line::LineClassifier;
pub use toc::{parse_toc_line, Toc};
