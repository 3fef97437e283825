//! Table of contents parsing
//!
//! The document's own table of contents is the ground truth for telling
//! headings apart from body text. Only the (title, key) pairs are kept: the
//! page numbers refer to the source pagination.

use once_cell::sync::Lazy;
use regex::Regex;

use super::super::error::{Result, StructureError};
use super::super::models::*;
use super::numbering::key_depth;

// Dot leaders, a run of two or more spaces, or a single space before the page
// number. Leaders are tried first so they never end up in the title.
const BEFORE_PAGE: &str = r"(?:\s*(?:\.\s*){2,}|\s+)";

static SECTION_ENTRY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"^\s*(?P<key>(?:\d+|[A-Z])(?:\.\d+)+)\s+(?P<title>.+?){BEFORE_PAGE}(?P<page>\d+)$"
    ))
    .unwrap()
});

static CHAPTER_ENTRY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"^\s*(?P<key>\d+)\.?\s+(?P<title>.+?){BEFORE_PAGE}(?P<page>\d+)$"
    ))
    .unwrap()
});

// Roman page numbers look like ordinary words, so a single space is not
// enough to separate them from the title.
const BEFORE_ROMAN_PAGE: &str = r"(?:\s*(?:\.\s*){2,}|\s{2,})";

static TITLE_ENTRY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"^\s*(?P<title>[^\d\s].*?)(?:{BEFORE_PAGE}(?P<page>\d+)|{BEFORE_ROMAN_PAGE}(?P<roman>[ivxlcdm]+))$"
    ))
    .unwrap()
});

/// The table of contents of a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toc {
    /// First line of the TOC pages, its own title ("Contents")
    pub title_line: String,
    pub entries: Vec<TocEntry>,
}

/// Parse one TOC line. Returns `None` for lines matching no known pattern.
pub fn parse_toc_line(line: &str) -> Option<TocEntry> {
    for (pattern, keyed) in [
        (&SECTION_ENTRY, true),
        (&CHAPTER_ENTRY, true),
        (&TITLE_ENTRY, false),
    ] {
        if let Some(captures) = pattern.captures(line) {
            let title = captures["title"].trim();
            let key = keyed.then(|| &captures["key"]);
            return Some(TocEntry::new(title, key));
        }
    }
    None
}

impl Toc {
    /// Parse the content lines of the TOC pages.
    ///
    /// Unrecognised lines are reported and dropped. A clause key more than
    /// one level deeper than the key before it is fatal.
    pub fn parse<'a>(lines: impl IntoIterator<Item = &'a str>) -> Result<Self> {
        let mut lines = lines.into_iter();
        let title_line = lines
            .next()
            .map(|line| line.trim().to_string())
            .ok_or(StructureError::EmptyToc)?;

        let mut entries = Vec::new();
        for line in lines {
            if line.trim().is_empty() {
                continue;
            }
            match parse_toc_line(line) {
                Some(entry) => entries.push(entry),
                None => log::warn!("Skipping unrecognised table of contents line: {line:?}"),
            }
        }

        let toc = Toc {
            title_line,
            entries,
        };
        toc.check_depths()?;
        log::debug!("Parsed {} table of contents entries", toc.entries.len());
        Ok(toc)
    }

    /// Parse the TOC from its pages
    pub fn from_pages(pages: &[Page]) -> Result<Self> {
        Self::parse(
            pages
                .iter()
                .flat_map(|page| page.content.iter().map(String::as_str)),
        )
    }

    fn check_depths(&self) -> Result<()> {
        let mut previous = 0;
        for key in self.entries.iter().filter_map(|entry| entry.key.as_deref()) {
            let depth = key_depth(key);
            if depth > previous + 1 {
                return Err(StructureError::TocDepthJump {
                    key: key.to_string(),
                    previous,
                    depth,
                });
            }
            previous = depth;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_patterns() {
        assert_eq!(
            parse_toc_line("Foreword . . . . . . . . . . . . . . . . . . xi"),
            Some(TocEntry::new("Foreword", None))
        );
        assert_eq!(
            parse_toc_line("Introduction                                  xiv"),
            Some(TocEntry::new("Introduction", None))
        );
        assert_eq!(
            parse_toc_line("1     Scope                                     1"),
            Some(TocEntry::new("Scope", Some("1")))
        );
        assert_eq!(
            parse_toc_line("      6.2.1    Scopes of identifiers . . . . . . . . 29"),
            Some(TocEntry::new("Scopes of identifiers", Some("6.2.1")))
        );
        assert_eq!(
            parse_toc_line("  A.1      Lexical grammar . . . . . . 470"),
            Some(TocEntry::new("Lexical grammar", Some("A.1")))
        );
    }

    #[test]
    fn test_roman_page_needs_wide_separator() {
        assert_eq!(parse_toc_line("continued text of the mix"), None);
        assert_eq!(parse_toc_line("Foreword xi"), None);
        assert_eq!(
            parse_toc_line("Foreword  xi"),
            Some(TocEntry::new("Foreword", None))
        );
    }

    #[test]
    fn test_unrecognised_lines_are_dropped() {
        let toc = Toc::parse([
            "Contents",
            "",
            "1    Scope    1",
            "a line that wrapped without page number",
            "2    Normative references    2",
        ])
        .unwrap();
        assert_eq!(toc.title_line, "Contents");
        assert_eq!(
            toc.entries,
            vec![
                TocEntry::new("Scope", Some("1")),
                TocEntry::new("Normative references", Some("2")),
            ]
        );
    }

    #[test]
    fn test_depth_jump_is_fatal() {
        let result = Toc::parse(["Contents", "6    Language    28", "6.2.1    Scopes . . . 29"]);
        assert!(matches!(
            result,
            Err(StructureError::TocDepthJump { previous: 1, depth: 3, .. })
        ));
    }

    #[test]
    fn test_empty_toc() {
        assert!(matches!(Toc::parse([]), Err(StructureError::EmptyToc)));
    }
}
