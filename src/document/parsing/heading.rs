//! Heading detection against the table of contents
//!
//! A heading is only accepted if it is the next title the table of contents
//! announces, or a bare sub-clause number of the title confirmed last. The
//! matcher is a one-way cursor: once a title is confirmed, it can never be
//! matched again.

use once_cell::sync::Lazy;
use regex::Regex;

use super::super::models::*;

/// A clause range written out in running prose: "6.7.3.1 through 6.7.3.4"
static KEY_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\S+\s+(?:through|to|and|or)\s+(?:\d+|[A-Z])(?:\.\d+)+").unwrap()
});

/// Build the pattern a line must match to be the heading of `entry`
fn title_pattern(entry: &TocEntry) -> Option<Regex> {
    let title = entry
        .title
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+");
    let pattern = match &entry.key {
        Some(key) => format!(r"^{}\.?\s+{title}\s*$", regex::escape(key)),
        None => format!(r"^{title}\s*$"),
    };
    match Regex::new(&pattern) {
        Ok(regex) => Some(regex),
        Err(e) => {
            log::warn!("Cannot match title {:?}: {e}", entry.title);
            None
        }
    }
}

fn subheading_pattern(key: &str) -> Option<Regex> {
    Regex::new(&format!(r"^{}(?:\.\d+)+(?:\s|$)", regex::escape(key))).ok()
}

/// Single-pass oracle over the entries of a table of contents.
///
/// `next` is the entry expected next, `parent` the entry confirmed last.
#[derive(Debug, Clone)]
pub struct TocMatcher<'a> {
    entries: &'a [TocEntry],
    next: usize,
    parent: Option<usize>,
    title: Option<Regex>,
    subheading: Option<Regex>,
    exceptions: Vec<String>,
}

impl<'a> TocMatcher<'a> {
    pub fn new(entries: &'a [TocEntry]) -> Self {
        Self::starting_at(entries, 0)
    }

    /// A matcher for a section, skipping the entries that precede the first
    /// title mentioned in `lines`, margin included. Falls back to the start
    /// of the table.
    pub fn for_section<'l>(
        entries: &'a [TocEntry],
        lines: impl IntoIterator<Item = &'l str>,
    ) -> Self {
        let patterns: Vec<Option<Regex>> = entries.iter().map(title_pattern).collect();
        for line in lines {
            let found = patterns
                .iter()
                .position(|pattern| pattern.as_ref().is_some_and(|p| p.is_match(line.trim_start())));
            if let Some(start) = found {
                log::debug!("Section starts at table of contents entry {:?}", entries[start]);
                return Self::starting_at(entries, start);
            }
        }
        Self::new(entries)
    }

    fn starting_at(entries: &'a [TocEntry], next: usize) -> Self {
        Self {
            entries,
            next,
            parent: None,
            title: entries.get(next).and_then(title_pattern),
            subheading: None,
            exceptions: Vec::new(),
        }
    }

    /// Literal line prefixes the heading oracle must reject
    pub fn with_exceptions(mut self, exceptions: Vec<String>) -> Self {
        self.exceptions = exceptions;
        self
    }

    /// The entry expected next, if any remain
    pub fn next_entry(&self) -> Option<&'a TocEntry> {
        self.entries.get(self.next)
    }

    /// The entry confirmed last
    pub fn last_matched(&self) -> Option<&'a TocEntry> {
        self.parent.and_then(|index| self.entries.get(index))
    }

    /// Number of entries not yet confirmed
    pub fn remaining(&self) -> usize {
        self.entries.len() - self.next
    }

    /// Whether `line` is the next expected title. A match consumes the entry.
    pub fn match_title(&mut self, line: &str) -> bool {
        let matched = self.title.as_ref().is_some_and(|title| title.is_match(line));
        if matched {
            self.advance();
        }
        matched
    }

    /// Whether `line` is a sub-clause number of the title confirmed last.
    /// Nothing is consumed.
    pub fn match_heading(&self, line: &str) -> bool {
        if self.exceptions.iter().any(|exception| line.starts_with(exception.as_str()))
            || KEY_RANGE.is_match(line)
        {
            return false;
        }
        self.subheading
            .as_ref()
            .is_some_and(|subheading| subheading.is_match(line))
    }

    fn advance(&mut self) {
        let confirmed = &self.entries[self.next];
        self.subheading = confirmed.key.as_deref().and_then(subheading_pattern);
        self.parent = Some(self.next);
        self.next += 1;
        self.title = self.entries.get(self.next).and_then(title_pattern);
    }
}
