//! Structured pages
//!
//! A page's content is classified line by line until the first footnote
//! marker. Everything from there on belongs to footnotes, each classified on
//! its own.

use once_cell::sync::Lazy;
use regex::Regex;

use super::cleanup::{group_words, parse_int, reindent_lines};
use super::error::{Result, StructureError};
use super::models::*;
use super::parsing::numbering::open_list_number;
use super::parsing::{LineClassifier, TocMatcher};

/// "123) text" in the footnote area of a page with a numbering margin
static MARGIN_FOOTNOTE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s+\d+\)\s?\S").unwrap());
/// Same, on a page without margin where footnotes may start at column 0
static FLAT_FOOTNOTE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\d+\)\s?\S").unwrap());

fn footnote_marker(indent: usize) -> &'static Regex {
    if indent == 0 {
        &FLAT_FOOTNOTE
    } else {
        &MARGIN_FOOTNOTE
    }
}

impl StructuredPage {
    /// Classify the content of `page`
    pub fn parse(page: &Page, matcher: &mut TocMatcher<'_>) -> Result<Self> {
        Self::parse_from(page, matcher, 0, None)
    }

    /// Classify the content of `page`, continuing an ordered list left open
    /// at the end of `previous`
    pub fn parse_after(
        page: &Page,
        matcher: &mut TocMatcher<'_>,
        previous: Option<&StructuredPage>,
    ) -> Result<Self> {
        let carried = previous.and_then(|previous| open_list_number(&previous.elements));
        Self::parse_from(page, matcher, 0, carried)
    }

    fn parse_from(
        page: &Page,
        matcher: &mut TocMatcher<'_>,
        start: usize,
        carried_list: Option<u32>,
    ) -> Result<Self> {
        let marker = footnote_marker(page.indent());
        let content = &page.content;

        let mut classifier = LineClassifier::new(page.indent()).continuing_list(carried_list);
        let mut index = start;
        while index < content.len() && !marker.is_match(&content[index]) {
            classifier
                .parse_line(&content[index], matcher)
                .map_err(|e| e.at_line(content, index))?;
            index += 1;
        }

        let footnotes = parse_footnotes(page, matcher, index)?;
        Ok(Self {
            elements: classifier.into_elements(),
            footnotes,
        })
    }

    /// Remove the indentation common to all lines of each code block
    pub fn reindent_codes(&mut self) {
        let footnote_elements = self
            .footnotes
            .iter_mut()
            .flat_map(|footnote| footnote.elements.iter_mut());
        for element in self.elements.iter_mut().chain(footnote_elements) {
            if let Some(code) = element.code_mut() {
                code.lines = reindent_lines(&code.lines);
            }
        }
    }
}

/// Classify the footnote area of `page`, starting at content line `begin`
fn parse_footnotes(page: &Page, matcher: &mut TocMatcher<'_>, begin: usize) -> Result<Footnotes> {
    let marker = footnote_marker(page.indent());
    let content = &page.content;

    let mut parsed: Vec<(u32, LineClassifier)> = Vec::new();
    // false while the lines of an unreadable footnote are being skipped
    let mut current = false;
    for (index, line) in content.iter().enumerate().skip(begin) {
        let result = if marker.is_match(line) {
            let Some((number, text)) = line.split_once(')') else {
                continue;
            };
            let Some(id) = parse_int(number) else {
                log::warn!("Could not parse footnote number {:?}, skipping footnote", number.trim());
                current = false;
                continue;
            };
            if parsed.iter().any(|(existing, _)| *existing == id) {
                return Err(StructureError::DuplicateFootnote(id).at_line(content, index));
            }
            let mut classifier = LineClassifier::new(page.indent());
            let result = classifier.parse_line_with_indent(text, matcher, 0);
            parsed.push((id, classifier));
            current = true;
            result
        } else if current {
            match parsed.last_mut() {
                Some((_, classifier)) => classifier.parse_line(line, matcher),
                None => Ok(()),
            }
        } else {
            Ok(())
        };
        result.map_err(|e| e.at_line(content, index))?;
    }

    let mut footnotes = Footnotes::new();
    for (id, classifier) in parsed {
        footnotes.insert(id, classifier.into_elements());
    }
    Ok(footnotes)
}

impl CoverPage {
    /// Take the subheader and title lines off the top of `page`, then
    /// classify the rest
    pub fn parse(page: &Page, matcher: &mut TocMatcher<'_>) -> Result<Self> {
        let content = &page.content;
        let non_blank = |from: usize| (from..content.len()).find(|&i| !content[i].is_empty());

        let subheader_line = non_blank(0).ok_or(StructureError::MissingCoverLine("subheader"))?;
        let title_line =
            non_blank(subheader_line + 1).ok_or(StructureError::MissingCoverLine("title"))?;

        Ok(Self {
            subheader: group_words(&content[subheader_line])
                .into_iter()
                .map(str::to_string)
                .collect(),
            title: content[title_line].trim().to_string(),
            page: StructuredPage::parse_from(page, matcher, title_line + 1, None)?,
        })
    }
}
