//! Page merging
//!
//! Consecutive structured pages are concatenated. An element cut by a page
//! break shows up as the last element of one page and the first of the
//! next; three such cuts are recognised and stitched back together.

use super::error::{Result, StructureError};
use super::models::*;

/// How the first element of a page continues the last element before it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cut {
    /// Code block running over the page break
    Code,
    /// Sentence running over the page break
    Sentence,
    /// Value definition whose text was set as code on the next page
    Definition,
}

fn find_cut(last: &Element, first: &Element) -> Option<Cut> {
    match first {
        Element::Code(_) if last.is_code() => Some(Cut::Code),
        Element::Paragraph(text)
            if last.text().is_some()
                && text.content.chars().next().is_some_and(char::is_lowercase) =>
        {
            Some(Cut::Sentence)
        }
        Element::Code(_) if last.is_value_definition() => Some(Cut::Definition),
        _ => None,
    }
}

fn stitch(last: &mut Element, first: Element, cut: Cut) {
    match (cut, first) {
        (Cut::Code, Element::Code(code)) => {
            if let Some(last) = last.code_mut() {
                last.lines.extend(code.lines);
                last.footnotes.extend(code.footnotes);
            }
        }
        (Cut::Sentence, Element::Paragraph(text)) => {
            last.add_content(&text.content);
            if let Some(footnotes) = last.footnotes_mut() {
                footnotes.extend(text.footnotes);
            }
        }
        (Cut::Definition, Element::Code(code)) => {
            for line in &code.lines {
                last.add_content(line);
            }
            if let Some(footnotes) = last.footnotes_mut() {
                footnotes.extend(code.footnotes);
            }
        }
        (_, first) => log::error!("Cannot stitch {} onto {}", first.kind(), last.kind()),
    }
}

impl StructuredPage {
    /// Append the content of the page that follows this one
    pub fn absorb(&mut self, next: StructuredPage) -> Result<()> {
        if let Some(id) = next.footnotes.ids().find(|&id| self.footnotes.contains(id)) {
            return Err(StructureError::DuplicateFootnote(id));
        }

        let mut elements = next.elements.into_iter().peekable();
        if let (Some(last), Some(first)) = (self.elements.last_mut(), elements.peek()) {
            if let Some(cut) = find_cut(last, first) {
                log::debug!("Stitching {} cut by a page break", last.kind());
                if let Some(first) = elements.next() {
                    stitch(last, first, cut);
                }
            }
        }
        self.elements.extend(elements);

        for footnote in next.footnotes {
            self.footnotes.insert(footnote.id, footnote.elements);
        }
        Ok(())
    }
}

/// Merge consecutive pages into one
pub fn merge_pages(pages: impl IntoIterator<Item = StructuredPage>) -> Result<StructuredPage> {
    let mut pages = pages.into_iter();
    let mut merged = pages.next().ok_or(StructureError::NoPages)?;
    for page in pages {
        merged.absorb(page)?;
    }
    Ok(merged)
}

impl CoverPage {
    /// Merge a cover page with the pages that follow it
    pub fn merge(self, pages: impl IntoIterator<Item = StructuredPage>) -> Result<CoverPage> {
        let mut page = self.page;
        for next in pages {
            page.absorb(next)?;
        }
        Ok(CoverPage { page, ..self })
    }
}
