//! Footnote post-processing
//!
//! Footnotes are classified like body text, which leaves them with spacing
//! artefacts. These passes normalise them, reattach misplaced references and
//! finally swap every in-text reference for a placeholder.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::cleanup::{is_int, split_words};
use super::models::*;

/// Label of a paragraph full of "<number>)" sequences that are not references
const FORWARD_REFERENCES: &str = "Forward references: ";

/// A whole number closed by a parenthesis
static REFERENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)\)").unwrap());

impl StructuredPage {
    /// Normalise the first element of each footnote and merge consecutive
    /// paragraphs
    pub fn rework_footnotes(&mut self) {
        for footnote in self.footnotes.iter_mut() {
            let elements = &mut footnote.elements;
            if elements.is_empty() {
                continue;
            }
            rework_first_element(elements);
            *elements = merge_paragraphs(std::mem::take(elements));
        }
    }

    /// Reattach footnote references printed on their own line above the
    /// text they belong to.
    ///
    /// Such a reference and the line after it are classified as code:
    ///
    /// ```text
    ///            123)
    /// lorem ipsum
    /// ```
    pub fn fix_footnote_refs(&mut self) {
        let misplaced: Vec<usize> = (1..self.elements.len())
            .filter(|&i| {
                let Element::Code(code) = &self.elements[i] else {
                    return false;
                };
                code.lines.len() >= 2
                    && is_reference_line(&code.lines[0])
                    && self.elements[i - 1].text().is_some()
            })
            .collect();

        for &i in misplaced.iter().rev() {
            let Element::Code(code) = self.elements.remove(i) else {
                continue;
            };
            let previous = &mut self.elements[i - 1];
            previous.add_content(&format!("{}{}", code.lines[1], code.lines[0].trim_start()));
            for line in &code.lines[2..] {
                previous.add_content(line);
            }
        }
    }

    /// Replace every "<id>)" reference to a footnote of this page with its
    /// placeholder, and record the id on the referencing element
    pub fn put_footnote_placeholders(&mut self) {
        let ids: FootnoteRefs = self.footnotes.ids().collect();
        if ids.is_empty() {
            return;
        }

        let footnote_elements = self
            .footnotes
            .iter_mut()
            .flat_map(|footnote| footnote.elements.iter_mut());
        for element in self.elements.iter_mut().chain(footnote_elements) {
            let found = substitute(element, &ids);
            if let Some(footnotes) = element.footnotes_mut() {
                footnotes.extend(found);
            }
        }
    }
}

/// "123)" alone on a line
fn is_reference_line(line: &str) -> bool {
    line.strip_suffix(')').is_some_and(is_int)
}

/// Substitute the references in one element, returning the ids found
fn substitute(element: &mut Element, ids: &FootnoteRefs) -> FootnoteRefs {
    let mut found = FootnoteRefs::new();
    if let Some(code) = element.code_mut() {
        for line in code.lines.iter_mut() {
            if let Some(replaced) = replace_references(line, ids, &mut found) {
                *line = replaced;
            }
        }
    } else if let Some(text) = element.text_mut() {
        if !text.content.starts_with(FORWARD_REFERENCES) {
            if let Some(replaced) = replace_references(&text.content, ids, &mut found) {
                text.content = replaced;
            }
        }
    }
    found
}

/// Swap each "<id>)" whose whole number is one of `ids`. Returns `None` when
/// nothing was replaced.
fn replace_references(text: &str, ids: &FootnoteRefs, found: &mut FootnoteRefs) -> Option<String> {
    let mut replaced = false;
    let result = REFERENCE.replace_all(text, |captures: &Captures| {
        match captures[1].parse::<u32>() {
            Ok(id) if ids.contains(&id) => {
                found.insert(id);
                replaced = true;
                footnote_placeholder(id)
            }
            _ => captures[0].to_string(),
        }
    });
    replaced.then(|| result.into_owned())
}

fn rework_first_element(elements: &mut Vec<Element>) {
    if elements[0].is_paragraph() {
        let Some(text) = elements[0].text_mut() else {
            return;
        };
        let words = split_words(&text.content, 1);
        if words.len() == 2 {
            // extraneous spacing after the footnote number
            text.content = words.join(" ");
            return;
        }

        // a lone first word followed by the rest of the footnote read as code
        let Some(code) = elements.get(1).and_then(Element::code).cloned() else {
            return;
        };
        if let Some(first) = code.lines.first() {
            if let Some(text) = elements[0].text_mut() {
                text.content.push(' ');
                text.content.push_str(first);
            }
        }
        let paragraphs = code
            .lines
            .iter()
            .skip(1)
            .map(|line| Element::Paragraph(Text::new(line)));
        elements.splice(1..2, paragraphs);
    } else if let Element::ValueDefinition { value, text }
    | Element::NumberedValueDefinition { value, text, .. } = &elements[0]
    {
        elements[0] = Element::Paragraph(Text::new(&format!("{value} {}", text.content)));
    }
}

fn merge_paragraphs(elements: Vec<Element>) -> Vec<Element> {
    let mut merged: Vec<Element> = Vec::with_capacity(elements.len());
    let mut last_is_paragraph = false;
    for element in elements {
        if last_is_paragraph {
            if let Some(last) = merged.last_mut() {
                if element.is_paragraph() {
                    if let Some(text) = element.text() {
                        last.add_content(&text.content);
                    }
                    continue;
                }
                if let Element::UnorderedListItem { text, .. } = &element {
                    // an em dash in running text read as a bullet
                    last.add_content(&format!("— {}", text.content));
                    continue;
                }
            }
        }
        last_is_paragraph = element.is_paragraph();
        merged.push(element);
    }
    merged
}
