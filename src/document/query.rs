//! Document search and navigation operations
//!
//! This module provides read-only querying operations on structured
//! documents, including full-text search and outline generation.

use super::models::*;
use super::parsing::numbering::key_depth;

/// Searchable text of an element, code lines joined by newlines
fn element_text(element: &Element) -> String {
    match element {
        Element::TitleHeading { text } => text.clone(),
        Element::NumberedHeading { key } => key.clone(),
        Element::NumberedTitleHeading { key, text } => format!("{key} {text}"),
        Element::ValueDefinition { value, text }
        | Element::NumberedValueDefinition { value, text, .. } => {
            format!("{value} {}", text.content)
        }
        _ => match (element.code(), element.text()) {
            (Some(code), _) => code.lines.join("\n"),
            (None, Some(text)) => text.content.clone(),
            (None, None) => String::new(),
        },
    }
}

/// Case-insensitive search over the body elements of every section
pub fn search_document(document: &Document, query: &str) -> Vec<SearchResult> {
    let mut results = Vec::new();
    if query.trim().is_empty() {
        return results;
    }
    let query_lower = query.to_lowercase();

    for (section_index, section) in document.sections.iter().enumerate() {
        for (element_index, element) in section.elements.iter().enumerate() {
            let text = element_text(element);
            let text_lower = text.to_lowercase();
            if let Some(start_pos) = text_lower.find(&query_lower) {
                results.push(SearchResult {
                    section_index,
                    element_index,
                    text,
                    start_pos,
                    end_pos: start_pos + query_lower.len(),
                });
            }
        }
    }

    results
}

/// Headings of every section, nested by clause depth
pub fn generate_outline(document: &Document) -> Vec<OutlineItem> {
    let mut outline = Vec::new();

    for (section_index, section) in document.sections.iter().enumerate() {
        for (element_index, element) in section.elements.iter().enumerate() {
            let (title, level) = match element {
                Element::TitleHeading { text } => (text.clone(), 1),
                Element::NumberedHeading { key } => (key.clone(), key_depth(key)),
                Element::NumberedTitleHeading { key, text } => {
                    (format!("{key} {text}"), key_depth(key))
                }
                _ => continue,
            };
            outline.push(OutlineItem {
                title,
                level: u8::try_from(level).unwrap_or(u8::MAX),
                section_index,
                element_index,
            });
        }
    }

    outline
}
