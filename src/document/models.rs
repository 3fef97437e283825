//! Core data structures for document representation
//!
//! This module defines all the public types used to represent a structured
//! document: the typed elements recovered from the page layout, the per-page
//! containers that own them, and the merged sections handed to renderers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Footnote ids referenced from a piece of text
pub type FootnoteRefs = BTreeSet<u32>;

/// Placeholder substituted for the in-text reference to a footnote
pub fn footnote_placeholder(id: u32) -> String {
    format!("\x1bfootnote{id}\x1b")
}

/// Accumulated text of a text-bearing element.
///
/// Newlines inside `content` are the line breaks of the source layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Text {
    pub content: String,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub footnotes: FootnoteRefs,
}

/// Preformatted lines. Leading whitespace is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Code {
    pub lines: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub footnotes: FootnoteRefs,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Element {
    Paragraph(Text),
    NumberedParagraph {
        number: u32,
        text: Text,
    },
    NoteParagraph {
        number: u32,
        note_number: Option<u32>,
        /// "Note N to entry:" rather than "NOTE N"
        #[serde(default)]
        to_entry: bool,
        text: Text,
    },
    ExampleParagraph {
        number: u32,
        example_number: Option<u32>,
        text: Text,
    },
    UnorderedListItem {
        /// 1 for an em dash bullet, 2 for a round bullet
        level: u8,
        /// Column of the bullet, used to recognise continuation lines
        indent: usize,
        text: Text,
    },
    OrderedListItem {
        number: u32,
        text: Text,
    },
    TitleHeading {
        text: String,
    },
    NumberedHeading {
        key: String,
    },
    NumberedTitleHeading {
        key: String,
        text: String,
    },
    Code(Code),
    NumberedCode {
        number: u32,
        code: Code,
    },
    ValueDefinition {
        value: String,
        text: Text,
    },
    NumberedValueDefinition {
        number: u32,
        value: String,
        text: Text,
    },
}

impl Element {
    /// Short variant name, used by the text dump
    pub fn kind(&self) -> &'static str {
        match self {
            Element::Paragraph(_) => "Paragraph",
            Element::NumberedParagraph { .. } => "NumberedParagraph",
            Element::NoteParagraph { .. } => "NoteParagraph",
            Element::ExampleParagraph { .. } => "ExampleParagraph",
            Element::UnorderedListItem { .. } => "UnorderedListItem",
            Element::OrderedListItem { .. } => "OrderedListItem",
            Element::TitleHeading { .. } => "TitleHeading",
            Element::NumberedHeading { .. } => "NumberedHeading",
            Element::NumberedTitleHeading { .. } => "NumberedTitleHeading",
            Element::Code(_) => "Code",
            Element::NumberedCode { .. } => "NumberedCode",
            Element::ValueDefinition { .. } => "ValueDefinition",
            Element::NumberedValueDefinition { .. } => "NumberedValueDefinition",
        }
    }

    pub fn text(&self) -> Option<&Text> {
        match self {
            Element::Paragraph(text)
            | Element::NumberedParagraph { text, .. }
            | Element::NoteParagraph { text, .. }
            | Element::ExampleParagraph { text, .. }
            | Element::UnorderedListItem { text, .. }
            | Element::OrderedListItem { text, .. }
            | Element::ValueDefinition { text, .. }
            | Element::NumberedValueDefinition { text, .. } => Some(text),
            _ => None,
        }
    }

    pub fn text_mut(&mut self) -> Option<&mut Text> {
        match self {
            Element::Paragraph(text)
            | Element::NumberedParagraph { text, .. }
            | Element::NoteParagraph { text, .. }
            | Element::ExampleParagraph { text, .. }
            | Element::UnorderedListItem { text, .. }
            | Element::OrderedListItem { text, .. }
            | Element::ValueDefinition { text, .. }
            | Element::NumberedValueDefinition { text, .. } => Some(text),
            _ => None,
        }
    }

    pub fn code(&self) -> Option<&Code> {
        match self {
            Element::Code(code) | Element::NumberedCode { code, .. } => Some(code),
            _ => None,
        }
    }

    pub fn code_mut(&mut self) -> Option<&mut Code> {
        match self {
            Element::Code(code) | Element::NumberedCode { code, .. } => Some(code),
            _ => None,
        }
    }

    /// Footnote references of text and code elements; headings carry none
    pub fn footnotes(&self) -> Option<&FootnoteRefs> {
        match self {
            Element::Code(code) | Element::NumberedCode { code, .. } => Some(&code.footnotes),
            _ => self.text().map(|text| &text.footnotes),
        }
    }

    pub fn footnotes_mut(&mut self) -> Option<&mut FootnoteRefs> {
        match self {
            Element::Code(code) | Element::NumberedCode { code, .. } => Some(&mut code.footnotes),
            _ => self.text_mut().map(|text| &mut text.footnotes),
        }
    }

    /// Plain, numbered, note and example paragraphs
    pub fn is_paragraph(&self) -> bool {
        matches!(
            self,
            Element::Paragraph(_)
                | Element::NumberedParagraph { .. }
                | Element::NoteParagraph { .. }
                | Element::ExampleParagraph { .. }
        )
    }

    pub fn is_value_definition(&self) -> bool {
        matches!(
            self,
            Element::ValueDefinition { .. } | Element::NumberedValueDefinition { .. }
        )
    }

    pub fn is_code(&self) -> bool {
        matches!(self, Element::Code(_) | Element::NumberedCode { .. })
    }

    pub fn is_heading(&self) -> bool {
        matches!(
            self,
            Element::TitleHeading { .. }
                | Element::NumberedHeading { .. }
                | Element::NumberedTitleHeading { .. }
        )
    }

    /// Append a continuation line: text elements go through the text
    /// accumulator, code elements keep the line as is. Headings never take
    /// continuation lines.
    pub fn add_content(&mut self, line: &str) {
        if let Some(code) = self.code_mut() {
            code.add_content(line);
        } else if let Some(text) = self.text_mut() {
            text.add_content(line);
        }
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.content.replace('\n', r"\n"))
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Paragraph(text) => write!(f, "{text}"),
            Element::NumberedParagraph { number, text } => write!(f, "{number}\t{text}"),
            Element::NoteParagraph {
                number,
                note_number,
                to_entry,
                text,
            } => match (note_number, to_entry) {
                (Some(note), true) => write!(f, "{number}\tNote {note} to entry: {text}"),
                (Some(note), false) => write!(f, "{number}\tNOTE {note} {text}"),
                (None, _) => write!(f, "{number}\tNOTE {text}"),
            },
            Element::ExampleParagraph {
                number,
                example_number,
                text,
            } => match example_number {
                Some(example) => write!(f, "{number}\tEXAMPLE {example} {text}"),
                None => write!(f, "{number}\tEXAMPLE {text}"),
            },
            Element::UnorderedListItem { level, text, .. } => {
                let nesting = "  ".repeat(usize::from(level.saturating_sub(1)));
                write!(f, "{nesting}{text}")
            }
            Element::OrderedListItem { number, text } => write!(f, "{number}. {text}"),
            Element::TitleHeading { text } => f.write_str(text),
            Element::NumberedHeading { key } => f.write_str(key),
            Element::NumberedTitleHeading { key, text } => write!(f, "{key} {text}"),
            Element::Code(code) => write!(f, "{:?}", code.lines),
            Element::NumberedCode { number, code } => write!(f, "{number}\t{:?}", code.lines),
            Element::ValueDefinition { value, text } => write!(f, "{value}:\t{text}"),
            Element::NumberedValueDefinition {
                number,
                value,
                text,
            } => write!(f, "{number}\t{value}:\t{text}"),
        }
    }
}

/// The footnotes of a page, keyed by footnote id in order of appearance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Footnotes(Vec<Footnote>);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Footnote {
    pub id: u32,
    pub elements: Vec<Element>,
}

impl Footnotes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, id: u32) -> bool {
        self.0.iter().any(|footnote| footnote.id == id)
    }

    pub fn get(&self, id: u32) -> Option<&[Element]> {
        self.0
            .iter()
            .find(|footnote| footnote.id == id)
            .map(|footnote| footnote.elements.as_slice())
    }

    /// Insert a new footnote at the end. Returns `false` and leaves the map
    /// untouched if the id is already present.
    pub fn insert(&mut self, id: u32, elements: Vec<Element>) -> bool {
        if self.contains(id) {
            return false;
        }
        self.0.push(Footnote { id, elements });
        true
    }

    pub fn ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().map(|footnote| footnote.id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Footnote> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Footnote> {
        self.0.iter_mut()
    }
}

impl IntoIterator for Footnotes {
    type Item = Footnote;
    type IntoIter = std::vec::IntoIter<Footnote>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// A page of text split into header, footer and content.
///
/// `content` starts and ends with non-blank lines, every line is right
/// trimmed. `indent` is the width of the left margin in which only paragraph
/// numbers appear.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub header: Vec<String>,
    pub footer: Vec<String>,
    pub content: Vec<String>,
    pub(crate) indent: usize,
}

/// The typed elements making up one page (or several merged pages)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredPage {
    pub elements: Vec<Element>,
    pub footnotes: Footnotes,
}

/// A structured page preceded by a second header and a title line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverPage {
    pub subheader: Vec<String>,
    pub title: String,
    pub page: StructuredPage,
}

/// One line of the table of contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    pub title: String,
    /// Dotted clause number, bare chapter number, or none for unnumbered titles
    pub key: Option<String>,
}

impl TocEntry {
    pub fn new(title: impl Into<String>, key: Option<&str>) -> Self {
        Self {
            title: title.into(),
            key: key.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub title: String,
    pub metadata: DocumentMetadata,
    pub toc: Vec<TocEntry>,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub file_path: String,
    pub file_size: u64,
    pub page_count: usize,
    pub footnote_count: usize,
}

/// A run of pages structured with one TOC matcher and merged together
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subheader: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub elements: Vec<Element>,
    pub footnotes: Footnotes,
}

#[derive(Debug, Clone)]
pub struct SearchResult {
    pub section_index: usize,
    pub element_index: usize,
    pub text: String,
    pub start_pos: usize,
    pub end_pos: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutlineItem {
    pub title: String,
    pub level: u8,
    pub section_index: usize,
    pub element_index: usize,
}
