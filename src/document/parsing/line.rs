//! Line classification state machine
//!
//! Lines arrive top to bottom. Each non-blank line either starts a new
//! element or continues the element on top of the output. Indentation,
//! punctuation and the table of contents are the only signals; the first
//! rule that applies wins.

use super::super::cleanup::{is_blank_prefix, parse_int, split_at_column, split_words};
use super::super::error::{Result, StructureError};
use super::super::models::*;
use super::heading::TocMatcher;
use super::list::{
    continues_unordered_item, is_bullet_start, is_ordered_start, parse_ordered_item,
    parse_unordered_item,
};
use super::numbering::{check_list_number, is_numbered_key};
use super::table::{detect_value_definition, value_definition};

/// Paragraphs that end a "Syntax" block
const AFTER_SYNTAX: &[&str] = &["Constraints", "Description", "Semantics"];
const SYNTAX: &str = "Syntax";

// The operation binding table of annex F runs over several pages of
// unindented lines full of clause references.
const REFERENCE_TABLE_CAPTION: &str = "Table F.2: Operation binding";
const REFERENCE_TABLE_STARTS: &[&str] = &["setPayload", "convertFromHexCharacter", "restoreModes"];

const FORWARD_REFERENCES: &str = "Forward references: ";
/// Value definition whose columns were extracted too close together
const CRAMPED_DEFINITION: &str = "o,u,x,X ";
/// Code example printed without indentation
const UNINDENTED_CODE: &str = "/* Yields a";

/// Residual indentation of a continuation line
const CONTINUATION_INDENT: usize = 4;
/// Residual indentation of a code line
const CODE_INDENT: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SyntaxMode {
    Outside,
    /// "Syntax" seen, no code line yet
    Opened,
    Inside,
}

/// Turns the lines of a page (or of one footnote) into elements
#[derive(Debug)]
pub struct LineClassifier {
    elements: Vec<Element>,
    /// Whether the next line may continue the last element
    in_element: bool,
    indent: usize,
    syntax: SyntaxMode,
    in_reference_table: bool,
    carried_list: Option<u32>,
}

impl LineClassifier {
    /// `indent` is the width of the paragraph numbering margin, 0 for none
    pub fn new(indent: usize) -> Self {
        Self {
            elements: Vec::new(),
            in_element: false,
            indent,
            syntax: SyntaxMode::Outside,
            in_reference_table: false,
            carried_list: None,
        }
    }

    /// Continue the numbering of an ordered list left open on the previous page
    pub fn continuing_list(mut self, last_number: Option<u32>) -> Self {
        self.carried_list = last_number;
        self
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn into_elements(self) -> Vec<Element> {
        self.elements
    }

    /// Classify one line, using the margin width given at construction
    pub fn parse_line(&mut self, line: &str, matcher: &mut TocMatcher<'_>) -> Result<()> {
        self.parse_line_with_indent(line, matcher, self.indent)
    }

    /// Classify one line with an explicit margin width
    pub fn parse_line_with_indent(
        &mut self,
        line: &str,
        matcher: &mut TocMatcher<'_>,
        indent: usize,
    ) -> Result<()> {
        if line.is_empty() {
            self.in_element = false;
            return Ok(());
        }
        if indent == 0 {
            self.parse_unindented(line, matcher)
        } else {
            self.parse_with_margin(line, indent, matcher)
        }
    }

    fn push(&mut self, element: Element, in_element: bool) {
        self.elements.push(element);
        self.in_element = in_element;
    }

    fn parse_with_margin(
        &mut self,
        line: &str,
        indent: usize,
        matcher: &mut TocMatcher<'_>,
    ) -> Result<()> {
        let (margin, unindented) = split_at_column(line, indent);
        if is_blank_prefix(line, indent) {
            return self.parse_unindented(unindented, matcher);
        }

        let number = parse_int(margin).ok_or_else(|| StructureError::MarginNumber {
            indent,
            line: line.to_string(),
        })?;
        if is_blank_prefix(unindented, CODE_INDENT) || self.syntax == SyntaxMode::Opened {
            self.push(
                Element::NumberedCode {
                    number,
                    code: Code::new(unindented),
                },
                true,
            );
        } else {
            self.syntax = SyntaxMode::Outside;
            self.in_reference_table = false;
            self.push(numbered_paragraph(number, unindented), true);
        }
        Ok(())
    }

    fn parse_unindented(&mut self, line: &str, matcher: &mut TocMatcher<'_>) -> Result<()> {
        let stripped = line.trim_start();
        let Some(first) = stripped.split_whitespace().next() else {
            self.in_element = false;
            return Ok(());
        };
        let rest = stripped
            .split_once(char::is_whitespace)
            .map(|(_, rest)| rest.trim_start())
            .filter(|rest| !rest.is_empty());

        if line.contains(REFERENCE_TABLE_CAPTION) || REFERENCE_TABLE_STARTS.contains(&first) {
            self.in_reference_table = true;
        } else if self.in_reference_table && AFTER_SYNTAX.contains(&stripped) {
            self.in_reference_table = false;
        }

        if stripped.starts_with(FORWARD_REFERENCES) {
            self.push(Element::Paragraph(Text::new(line)), true);
            return Ok(());
        }
        if line.starts_with(CRAMPED_DEFINITION) {
            self.push(value_definition(first, rest.unwrap_or_default()), true);
            return Ok(());
        }

        if matcher.match_title(line) {
            let heading = if is_numbered_key(first) {
                Element::NumberedTitleHeading {
                    key: first.trim_end_matches('.').to_string(),
                    text: rest.unwrap_or_default().to_string(),
                }
            } else {
                Element::TitleHeading {
                    text: stripped.to_string(),
                }
            };
            self.push(heading, false);
            return Ok(());
        }
        if !self.in_reference_table && matcher.match_heading(line) {
            let heading = match rest {
                Some(text) => Element::NumberedTitleHeading {
                    key: first.to_string(),
                    text: text.to_string(),
                },
                None => Element::NumberedHeading {
                    key: first.to_string(),
                },
            };
            self.push(heading, false);
            return Ok(());
        }

        if is_bullet_start(first) {
            let item = parse_unordered_item(line)?;
            self.push(item, true);
            return Ok(());
        }
        if is_ordered_start(first) {
            let (number, item) = parse_ordered_item(line)?;
            check_list_number(&self.elements, self.carried_list, number, line)?;
            self.push(item, true);
            return Ok(());
        }
        if let Some(rest) = rest {
            if let Some(definition) = detect_value_definition(line, first, rest) {
                self.push(definition, true);
                return Ok(());
            }
        }

        if is_blank_prefix(line, CONTINUATION_INDENT) {
            if self.in_element && self.continues_last(line) {
                if let Some(last) = self.elements.last_mut() {
                    last.add_content(line);
                }
                return Ok(());
            }
            if let Some(Element::UnorderedListItem { level, .. }) = self.elements.last() {
                if *level > 1 {
                    // indented paragraph inside a nested list
                    self.push(Element::Paragraph(Text::new(line)), true);
                    return Ok(());
                }
            }
            if is_blank_prefix(line, CODE_INDENT) {
                // a blank line inside a code block does not end it
                match self.elements.last_mut().and_then(Element::code_mut) {
                    Some(code) => {
                        code.add_content("");
                        code.add_content(line);
                        self.in_element = true;
                    }
                    None => self.push(Element::Code(Code::new(line)), true),
                }
                return Ok(());
            }
        }

        if line.contains(UNINDENTED_CODE) || self.in_reference_table {
            match self.elements.last_mut().and_then(Element::code_mut) {
                Some(code) => {
                    code.add_content(line);
                    self.in_element = true;
                }
                None => self.push(Element::Code(Code::new(line)), true),
            }
            return Ok(());
        }

        if self.in_element {
            if let Some(last) = self.elements.last_mut() {
                if last.text().is_some() && !last.is_value_definition() {
                    last.add_content(line);
                    return Ok(());
                }
            }
        }

        if self.syntax != SyntaxMode::Outside && AFTER_SYNTAX.contains(&line) {
            self.syntax = SyntaxMode::Outside;
        }
        if self.syntax != SyntaxMode::Outside {
            self.push(Element::Code(Code::new(line)), true);
            self.syntax = SyntaxMode::Inside;
        } else {
            self.push(Element::Paragraph(Text::new(line)), true);
            if line == SYNTAX {
                self.syntax = SyntaxMode::Opened;
            }
        }
        Ok(())
    }

    /// Whether an indented line belongs to the last element
    fn continues_last(&self, line: &str) -> bool {
        match self.elements.last() {
            Some(
                Element::Code(_)
                | Element::NumberedCode { .. }
                | Element::ValueDefinition { .. }
                | Element::NumberedValueDefinition { .. }
                | Element::OrderedListItem { .. },
            ) => true,
            Some(Element::UnorderedListItem { indent, .. }) => {
                continues_unordered_item(*indent, line)
            }
            _ => false,
        }
    }
}

/// Numbered paragraph, refined by its leading words into a note or example
fn numbered_paragraph(number: u32, unindented: &str) -> Element {
    let words = split_words(unindented, 2);
    let first = words.first().copied().unwrap_or_default();
    let second_number = words.get(1).and_then(|word| parse_int(word));
    let after = |skip: usize| words.get(skip..).map(|rest| rest.join(" ")).unwrap_or_default();

    match (first, second_number) {
        ("NOTE", Some(note)) => Element::NoteParagraph {
            number,
            note_number: Some(note),
            to_entry: false,
            text: Text::new(&after(2)),
        },
        ("NOTE", None) => Element::NoteParagraph {
            number,
            note_number: None,
            to_entry: false,
            text: Text::new(&after(1)),
        },
        ("Note", Some(note)) if words.get(2).is_some_and(|w| w.starts_with("to entry: ")) => {
            Element::NoteParagraph {
                number,
                note_number: Some(note),
                to_entry: true,
                text: Text::new(&words[2]["to entry: ".len()..]),
            }
        }
        ("EXAMPLE", Some(example)) => Element::ExampleParagraph {
            number,
            example_number: Some(example),
            text: Text::new(&after(2)),
        },
        ("EXAMPLE", None) => Element::ExampleParagraph {
            number,
            example_number: None,
            text: Text::new(&after(1)),
        },
        _ => Element::NumberedParagraph {
            number,
            text: Text::new(unindented),
        },
    }
}
