//! Clause numbering patterns and ordered list sequencing
//!
//! Clause keys are dotted numbers rooted at a chapter integer or an annex
//! letter ("6.7.3", "A.2"). Ordered lists must count up from 1 without gaps.

use once_cell::sync::Lazy;
use regex::Regex;

use super::super::error::{Result, StructureError};
use super::super::models::*;

pub(crate) const ANNEX_PATTERN: &str = r"[A-Z]\b";
pub(crate) const CHAPTER_PATTERN: &str = r"\d+";

/// Dotted clause key: "6.2.1", "A.3"
pub(crate) static KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"^(?:{CHAPTER_PATTERN}|{ANNEX_PATTERN})(?:\.\d+)+")).unwrap());

/// Bare chapter number followed by a period: "7."
pub(crate) static CHAPTER_WITH_PERIOD: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"^{CHAPTER_PATTERN}\.")).unwrap());

/// Whether a heading's first token is a clause number proper, as opposed to
/// a bare chapter number that stays part of the title text
pub(crate) fn is_numbered_key(token: &str) -> bool {
    KEY.is_match(token) || CHAPTER_WITH_PERIOD.is_match(token)
}

/// Number of components in a clause key
pub(crate) fn key_depth(key: &str) -> usize {
    key.trim_end_matches('.').split('.').count()
}

/// Check that an ordered list item numbered `number` may follow `elements`.
///
/// Items count up by one from 1. A list is found by walking back to the
/// nearest ordered item; a heading ends the search. `carried` is the number
/// of the last item of a list left open at the end of the previous page.
pub(crate) fn check_list_number(
    elements: &[Element],
    carried: Option<u32>,
    number: u32,
    line: &str,
) -> Result<()> {
    if number == 1 {
        return Ok(());
    }
    let mut previous = carried;
    for element in elements.iter().rev() {
        match element {
            Element::OrderedListItem { number, .. } => {
                previous = Some(*number);
                break;
            }
            element if element.is_heading() => {
                previous = None;
                break;
            }
            _ => {}
        }
    }
    match previous {
        Some(previous) if previous + 1 == number => Ok(()),
        Some(previous) => Err(StructureError::NonConsecutiveListItem {
            previous,
            found: number,
            line: line.to_string(),
        }),
        None => Err(StructureError::ListNotStartingAtOne {
            found: number,
            line: line.to_string(),
        }),
    }
}

/// Number of the last item of a list still open at the end of `elements`
pub(crate) fn open_list_number(elements: &[Element]) -> Option<u32> {
    for element in elements.iter().rev() {
        match element {
            Element::OrderedListItem { number, .. } => return Some(*number),
            element if element.is_heading() => return None,
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(number: u32) -> Element {
        Element::OrderedListItem {
            number,
            text: Text::new("item"),
        }
    }

    #[test]
    fn test_key_patterns() {
        assert!(is_numbered_key("6.2.1"));
        assert!(is_numbered_key("A.1"));
        assert!(is_numbered_key("7."));
        assert!(!is_numbered_key("7"));
        assert!(!is_numbered_key("Annex"));
        assert_eq!(key_depth("6.7.3.2"), 4);
        assert_eq!(key_depth("7."), 1);
    }

    #[test]
    fn test_consecutive_numbers() {
        let elements = vec![item(1), Element::Paragraph(Text::new("aside")), item(2)];
        assert!(check_list_number(&elements, None, 3, "3. c").is_ok());
        assert!(matches!(
            check_list_number(&elements, None, 4, "4. d"),
            Err(StructureError::NonConsecutiveListItem { previous: 2, found: 4, .. })
        ));
    }

    #[test]
    fn test_list_must_start_at_one() {
        let elements = vec![item(1), Element::TitleHeading { text: "Scope".into() }];
        assert!(matches!(
            check_list_number(&elements, None, 2, "2. b"),
            Err(StructureError::ListNotStartingAtOne { found: 2, .. })
        ));
        assert!(check_list_number(&[], Some(4), 5, "5. e").is_ok());
    }

    #[test]
    fn test_open_list_number() {
        assert_eq!(open_list_number(&[item(1), item(2)]), Some(2));
        assert_eq!(
            open_list_number(&[item(1), Element::NumberedHeading { key: "6.1".into() }]),
            None
        );
    }
}
