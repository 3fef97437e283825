//! List item detection and parsing
//!
//! Unordered items start with an em dash (first level) or a round bullet
//! (second level); ordered items start with "<integer>.".

use super::super::cleanup::{leading_whitespace, parse_int};
use super::super::error::{Result, StructureError};
use super::super::models::*;

pub(crate) const LEVEL_ONE_BULLET: char = '—';
pub(crate) const LEVEL_TWO_BULLET: char = '•';

pub(crate) fn is_bullet_start(first_word: &str) -> bool {
    first_word.starts_with([LEVEL_ONE_BULLET, LEVEL_TWO_BULLET])
}

pub(crate) fn is_ordered_start(first_word: &str) -> bool {
    match first_word.strip_suffix('.') {
        Some(digits) => !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()),
        None => false,
    }
}

fn split_marker(line: &str) -> Result<(&str, &str)> {
    line.trim_start()
        .split_once(char::is_whitespace)
        .ok_or_else(|| StructureError::EmptyListItem {
            line: line.to_string(),
        })
}

pub(crate) fn parse_unordered_item(line: &str) -> Result<Element> {
    let (bullet, content) = split_marker(line)?;
    let level = match bullet {
        "—" => 1,
        "•" => 2,
        _ => {
            return Err(StructureError::UnknownBullet {
                bullet: bullet.to_string(),
                line: line.to_string(),
            });
        }
    };
    Ok(Element::UnorderedListItem {
        level,
        indent: leading_whitespace(line),
        text: Text::new(content),
    })
}

/// Parse an ordered item, returning its number along with the element
pub(crate) fn parse_ordered_item(line: &str) -> Result<(u32, Element)> {
    let (marker, content) = split_marker(line)?;
    let number = marker
        .strip_suffix('.')
        .and_then(parse_int)
        .ok_or_else(|| StructureError::BadListNumber {
            line: line.to_string(),
        })?;
    Ok((
        number,
        Element::OrderedListItem {
            number,
            text: Text::new(content),
        },
    ))
}

/// Whether an indented line continues an unordered item: its text must be
/// aligned with the item's text, two columns right of the bullet.
pub(crate) fn continues_unordered_item(indent: usize, line: &str) -> bool {
    let text_column = indent + 2;
    line.chars().take(text_column).count() == text_column
        && leading_whitespace(line) == text_column
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bullet_levels() {
        let item = parse_unordered_item("   — first level").unwrap();
        assert_eq!(
            item,
            Element::UnorderedListItem {
                level: 1,
                indent: 3,
                text: Text::new("first level"),
            }
        );
        assert!(matches!(
            parse_unordered_item("• second").unwrap(),
            Element::UnorderedListItem { level: 2, indent: 0, .. }
        ));
    }

    #[test]
    fn test_unknown_bullet_and_empty_item() {
        assert!(matches!(
            parse_unordered_item("—dash glued text"),
            Err(StructureError::UnknownBullet { .. })
        ));
        assert!(matches!(
            parse_unordered_item("—"),
            Err(StructureError::EmptyListItem { .. })
        ));
    }

    #[test]
    fn test_ordered_item() {
        let (number, item) = parse_ordered_item("12. Physical source").unwrap();
        assert_eq!(number, 12);
        assert_eq!(item.text().unwrap().content, "Physical source");
        assert!(is_ordered_start("3."));
        assert!(!is_ordered_start("."));
        assert!(!is_ordered_start("3.1"));
    }

    #[test]
    fn test_continuation_alignment() {
        assert!(continues_unordered_item(2, "    aligned text"));
        assert!(!continues_unordered_item(2, "      too deep"));
        assert!(!continues_unordered_item(2, "   "));
    }
}
