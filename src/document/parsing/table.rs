//! Value-definition table detection
//!
//! Tables of values ("INT_MAX   +32767", "%d   int", "__DATE__   The
//! date of translation") survive extraction as two column groups on one
//! line. The column layout is the only signal left.

use super::super::cleanup::{char_at, group_words, is_blank_prefix, is_int, split_at_column};
use super::super::models::*;

/// The second column of a generic definition table starts in this window
const DEFINITION_COLUMNS: std::ops::RangeInclusive<usize> = 12..=15;
/// Minimum gap between the two columns of a generic definition table
const DEFINITION_GAP: usize = 4;

const MINUS_SIGN: char = '−';

pub(crate) fn value_definition(value: &str, content: &str) -> Element {
    let value = value.trim();
    let value = value.strip_suffix(':').unwrap_or(value);
    Element::ValueDefinition {
        value: value.to_string(),
        text: Text::new(content),
    }
}

/// Recognise a value definition on a line without margin.
///
/// `first` and `rest` are the line's first word and the remainder.
pub(crate) fn detect_value_definition(line: &str, first: &str, rest: &str) -> Option<Element> {
    if char_at(line, 3).is_some_and(char::is_whitespace) {
        let (head, _) = split_at_column(line, 3);
        if is_int(head) {
            // value definition of a number
            return Some(value_definition(first, rest));
        }
        if line.starts_with(MINUS_SIGN) && is_int(split_at_column(head, 1).1) {
            // a U+2212 MINUS SIGN where a hyphen-minus was meant
            return Some(value_definition(&first.replace(MINUS_SIGN, "-"), rest));
        }
    }
    if first.len() >= 2 && first.starts_with("__") && first.ends_with("__") {
        // predefined macro name
        return Some(value_definition(first, rest));
    }
    if line.starts_with('%') && first.chars().count() >= 2 {
        // format specifier
        return Some(value_definition(first, rest));
    }

    let groups = group_words(line);
    if !is_blank_prefix(line, 2) && groups.len() == 2 {
        let stripped = line.trim_start();
        let first_width = groups[0].chars().count();
        let (_, tail) = split_at_column(stripped, first_width);
        let second_column = tail
            .find(groups[1])
            .map(|offset| first_width + tail[..offset].chars().count());
        let (gap, _) = split_at_column(tail, DEFINITION_GAP);
        if second_column.is_some_and(|column| DEFINITION_COLUMNS.contains(&column))
            && !gap.is_empty()
            && gap.chars().all(char::is_whitespace)
        {
            return Some(value_definition(groups[0], groups[1]));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(line: &str) -> Option<Element> {
        let (first, rest) = line.trim_start().split_once(char::is_whitespace)?;
        detect_value_definition(line, first, rest)
    }

    fn definition(value: &str, content: &str) -> Option<Element> {
        Some(value_definition(value, content))
    }

    #[test]
    fn test_numeric_value() {
        assert_eq!(detect("0   the value zero"), definition("0", "the value zero"));
        assert_eq!(detect("−1   minus one"), definition("-1", "minus one"));
    }

    #[test]
    fn test_macro_and_format_values() {
        assert_eq!(
            detect("__DATE__ The date of translation"),
            definition("__DATE__", "The date of translation")
        );
        assert_eq!(detect("%d   int argument"), definition("%d", "int argument"));
        assert_eq!(detect("% alone"), None);
    }

    #[test]
    fn test_column_window() {
        assert_eq!(
            detect("CHAR_BIT     number of bits"),
            definition("CHAR_BIT", "number of bits")
        );
        // second group too far right
        assert_eq!(detect("CHAR_BIT              number of bits"), None);
        // ordinary prose
        assert_eq!(detect("This applies to widgets."), None);
    }

    #[test]
    fn test_trailing_colon_removed() {
        assert_eq!(Some(value_definition("value:", " text ")), definition("value", "text"));
    }
}
