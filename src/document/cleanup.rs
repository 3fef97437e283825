//! Column and word-group helpers
//!
//! Fixed-width layout means positions are counted in characters, not bytes:
//! the dumps are full of em dashes, bullets and minus signs.

/// Split a string into groups of words.
///
/// A group is a run of words separated by single spaces; two or more spaces
/// start a new group.
pub(crate) fn group_words(line: &str) -> Vec<&str> {
    line.split("  ")
        .map(str::trim_start)
        .filter(|group| !group.is_empty())
        .collect()
}

/// Split on whitespace runs at most `max_splits` times. The last part keeps
/// the remainder of the text.
pub(crate) fn split_words(text: &str, max_splits: usize) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut rest = text.trim_start();
    while !rest.is_empty() {
        if parts.len() == max_splits {
            parts.push(rest);
            break;
        }
        match rest.split_once(char::is_whitespace) {
            Some((word, tail)) => {
                parts.push(word);
                rest = tail.trim_start();
            }
            None => {
                parts.push(rest);
                break;
            }
        }
    }
    parts
}

pub(crate) fn is_int(text: &str) -> bool {
    text.trim().parse::<i64>().is_ok()
}

pub(crate) fn parse_int(text: &str) -> Option<u32> {
    text.trim().parse().ok()
}

/// Number of leading whitespace characters
pub(crate) fn leading_whitespace(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

/// Split `line` before its `column`-th character. Lines shorter than the
/// column end up entirely on the left.
pub(crate) fn split_at_column(line: &str, column: usize) -> (&str, &str) {
    match line.char_indices().nth(column) {
        Some((index, _)) => line.split_at(index),
        None => (line, ""),
    }
}

/// True when the first `width` characters (the whole line if it is shorter)
/// are all whitespace and there is at least one of them.
pub(crate) fn is_blank_prefix(line: &str, width: usize) -> bool {
    let (prefix, _) = split_at_column(line, width);
    !prefix.is_empty() && prefix.chars().all(char::is_whitespace)
}

pub(crate) fn char_at(line: &str, column: usize) -> Option<char> {
    line.chars().nth(column)
}

/// Remove the whitespace common to all non-empty lines
pub(crate) fn reindent_lines(lines: &[String]) -> Vec<String> {
    let margin = lines
        .iter()
        .filter(|line| !line.is_empty())
        .map(|line| leading_whitespace(line))
        .min()
        .unwrap_or(0);
    lines
        .iter()
        .map(|line| split_at_column(line, margin).1.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_words() {
        assert_eq!(group_words("INT_MAX      +32767"), vec!["INT_MAX", "+32767"]);
        assert_eq!(group_words("one two   three"), vec!["one two", "three"]);
        assert_eq!(group_words("   indented  text"), vec!["indented", "text"]);
        assert!(group_words("").is_empty());
    }

    #[test]
    fn test_split_words() {
        assert_eq!(split_words("  NOTE   2  The rest  of it", 2), vec!["NOTE", "2", "The rest  of it"]);
        assert_eq!(split_words("EXAMPLE", 2), vec!["EXAMPLE"]);
        assert!(split_words("   ", 1).is_empty());
    }

    #[test]
    fn test_columns_count_characters() {
        assert_eq!(split_at_column("— item", 2), ("— ", "item"));
        assert_eq!(split_at_column("ab", 5), ("ab", ""));
        assert_eq!(char_at("−12 x", 0), Some('−'));
        assert!(is_blank_prefix("    x", 4));
        assert!(!is_blank_prefix("   x", 4));
        assert!(!is_blank_prefix("", 4));
    }

    #[test]
    fn test_reindent_lines() {
        let lines = vec![
            "      int x;".to_string(),
            String::new(),
            "          x = 1;".to_string(),
        ];
        assert_eq!(
            reindent_lines(&lines),
            vec!["int x;".to_string(), String::new(), "    x = 1;".to_string()]
        );
    }
}
