//! Continuation merging for text-bearing elements
//!
//! Text extraction breaks lines wherever the page layout did. Joining them
//! back keeps the break as a newline, except where the break cut a word or a
//! hyperlink in two.

use once_cell::sync::Lazy;
use regex::Regex;

use super::super::models::*;

// Line-breaks in hyperlinks can happen after the colon or the double slash.
static HTTP_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?:(//)?$").unwrap());

/// Hyphenated words that keep their hyphen when rejoined across a line break
const KEEP_HYPHEN: &[&str] = &[
    "60559-",          // ISO/IEC 60559-specified
    "bit-",            // bit-precise
    "const-",          // const-qualified
    "decimal-",        // decimal-point
    "derived-",        // derived-declarator-type-list
    "encoding-to-",    // encoding-to-encoding
    "end-of-",         // end-of-file
    "execution-",      // execution-time
    "floating-",       // floating-point
    "function-",       // function-like
    "half-",           // half-revolutions
    "implementation-", // implementation-defined
    "little-",         // little-endian
    "locale-",         // locale-specific
    "new-",            // new-line
    "non-",            // non-arithmetic, non-recursive, non-white-space
    "null-",           // null-terminated
    "pointer-to-",     // pointer-to-pointer
    "real-",           // real-floating
    "runtime-",        // runtime-constraints
    "single-",         // single-quotes
    "storage-",        // storage-class
    "string-from-",    // string-from-encoding
    "type-",           // type-generic
    "va-opt-",         // va-opt-replacement
];

/// How a continuation line is attached to the text before it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Join {
    /// newline, then the whole line
    Newline,
    /// first word glued on, newline, then the rest
    FirstWord,
    /// like `FirstWord`, after dropping the trailing hyphen
    Dehyphenate,
}

fn join_for(content: &str) -> Join {
    if HTTP_BREAK.is_match(content) {
        return Join::FirstWord;
    }
    if content.ends_with('-') {
        let last_word = content.split_whitespace().last().unwrap_or_default();
        if KEEP_HYPHEN.contains(&last_word.to_lowercase().as_str()) {
            return Join::FirstWord;
        }
        return Join::Dehyphenate;
    }
    Join::Newline
}

impl Text {
    pub fn new(content: &str) -> Self {
        Self {
            content: content.trim().to_string(),
            footnotes: FootnoteRefs::new(),
        }
    }

    /// Append a continuation line.
    pub fn add_content(&mut self, line: &str) {
        if self.content.is_empty() {
            self.content = line.trim().to_string();
            return;
        }

        let join = join_for(&self.content);
        if join == Join::Newline {
            self.content.push('\n');
            self.content.push_str(line.trim());
            return;
        }
        if join == Join::Dehyphenate {
            self.content.pop();
        }

        let line = line.trim();
        match line.split_once(char::is_whitespace) {
            Some((first_word, rest)) => {
                self.content.push_str(first_word);
                self.content.push('\n');
                self.content.push_str(rest.trim_start());
            }
            None => self.content.push_str(line),
        }
    }
}

impl Code {
    pub fn new(line: &str) -> Self {
        let mut code = Self::default();
        code.add_content(line);
        code
    }

    pub fn add_content(&mut self, line: &str) {
        self.lines.push(line.trim_end().to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joined(first: &str, second: &str) -> String {
        let mut text = Text::new(first);
        text.add_content(second);
        text.content
    }

    #[test]
    fn test_newline_join() {
        assert_eq!(joined("The value of", "  the expression"), "The value of\nthe expression");
    }

    #[test]
    fn test_dehyphenation_removes_one_hyphen() {
        assert_eq!(joined("an imple-", "mentation"), "an implementation");
        assert_eq!(
            joined("the imple-", "mentation defines"),
            "the implementation\ndefines"
        );
    }

    #[test]
    fn test_compound_keeps_hyphen() {
        assert_eq!(joined("floating-", "point format"), "floating-point\nformat");
        assert_eq!(joined("a Non-", "arithmetic type"), "a Non-arithmetic\ntype");
        assert_eq!(joined("ISO/IEC 60559-", "specified"), "ISO/IEC 60559-specified");
    }

    #[test]
    fn test_broken_hyperlink() {
        assert_eq!(
            joined("see https://", "www.example.org/std and more"),
            "see https://www.example.org/std\nand more"
        );
        assert_eq!(joined("see http:", "//example.org"), "see http://example.org");
    }

    #[test]
    fn test_empty_text_takes_line() {
        let mut text = Text::new("   ");
        text.add_content("  words  ");
        assert_eq!(text.content, "words");
    }

    #[test]
    fn test_code_keeps_leading_whitespace() {
        let mut code = Code::new("    int x;   ");
        code.add_content("        x++;");
        assert_eq!(code.lines, vec!["    int x;", "        x++;"]);
    }
}
