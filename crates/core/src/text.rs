//! Text preprocessing: line splitting, tokenization, punctuation stripping.
//!
//! Pure functions, no state. Apostrophes survive stripping so that
//! contractions ("don't", "o'er") keep their dictionary spelling.

/// Split raw input into lines, preserving blank lines.
///
/// Callers decide whether blank lines count; the analyzer drops them.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.lines().collect()
}

/// Split a line into whitespace-delimited tokens.
pub fn tokenize_line(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}

/// Strip punctuation from a word, keeping letters and apostrophes.
///
/// Curly apostrophe variants are folded to ASCII first so that
/// "don’t" and "don't" normalize identically.
pub fn strip_punctuation(word: &str) -> String {
    word.chars()
        .map(|c| if c == '\u{2018}' || c == '\u{2019}' { '\'' } else { c })
        .filter(|c| c.is_ascii_alphabetic() || *c == '\'')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_lines_preserves_blanks() {
        let lines = split_lines("one\n\ntwo\n");
        assert_eq!(lines, vec!["one", "", "two"]);
    }

    #[test]
    fn test_tokenize_line_basic() {
        assert_eq!(tokenize_line("  Shall I  compare "), vec!["Shall", "I", "compare"]);
    }

    #[test]
    fn test_tokenize_line_empty() {
        assert!(tokenize_line("   ").is_empty());
        assert!(tokenize_line("").is_empty());
    }

    #[test]
    fn test_strip_punctuation_keeps_apostrophe() {
        assert_eq!(strip_punctuation("summer's"), "summer's");
        assert_eq!(strip_punctuation("don't,"), "don't");
    }

    #[test]
    fn test_strip_punctuation_curly_apostrophe() {
        assert_eq!(strip_punctuation("don\u{2019}t"), "don't");
    }

    #[test]
    fn test_strip_punctuation_drops_everything_else() {
        assert_eq!(strip_punctuation("day!"), "day");
        assert_eq!(strip_punctuation("(aside)"), "aside");
        assert_eq!(strip_punctuation("—"), "");
        assert_eq!(strip_punctuation("42"), "");
    }
}
