//! Rule-based extraction from the user's correction notes.

use std::sync::LazyLock;

use regex::Regex;

static PERCENT_TOKEN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)?\s*%").ok());

fn has_percent(sentence: &str) -> bool {
    PERCENT_TOKEN
        .as_ref()
        .is_some_and(|re| re.is_match(sentence))
}

/// Every sentence of the notes containing a percentage becomes a statement.
///
/// Sentences split on `.`, `!`, `?`, `;` and newlines; a `.` between digits
/// ("7.5%") does not split. Statements are trimmed, in order, deduplicated.
pub fn extract_adjustments(notes: &str) -> Vec<String> {
    let mut statements: Vec<String> = Vec::new();
    for sentence in split_sentences(notes) {
        let sentence = sentence.trim().trim_end_matches('.').trim();
        if sentence.is_empty() || !has_percent(sentence) {
            continue;
        }
        if !statements.iter().any(|s| s == sentence) {
            statements.push(sentence.to_string());
        }
    }
    statements
}

fn split_sentences(text: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut parts = Vec::new();
    let mut start = 0;
    for (i, &(pos, c)) in chars.iter().enumerate() {
        let is_break = match c {
            '!' | '?' | ';' | '\n' => true,
            '.' => {
                let prev_digit = i > 0 && chars[i - 1].1.is_ascii_digit();
                let next_digit = chars.get(i + 1).is_some_and(|(_, n)| n.is_ascii_digit());
                !(prev_digit && next_digit)
            }
            _ => false,
        };
        if is_break {
            parts.push(&text[start..pos]);
            start = pos + c.len_utf8();
        }
    }
    parts.push(&text[start..]);
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_only_sentences_with_percentages() {
        let notes = "Add 10% for sloped yards. Old fence needs hauling.";
        assert_eq!(extract_adjustments(notes), vec!["Add 10% for sloped yards"]);
    }

    #[test]
    fn decimal_percentages_do_not_split() {
        let notes = "Discount 7.5% for repeat customers; ok";
        assert_eq!(
            extract_adjustments(notes),
            vec!["Discount 7.5% for repeat customers"]
        );
    }

    #[test]
    fn duplicates_collapse() {
        let notes = "Add 5% for stairs.\nAdd 5% for stairs!";
        assert_eq!(extract_adjustments(notes), vec!["Add 5% for stairs"]);
    }

    #[test]
    fn nothing_to_extract() {
        assert!(extract_adjustments("").is_empty());
        assert!(extract_adjustments("Customer wants it done by Friday.").is_empty());
    }
}
