//! Percentage extraction from adjustment statements.
//!
//! Only statements carrying a percentage token can be priced. Anything else
//! ("Charge extra when there is no gate access") stays visible as text but
//! contributes no dollar amount.

use std::sync::LazyLock;

use regex::Regex;

// A sign only counts at the start of the text or after whitespace, so the
// dash in a range like "10-15%" is not read as a minus.
static PERCENT: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?:(?:^|\s)([+-])\s*)?(\d+(?:\.\d+)?)\s*%(\s+off\b)?").ok()
});

const NEGATIVE_KEYWORDS: &[&str] = &[
    "reduce",
    "reduced",
    "reduction",
    "discount",
    "discounted",
    "lower",
    "decrease",
    "minus",
    "subtract",
    "cut",
    "deduct",
    "rebate",
];

/// Signed fraction for the first percentage token (`"Add 15%"` → `0.15`).
///
/// An explicit sign wins. Otherwise `"N% off"` or a negative keyword anywhere
/// in the statement makes it negative.
pub fn parse_percent(statement: &str) -> Option<f64> {
    let re = PERCENT.as_ref()?;
    let caps = re.captures(statement)?;
    let magnitude: f64 = caps.get(2)?.as_str().parse().ok()?;
    if !magnitude.is_finite() {
        return None;
    }
    let negative = match caps.get(1).map(|m| m.as_str()) {
        Some("-") => true,
        Some(_) => false,
        None => caps.get(3).is_some() || has_negative_keyword(statement),
    };
    let fraction = magnitude / 100.0;
    Some(if negative { -fraction } else { fraction })
}

fn has_negative_keyword(statement: &str) -> bool {
    statement
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| NEGATIVE_KEYWORDS.contains(&word))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_and_trailing_tokens() {
        assert_eq!(parse_percent("15% extra for second story"), Some(0.15));
        assert_eq!(parse_percent("Second story work adds 15%"), Some(0.15));
    }

    #[test]
    fn keywords_make_negative() {
        assert_eq!(parse_percent("Discount 5% for repeat customers"), Some(-0.05));
        assert_eq!(parse_percent("Reduce by 10% in winter"), Some(-0.10));
        assert_eq!(parse_percent("10% off for seniors"), Some(-0.10));
    }

    #[test]
    fn explicit_sign_wins() {
        assert_eq!(parse_percent("-8% for self-supplied materials"), Some(-0.08));
        assert_eq!(parse_percent("+8% less hassle fee"), Some(0.08));
    }

    #[test]
    fn decimals() {
        assert_eq!(parse_percent("Add 7.5% for permits"), Some(0.075));
    }

    #[test]
    fn statements_without_percentages_are_unpriced() {
        assert_eq!(parse_percent("Charge extra when the yard has no gate access"), None);
        assert_eq!(parse_percent("Add $500 for permits"), None);
        assert_eq!(parse_percent(""), None);
    }

    #[test]
    fn keyword_must_be_a_whole_word() {
        // "cutting" contains "cut" but is not the keyword.
        assert_eq!(parse_percent("Add 10% for tile cutting"), Some(0.10));
    }

    #[test]
    fn range_dash_is_not_a_sign() {
        assert_eq!(parse_percent("Add 10-15% for steep slopes"), Some(0.15));
        assert_eq!(parse_percent("Discount 10-15% in winter"), Some(-0.15));
    }

    #[test]
    fn hyphenated_and_comparative_words_stay_positive() {
        assert_eq!(parse_percent("Add 10% for haul-off"), Some(0.10));
        assert_eq!(parse_percent("Add 5% when less than a week notice"), Some(0.05));
    }

    #[test]
    fn off_counts_only_after_the_percentage() {
        assert_eq!(parse_percent("Take 12% off when the crew is idle"), Some(-0.12));
        assert_eq!(parse_percent("Add 12% if the old deck must come off"), Some(0.12));
    }
}
