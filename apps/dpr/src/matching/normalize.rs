//! Label and key normalization.
//!
//! Table labels ("(xi) Authorized share capital:") and user keys
//! ("Authorized_share_capital") are reduced to the same comparable form:
//! lowercase, `_` and line breaks as spaces, whitespace collapsed, one leading
//! enumerator removed, trailing colons removed.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Leading enumerators used by the Annexure-3 outline, most specific first:
    /// roman numerals `(i)`..`(xviii)`, letters `a.`..`j.`, numbers `1.`..`21.`.
    static ref ENUMERATOR_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"^\((?:xviii|xvii|xvi|xv|xiv|xiii|xii|xi|x|ix|viii|vii|vi|v|iv|iii|ii|i)\)\s*")
            .unwrap(),
        Regex::new(r"^[a-j]\.\s+").unwrap(),
        Regex::new(r"^(?:2[01]|1[0-9]|[1-9])\.\s+").unwrap(),
    ];
}

/// Normalizes a label or key for comparison. An empty result means the text
/// was only an enumerator (e.g. a serial-number cell) and can never match.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase().replace('_', " ");
    let collapsed = lowered.split_whitespace().collect::<Vec<_>>().join(" ");

    let stripped = ENUMERATOR_PATTERNS
        .iter()
        .find_map(|re| re.find(&collapsed).map(|m| &collapsed[m.end()..]))
        .unwrap_or(&collapsed);

    stripped
        .trim_end_matches(|c: char| c == ':' || c.is_whitespace())
        .trim()
        .to_string()
}

/// Splits normalized text into words for the word-bag comparison.
/// Surrounding punctuation is dropped, so "(years)" and "years" compare equal.
pub fn words(normalized: &str) -> impl Iterator<Item = &str> {
    normalized
        .split_ascii_whitespace()
        .map(|w| w.trim_matches(|c: char| c.is_ascii_punctuation()))
        .filter(|w| !w.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_replaces_underscores() {
        assert_eq!(normalize("Land_and_Building"), "land and building");
    }

    #[test]
    fn test_collapses_line_breaks() {
        assert_eq!(
            normalize("Registration details of SPV\n(including registration)"),
            "registration details of spv (including registration)"
        );
    }

    #[test]
    fn test_strips_roman_enumerator() {
        assert_eq!(normalize("(xi) Authorized share capital"), "authorized share capital");
        assert_eq!(normalize("(xviii) Something"), "something");
        assert_eq!(normalize("(iv)Technology"), "technology");
    }

    #[test]
    fn test_strips_letter_and_number_enumerators() {
        assert_eq!(normalize("a. Name of Implementation Agency"), "name of implementation agency");
        assert_eq!(normalize("21. Conclusion"), "conclusion");
        assert_eq!(normalize("9. Implementation Schedule:"), "implementation schedule");
    }

    #[test]
    fn test_strips_only_one_enumerator() {
        assert_eq!(normalize("(i) a. x y"), "a. x y");
    }

    #[test]
    fn test_keeps_non_enumerator_prefixes() {
        assert_eq!(normalize("2.1. Introduction"), "2.1. introduction");
        assert_eq!(normalize("22. Item"), "22. item");
        assert_eq!(normalize("k. Item"), "k. item");
    }

    #[test]
    fn test_strips_trailing_colons() {
        assert_eq!(normalize("Technical Aspects::  "), "technical aspects");
    }

    #[test]
    fn test_enumerator_only_is_empty() {
        assert_eq!(normalize("(iii)"), "");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_words_drop_surrounding_punctuation() {
        let label = normalize("Experience in what capacity/ industry/ years");
        assert_eq!(
            words(&label).collect::<Vec<_>>(),
            vec!["experience", "in", "what", "capacity", "industry", "years"]
        );
        assert_eq!(words("age (years)").collect::<Vec<_>>(), vec!["age", "years"]);
        assert_eq!(words("a / b").collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_idempotent() {
        for label in [
            "(ii) Registration details of SPV",
            "Age (years)",
            "Income Tax / Wealth Tax Status (returns for 3 years to be furnished)",
            "Margin_money_for_Working_Capital",
            "12. Usage Charges:",
            "e. Commitment of Loans (Working capital and/ or term loan)",
        ] {
            let once = normalize(label);
            assert_eq!(normalize(&once), once, "not idempotent for {label:?}");
        }
    }
}
