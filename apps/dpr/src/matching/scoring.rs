//! Candidate scoring: pluggable, trait-based scorer that measures how well a
//! user key fits a document label.
//!
//! Default: `WordBagScorer` (pure-Rust, deterministic, fully testable).

use std::collections::HashSet;

use super::normalize::words;

// ────────────────────────────────────────────────────────────────────────────
// Score bands
// ────────────────────────────────────────────────────────────────────────────

/// Normalized label and key are identical.
pub const EXACT_SCORE: u32 = 10_000;
/// Key is a long enough substring of the label. Band is 5000 + 1000 × coverage.
pub const SUBSTRING_BASE: u32 = 5_000;
/// Every key word appears in the label. Band is 3000 + 100 × matched words.
pub const ALL_WORDS_BASE: u32 = 3_000;
/// At least 70% of key words appear in the label. Band is 1000 + 50 × matched words.
pub const MOST_WORDS_BASE: u32 = 1_000;
/// A fuzzy score must be strictly above this to bind.
pub const BIND_THRESHOLD: u32 = 1_000;

/// Substring matches need a key longer than this many characters.
const MIN_SUBSTRING_KEY_CHARS: usize = 5;
/// Substring matches need the key to cover more than this share of the label.
const MIN_SUBSTRING_COVERAGE: f64 = 0.5;
const MIN_BAG_WORDS: usize = 2;
const MOST_WORDS_RATIO: f64 = 0.7;

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Scores a normalized key against a normalized label. Zero means no match.
/// Implement this to swap scoring without touching the matcher.
pub trait CandidateScorer: Send + Sync {
    fn score(&self, label: &str, key: &str) -> u32;

    /// Short backend name, logged with each binding.
    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// WordBagScorer: default implementation
// ────────────────────────────────────────────────────────────────────────────

/// Algorithm (first band that applies wins):
/// 1. label == key → 10000
/// 2. key is a substring of the label, key longer than 5 chars and covering
///    more than half the label → 5000 + round(1000 × coverage)
/// 3. key has ≥ 2 distinct words:
///    - all of them in the label → 3000 + 100 × n
///    - ≥ 70% of them in the label → 1000 + 50 × matched
/// 4. otherwise 0
///
/// A short or low-coverage substring falls through to the word bag.
pub struct WordBagScorer;

impl CandidateScorer for WordBagScorer {
    fn score(&self, label: &str, key: &str) -> u32 {
        if label.is_empty() || key.is_empty() {
            return 0;
        }
        if label == key {
            return EXACT_SCORE;
        }
        substring_score(label, key)
            .or_else(|| word_bag_score(label, key))
            .unwrap_or(0)
    }

    fn backend(&self) -> &'static str {
        "word_bag"
    }
}

fn substring_score(label: &str, key: &str) -> Option<u32> {
    let key_chars = key.chars().count();
    if key_chars <= MIN_SUBSTRING_KEY_CHARS || !label.contains(key) {
        return None;
    }
    let coverage = key_chars as f64 / label.chars().count() as f64;
    (coverage > MIN_SUBSTRING_COVERAGE)
        .then(|| SUBSTRING_BASE + (coverage * 1000.0).round() as u32)
}

fn word_bag_score(label: &str, key: &str) -> Option<u32> {
    let key_words: HashSet<&str> = words(key).collect();
    if key_words.len() < MIN_BAG_WORDS {
        return None;
    }
    let label_words: HashSet<&str> = words(label).collect();
    let matched = key_words.intersection(&label_words).count();
    let total = key_words.len();

    if matched == total {
        Some(ALL_WORDS_BASE + 100 * matched as u32)
    } else if matched as f64 >= MOST_WORDS_RATIO * total as f64 {
        Some(MOST_WORDS_BASE + 50 * matched as u32)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(label: &str, key: &str) -> u32 {
        WordBagScorer.score(label, key)
    }

    #[test]
    fn test_exact() {
        assert_eq!(score("technology", "technology"), EXACT_SCORE);
    }

    #[test]
    fn test_substring_band() {
        // 17 of 21 chars
        assert_eq!(
            score("land and building xyz", "land and building"),
            5000 + (17.0_f64 / 21.0 * 1000.0).round() as u32
        );
    }

    #[test]
    fn test_short_substring_falls_through() {
        // "power" is only 5 chars and a single word
        assert_eq!(score("power supply", "power"), 0);
    }

    #[test]
    fn test_low_coverage_substring_uses_word_bag() {
        let label = "margin money for working capital requirement of the cfc";
        let key = "working capital";
        assert_eq!(score(label, key), ALL_WORDS_BASE + 200);
    }

    #[test]
    fn test_all_words_band() {
        // Words reordered so no substring match applies.
        assert_eq!(score("building and land", "land building"), ALL_WORDS_BASE + 200);
    }

    #[test]
    fn test_most_words_band() {
        let label = "relationship with the chief promoter";
        let key = "relationship chief promoter director";
        // 3 of 4 words = 75%
        assert_eq!(score(label, key), MOST_WORDS_BASE + 150);
        assert!(score(label, key) > BIND_THRESHOLD);
    }

    #[test]
    fn test_parenthesized_label_word_matches_plain_key_word() {
        assert_eq!(score("age (years)", "age years"), ALL_WORDS_BASE + 200);
    }

    #[test]
    fn test_too_few_words_match() {
        assert_eq!(score("net block", "gross block value today"), 0);
    }

    #[test]
    fn test_single_word_key_never_bag_matches() {
        assert_eq!(score("income tax", "tax"), 0);
    }

    #[test]
    fn test_duplicate_key_words_count_once() {
        assert_eq!(score("tax status", "tax tax status"), ALL_WORDS_BASE + 200);
    }

    #[test]
    fn test_empty_inputs_score_zero() {
        assert_eq!(score("", "anything"), 0);
        assert_eq!(score("label", ""), 0);
    }
}
