//! Field matching: binds user candidates to document slots.
//!
//! A slot is a labelled place in the document that can receive a value: a
//! table cell holding a label, or a narrative heading/sentence. Resolution runs
//! in two passes per slot. The exact pass binds the first available candidate
//! whose normalized key equals the normalized label. Table cells then get a
//! fuzzy pass that binds the best-scoring candidate above the threshold. Every
//! binding consumes its candidate, so a key lands in the document at most once.

use tracing::debug;

pub mod normalize;
pub mod pool;
pub mod scoring;

use crate::models::input::FieldValue;
use normalize::normalize;
use pool::CandidatePool;
use scoring::{CandidateScorer, WordBagScorer, BIND_THRESHOLD, EXACT_SCORE};

/// Where a slot sits, which decides the passes it gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    /// A label cell at `column` in a row `row_width` cells wide.
    TableCell { column: usize, row_width: usize },
    /// A narrative heading or sentence. Exact pass only.
    Paragraph,
}

#[derive(Debug, Clone, Copy)]
pub struct Slot<'a> {
    pub label: &'a str,
    pub kind: SlotKind,
}

impl<'a> Slot<'a> {
    pub fn table_cell(label: &'a str, column: usize, row_width: usize) -> Self {
        Self {
            label,
            kind: SlotKind::TableCell { column, row_width },
        }
    }

    pub fn paragraph(label: &'a str) -> Self {
        Self {
            label,
            kind: SlotKind::Paragraph,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPass {
    Exact,
    Fuzzy,
}

/// A candidate bound to a slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub key: String,
    pub value: FieldValue,
    pub score: u32,
    pub pass: MatchPass,
}

pub struct FieldMatcher {
    scorer: Box<dyn CandidateScorer>,
}

impl Default for FieldMatcher {
    fn default() -> Self {
        Self::new(Box::new(WordBagScorer))
    }
}

impl FieldMatcher {
    pub fn new(scorer: Box<dyn CandidateScorer>) -> Self {
        Self { scorer }
    }

    /// Resolves one slot against the pool.
    ///
    /// Returns the pool with the bound candidate (if any) consumed. Among
    /// equal scores the candidate supplied first wins.
    pub fn resolve(&self, pool: CandidatePool, slot: &Slot<'_>) -> (CandidatePool, Option<Binding>) {
        let label = normalize(slot.label);
        if label.is_empty() {
            return (pool, None);
        }

        let exact = pool
            .available()
            .find(|(_, c)| c.normalized_key == label)
            .map(|(idx, _)| (idx, EXACT_SCORE, MatchPass::Exact));

        let found = match (exact, slot.kind) {
            (Some(hit), _) => Some(hit),
            (None, SlotKind::Paragraph) => None,
            (None, SlotKind::TableCell { .. }) => self.best_fuzzy(&pool, &label),
        };

        let Some((idx, score, pass)) = found else {
            return (pool, None);
        };
        let Some(candidate) = pool.get(idx) else {
            return (pool, None);
        };

        let binding = Binding {
            key: candidate.key.clone(),
            value: candidate.value.clone(),
            score,
            pass,
        };
        debug!(
            "Bound '{}' to '{}' ({:?}, score {}, scorer {})",
            binding.key,
            slot.label,
            pass,
            score,
            self.scorer.backend()
        );
        (pool.consume(idx), Some(binding))
    }

    fn best_fuzzy(&self, pool: &CandidatePool, label: &str) -> Option<(usize, u32, MatchPass)> {
        let mut best: Option<(usize, u32)> = None;
        for (idx, candidate) in pool.available() {
            let score = self.scorer.score(label, &candidate.normalized_key);
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((idx, score));
            }
        }
        best.filter(|(_, score)| *score > BIND_THRESHOLD)
            .map(|(idx, score)| (idx, score, MatchPass::Fuzzy))
    }
}

/// Cell writes for a value bound at `column` in a row `row_width` wide.
///
/// A scalar goes to the cell right of the label. A sequence fills consecutive
/// cells from there and is truncated at the row's end. A label in the last
/// column has nowhere to write.
pub fn spread(value: &FieldValue, column: usize, row_width: usize) -> Vec<(usize, String)> {
    let start = column + 1;
    let room = row_width.saturating_sub(start);
    match value {
        FieldValue::Scalar(s) if room > 0 => vec![(start, s.clone())],
        FieldValue::Scalar(_) => Vec::new(),
        FieldValue::Sequence(items) => items
            .iter()
            .take(room)
            .enumerate()
            .map(|(offset, item)| (start + offset, item.clone()))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::input::FieldMap;

    fn pool(pairs: &[(&str, FieldValue)]) -> CandidatePool {
        let fields: FieldMap = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        CandidatePool::from_fields(&fields)
    }

    fn cell(label: &str) -> Slot<'_> {
        Slot::table_cell(label, 1, 3)
    }

    #[test]
    fn test_exact_table_bind() {
        let matcher = FieldMatcher::default();
        let p = pool(&[("Land_and_Building", "120".into())]);
        let (p, binding) = matcher.resolve(p, &cell("Land and Building"));
        let binding = binding.unwrap();
        assert_eq!(binding.pass, MatchPass::Exact);
        assert_eq!(binding.value, FieldValue::from("120"));
        assert_eq!(p.consumed_keys(), vec!["Land_and_Building".to_string()]);
    }

    #[test]
    fn test_exact_beats_better_earlier_fuzzy() {
        let matcher = FieldMatcher::default();
        let p = pool(&[
            ("Technology_Details", "fuzzy".into()),
            ("Technology", "exact".into()),
        ]);
        let (_, binding) = matcher.resolve(p, &cell("(iii) Technology"));
        assert_eq!(binding.unwrap().value, FieldValue::from("exact"));
    }

    #[test]
    fn test_fuzzy_bind_above_threshold() {
        let matcher = FieldMatcher::default();
        let p = pool(&[("Authorized_share_capital", "10 lakh".into())]);
        let (_, binding) = matcher.resolve(p, &cell("(xi) Authorized share capital amount"));
        let binding = binding.unwrap();
        assert_eq!(binding.pass, MatchPass::Fuzzy);
        assert!(binding.score > BIND_THRESHOLD);
    }

    #[test]
    fn test_underscored_key_binds_parenthesized_label() {
        let matcher = FieldMatcher::default();
        let p = pool(&[("Age_years", vec!["35", "42", "38"].into())]);
        let (p, binding) = matcher.resolve(p, &Slot::table_cell("Age (years)", 0, 8));
        let binding = binding.unwrap();
        assert_eq!(binding.pass, MatchPass::Fuzzy);
        assert_eq!(binding.score, 3200);
        assert_eq!(p.consumed_keys(), vec!["Age_years".to_string()]);
    }

    #[test]
    fn test_unrelated_multi_word_key_stays_unused() {
        let matcher = FieldMatcher::default();
        let p = pool(&[("Location_of_Common_Facility_Centre", "Plot 5, Phase 2".into())]);
        let (p, binding) = matcher.resolve(p, &cell("Name and address"));
        assert!(binding.is_none());
        assert_eq!(
            p.unused_keys(),
            vec!["Location_of_Common_Facility_Centre".to_string()]
        );
    }

    #[test]
    fn test_no_bind_at_or_below_threshold() {
        let matcher = FieldMatcher::default();
        let p = pool(&[("Gross_block_value_today", "1".into())]);
        let (p, binding) = matcher.resolve(p, &cell("Net Block"));
        assert!(binding.is_none());
        assert_eq!(p.consumed_count(), 0);
    }

    #[test]
    fn test_paragraph_slots_are_exact_only() {
        let matcher = FieldMatcher::default();
        let p = pool(&[("Technology_Text", "Looms".into())]);
        let (p, binding) = matcher.resolve(p, &Slot::paragraph("(iii) Technology Text extra"));
        assert!(binding.is_none());
        let (_, binding) = matcher.resolve(p, &Slot::paragraph("(iii) Technology Text"));
        assert_eq!(binding.unwrap().pass, MatchPass::Exact);
    }

    #[test]
    fn test_candidate_consumed_at_most_once() {
        let matcher = FieldMatcher::default();
        let p = pool(&[("Profit", "50".into())]);
        let (p, first) = matcher.resolve(p, &cell("Profit"));
        let (p, second) = matcher.resolve(p, &cell("Profit"));
        assert!(first.is_some());
        assert!(second.is_none());
        assert_eq!(p.consumed_count(), 1);
    }

    #[test]
    fn test_equal_scores_first_supplied_wins() {
        let matcher = FieldMatcher::default();
        let p = pool(&[
            ("building_land", "first".into()),
            ("land_building", "second".into()),
        ]);
        let (_, binding) = matcher.resolve(p, &cell("Land and Building cost"));
        assert_eq!(binding.unwrap().value, FieldValue::from("first"));
    }

    #[test]
    fn test_enumerator_only_label_is_not_a_slot() {
        let matcher = FieldMatcher::default();
        let p = pool(&[("(ii)", "x".into())]);
        let (_, binding) = matcher.resolve(p, &cell("(ii)"));
        assert!(binding.is_none());
    }

    #[test]
    fn test_spread_scalar() {
        assert_eq!(spread(&"x".into(), 0, 3), vec![(1, "x".to_string())]);
        assert!(spread(&"x".into(), 2, 3).is_empty());
    }

    #[test]
    fn test_spread_sequence_truncates_to_row() {
        let value = FieldValue::from(vec!["35", "42", "38", "50", "29", "44", "51", "60", "33"]);
        let writes = spread(&value, 0, 8);
        assert_eq!(writes.len(), 7);
        assert_eq!(writes[0], (1, "35".to_string()));
        assert_eq!(writes[6], (7, "51".to_string()));
    }
}
