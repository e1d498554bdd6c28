//! The candidate pool: user fields waiting to be placed in the document.

use std::collections::BTreeSet;
use std::sync::Arc;

use super::normalize::normalize;
use crate::models::input::{FieldMap, FieldValue};

/// A user-supplied field with its key pre-normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub key: String,
    pub normalized_key: String,
    pub value: FieldValue,
}

/// Candidates in input order plus the set already consumed by a binding.
///
/// The pool is threaded through the document walk by value: each resolution
/// takes the pool and hands back the next one. The candidate list itself is
/// shared, only the consumed set changes.
#[derive(Debug, Clone)]
pub struct CandidatePool {
    candidates: Arc<[Candidate]>,
    consumed: BTreeSet<usize>,
}

impl CandidatePool {
    pub fn from_fields(fields: &FieldMap) -> Self {
        let candidates: Vec<Candidate> = fields
            .iter()
            .map(|(key, value)| Candidate {
                key: key.clone(),
                normalized_key: normalize(key),
                value: value.clone(),
            })
            .collect();
        Self {
            candidates: candidates.into(),
            consumed: BTreeSet::new(),
        }
    }

    /// Candidates that may still bind, in input order. Consumed candidates,
    /// blank values, and keys that normalize to nothing are excluded.
    pub fn available(&self) -> impl Iterator<Item = (usize, &Candidate)> {
        self.candidates.iter().enumerate().filter(|(idx, c)| {
            !self.consumed.contains(idx) && !c.value.is_blank() && !c.normalized_key.is_empty()
        })
    }

    pub fn get(&self, index: usize) -> Option<&Candidate> {
        self.candidates.get(index)
    }

    /// Marks a candidate as used. Consuming twice is a no-op.
    pub fn consume(mut self, index: usize) -> Self {
        if index < self.candidates.len() {
            self.consumed.insert(index);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn consumed_count(&self) -> usize {
        self.consumed.len()
    }

    /// Original keys of consumed candidates, sorted.
    pub fn consumed_keys(&self) -> Vec<String> {
        self.sorted_keys(|idx| self.consumed.contains(&idx))
    }

    /// Original keys never consumed, sorted.
    pub fn unused_keys(&self) -> Vec<String> {
        self.sorted_keys(|idx| !self.consumed.contains(&idx))
    }

    fn sorted_keys(&self, keep: impl Fn(usize) -> bool) -> Vec<String> {
        let mut keys: Vec<String> = self
            .candidates
            .iter()
            .enumerate()
            .filter(|(idx, _)| keep(*idx))
            .map(|(_, c)| c.key.clone())
            .collect();
        keys.sort();
        keys
    }
}
