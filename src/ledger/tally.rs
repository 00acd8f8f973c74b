// Tally - per-candidate vote counts for one election

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Vote counts keyed by candidate id
///
/// Only candidates with at least one vote appear unless a roster is merged in
/// with [`Tally::with_candidates`]. Entry order carries no meaning.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tally {
    counts: HashMap<String, u64>,
}

impl Tally {
    /// Create an empty tally
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one vote for a candidate
    pub fn record(&mut self, candidate_id: &str) {
        *self.counts.entry(candidate_id.to_string()).or_insert(0) += 1;
    }

    /// Votes for a candidate (zero if absent)
    pub fn get(&self, candidate_id: &str) -> u64 {
        self.counts.get(candidate_id).copied().unwrap_or(0)
    }

    /// Whether the candidate has an entry
    pub fn contains(&self, candidate_id: &str) -> bool {
        self.counts.contains_key(candidate_id)
    }

    /// Number of candidates with an entry
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Borrow the raw mapping
    pub fn counts(&self) -> &HashMap<String, u64> {
        &self.counts
    }

    /// Merge in zero-vote entries for every roster candidate missing a count
    pub fn with_candidates<I, T>(mut self, roster: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        for candidate in roster {
            self.counts.entry(candidate.into()).or_insert(0);
        }
        self
    }

    /// Entries ordered for display: most votes first, ties by candidate id
    pub fn ranked(&self) -> Vec<(&str, u64)> {
        let mut entries: Vec<(&str, u64)> = self
            .counts
            .iter()
            .map(|(candidate, count)| (candidate.as_str(), *count))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }
}

impl From<Tally> for HashMap<String, u64> {
    fn from(tally: Tally) -> Self {
        tally.counts
    }
}
