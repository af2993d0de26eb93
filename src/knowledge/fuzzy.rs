//! Fuzzy keyword scoring
//!
//! A query matches a keyword when the query, taken whole, appears inside the
//! keyword with few enough edits. Short questions like "pricing" or "who are
//! you" hit; long sentences like "I need a website for my bakery" do not, and
//! are left to the engine's own keyword rules.
//!
//! Score of a query against one keyword is the best, over every window of the
//! keyword, of
//!
//! ```text
//! levenshtein(query, window) / len(query)
//!   + window_start / distance
//!   + PARTIAL_WINDOW_PENALTY   (only when the window is not the whole keyword)
//! ```
//!
//! An entry's score is its best keyword (or category) score. Lower is better,
//! zero is an exact hit, and anything above the threshold is not a match.

use async_trait::async_trait;

use super::table::default_entries;
use super::{KnowledgeBase, KnowledgeEntry, KnowledgeError};

pub const DEFAULT_THRESHOLD: f64 = 0.4;

/// Characters of offset that cost a full point of score
pub const DEFAULT_DISTANCE: f64 = 100.0;

/// Prefers "hi" matching the keyword `hi` over the `hi` inside `hire`.
const PARTIAL_WINDOW_PENALTY: f64 = 0.001;

#[derive(Debug, Clone)]
pub struct FuzzyKnowledgeBase {
    entries: Vec<KnowledgeEntry>,
    threshold: f64,
    distance: f64,
}

impl FuzzyKnowledgeBase {
    pub fn new(entries: Vec<KnowledgeEntry>) -> Self {
        Self {
            entries,
            threshold: DEFAULT_THRESHOLD,
            distance: DEFAULT_DISTANCE,
        }
    }

    /// The built-in agency FAQ table
    pub fn with_defaults() -> Self {
        Self::new(default_entries())
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Append entries after the existing ones (they lose ties).
    pub fn with_entries(mut self, extra: impl IntoIterator<Item = KnowledgeEntry>) -> Self {
        self.entries.extend(extra);
        self
    }

    pub fn entries(&self) -> &[KnowledgeEntry] {
        &self.entries
    }

    /// Index and score of the best entry, if any is within the threshold.
    pub fn search(&self, query: &str) -> Option<(usize, f64)> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return None;
        }

        let mut best: Option<(usize, f64)> = None;

        for (index, entry) in self.entries.iter().enumerate() {
            let candidates = entry
                .keywords
                .iter()
                .map(String::as_str)
                .chain(std::iter::once(entry.category.as_str()))
                .filter(|k| !k.is_empty());

            let Some(score) = candidates
                .filter_map(|keyword| self.keyword_score(&query, &keyword.to_lowercase()))
                .reduce(f64::min)
            else {
                continue;
            };

            if score > self.threshold {
                continue;
            }

            // strict: earlier entries win ties
            if best.map_or(true, |(_, current)| score < current) {
                best = Some((index, score));
            }
        }

        best
    }

    /// Best window score of `query` inside `keyword`, or `None` when no window
    /// can get under the threshold.
    fn keyword_score(&self, query: &str, keyword: &str) -> Option<f64> {
        let query_len = query.chars().count();
        let max_errors = (self.threshold * query_len as f64).floor() as usize;

        // byte offset of every char boundary, including the end
        let bounds: Vec<usize> = keyword
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(keyword.len()))
            .collect();
        let keyword_len = bounds.len() - 1;

        let min_window = query_len.saturating_sub(max_errors).max(1);
        let max_window = (query_len + max_errors).min(keyword_len);

        let mut best: Option<f64> = None;

        for start in 0..keyword_len {
            for width in min_window..=max_window {
                let end = start + width;
                if end > keyword_len {
                    break;
                }

                let window = &keyword[bounds[start]..bounds[end]];
                let errors = strsim::levenshtein(query, window);
                if errors > max_errors {
                    continue;
                }

                let mut score = errors as f64 / query_len as f64 + start as f64 / self.distance;
                if start != 0 || end != keyword_len {
                    score += PARTIAL_WINDOW_PENALTY;
                }

                if best.map_or(true, |current| score < current) {
                    best = Some(score);
                }
            }
        }

        best
    }
}

impl Default for FuzzyKnowledgeBase {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[async_trait]
impl KnowledgeBase for FuzzyKnowledgeBase {
    async fn lookup(&self, text: &str) -> Result<Option<KnowledgeEntry>, KnowledgeError> {
        let hit = self.search(text);

        if let Some((index, score)) = hit {
            tracing::trace!(
                "Knowledge hit for {:?}: {} (score {:.3})",
                text,
                self.entries[index].category,
                score
            );
        }

        Ok(hit.map(|(index, _)| self.entries[index].clone()))
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
