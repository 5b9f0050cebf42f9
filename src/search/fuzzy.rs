//! Fuzzy tier: typo-tolerant substring matching.
//!
//! Each query word is matched against the item's search text with an
//! approximate substring distance (edit distance to the best-matching
//! substring). A word matches when that distance, divided by the word's
//! length, is at most the threshold. Items are ranked by the mean over all
//! query words; ties keep catalog order.

use super::Searchable;

/// Default threshold: about one typo per three letters.
pub const DEFAULT_THRESHOLD: f64 = 0.4;

/// Precomputed search strings for a catalog.
pub struct FuzzyIndex<'a, T> {
    items: &'a [T],
    haystacks: Vec<Vec<char>>,
    threshold: f64,
}

impl<'a, T: Searchable> FuzzyIndex<'a, T> {
    pub fn new(items: &'a [T]) -> Self {
        let haystacks = items
            .iter()
            .map(|item| normalize(&item.search_text()).chars().collect())
            .collect();
        Self {
            items,
            haystacks,
            threshold: DEFAULT_THRESHOLD,
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold.clamp(0.0, 1.0);
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Catalog positions of the best matches, best first.
    ///
    /// An empty query returns the first `max_results` positions unscored.
    pub fn search_indices(&self, query: &str, max_results: usize) -> Vec<usize> {
        let query = normalize(query);
        let words: Vec<Vec<char>> = query.split_whitespace().map(|w| w.chars().collect()).collect();
        if words.is_empty() {
            return (0..self.items.len().min(max_results)).collect();
        }

        let mut scored: Vec<(usize, f64)> = self
            .haystacks
            .iter()
            .enumerate()
            .filter_map(|(i, haystack)| self.score(&words, haystack).map(|s| (i, s)))
            .collect();

        // stable: equal scores keep catalog order
        scored.sort_by(|a, b| a.1.total_cmp(&b.1));
        scored.into_iter().take(max_results).map(|(i, _)| i).collect()
    }

    pub fn search(&self, query: &str, max_results: usize) -> Vec<&'a T> {
        self.search_indices(query, max_results)
            .into_iter()
            .map(|i| &self.items[i])
            .collect()
    }

    /// Mean normalized distance over all words, `None` if any word misses.
    fn score(&self, words: &[Vec<char>], haystack: &[char]) -> Option<f64> {
        let mut total = 0.0;
        for word in words {
            let distance = approximate_distance(word, haystack) as f64 / word.len() as f64;
            if distance > self.threshold {
                return None;
            }
            total += distance;
        }
        Some(total / words.len() as f64)
    }
}

/// Fuzzy search over `items` with the default threshold.
///
/// ```
/// use kleykod_label::search::{ProductCard, fuzzy_search};
///
/// let items = vec![
///     ProductCard { name: "Running shoes".into(), ..Default::default() },
///     ProductCard { name: "Winter hat".into(), ..Default::default() },
/// ];
/// let hits = fuzzy_search(&items, "shoe", 10);
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].name, "Running shoes");
/// ```
pub fn fuzzy_search<'a, T: Searchable>(items: &'a [T], query: &str, max_results: usize) -> Vec<&'a T> {
    FuzzyIndex::new(items).search(query, max_results)
}

/// Lowercase and fold `ё` into `е`, as catalog data uses both.
fn normalize(s: &str) -> String {
    s.to_lowercase().replace('ё', "е")
}

/// Smallest edit distance between `pattern` and any substring of `text`.
pub fn approximate_distance(pattern: &[char], text: &[char]) -> usize {
    let m = pattern.len();
    if m == 0 {
        return 0;
    }

    // column[i]: distance of pattern[..i] ending at the current text position;
    // column[0] stays 0 so a match may start anywhere
    let mut column: Vec<usize> = (0..=m).collect();
    let mut best = m;

    for &tc in text {
        let mut diagonal = column[0];
        for i in 1..=m {
            let left = column[i];
            let cost = usize::from(pattern[i - 1] != tc);
            column[i] = (diagonal + cost).min(left + 1).min(column[i - 1] + 1);
            diagonal = left;
        }
        best = best.min(column[m]);
        if best == 0 {
            break;
        }
    }
    best
}
