use crate::model::{Ranking, WordCount};
use indexmap::IndexMap;

pub const DEFAULT_LIMIT: usize = 5;

// Per-character uppercase, keeping characters whose uppercase form is
// more than one character (so "ß" stays distinct from "SS").
fn fold_key(token: &str) -> String {
    token
        .chars()
        .map(|c| {
            let mut upper = c.to_uppercase();
            match (upper.next(), upper.next()) {
                (Some(u), None) => u,
                _ => c,
            }
        })
        .collect()
}

/// Count words in normalized text and keep the `limit` most frequent.
///
/// Words are grouped case-insensitively; each group is shown with the
/// casing of its first occurrence. Groups with equal counts stay in the
/// order they first appeared.
pub fn rank(normalized: &str, limit: usize) -> Ranking {
    if normalized.is_empty() {
        return Ranking::Empty;
    }

    // folded key -> display word and running count, in first-seen order
    let mut groups: IndexMap<String, WordCount> = IndexMap::new();
    for token in normalized.split(' ').filter(|t| !t.is_empty()) {
        groups
            .entry(fold_key(token))
            .or_insert_with(|| WordCount::new(token.trim(), 0))
            .count += 1;
    }

    let mut words: Vec<WordCount> = groups.into_values().collect();
    // sort_by is stable, which gives the first-appearance tie-break
    words.sort_by(|a, b| b.count.cmp(&a.count));
    words.truncate(limit);
    Ranking::Ranked(words)
}
