use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

impl WordCount {
    pub fn new(word: impl Into<String>, count: usize) -> Self {
        WordCount {
            word: word.into(),
            count,
        }
    }
}

/// Result of ranking normalized text.
///
/// `Empty` means there was no text at all, which is kept apart from a
/// ranking that simply has no entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ranking {
    Empty,
    Ranked(Vec<WordCount>),
}

/// The one thing a fetch-and-rank cycle reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Error,
    NavigationCanceled,
    Empty,
    Ranked { words: Vec<WordCount> },
}

impl From<Ranking> for Outcome {
    fn from(ranking: Ranking) -> Self {
        match ranking {
            Ranking::Empty => Outcome::Empty,
            Ranking::Ranked(words) => Outcome::Ranked { words },
        }
    }
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Error | Outcome::NavigationCanceled)
    }
}
