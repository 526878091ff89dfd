pub mod config;
pub mod emit;
pub mod extract;
pub mod fetch;
pub mod frames;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod rank;

use config::Config;
use model::Outcome;

pub use fetch::{parse_url, FetchError, HttpFetcher, PageTextFetcher};
pub use model::{Ranking, WordCount};
pub use pipeline::{Pipeline, PipelineError};

/// Normalize raw page text and rank its words.
pub fn process(text: &str, config: &Config) -> Outcome {
    // Stage 1
    let normalized = normalize::normalize_with(text, config);

    // Stage 2
    rank::rank(&normalized, config.limit).into()
}

/// Plain-text report for raw page text.
pub fn report(text: &str, config: &Config) -> String {
    emit::render(&process(text, config))
}
