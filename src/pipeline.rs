use crate::config::Config;
use crate::fetch::{FetchError, PageTextFetcher};
use crate::model::Outcome;
use reqwest::Url;
use std::time::Instant;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{info, warn, Instrument, Level};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PipelineError {
    #[error("a fetch is already in progress")]
    Busy,
}

/// Number of words a finished cycle reported; `None` for failed cycles.
fn reported_words(outcome: &Outcome) -> Option<usize> {
    match outcome {
        Outcome::Ranked { words } => Some(words.len()),
        Outcome::Empty => Some(0),
        Outcome::Error | Outcome::NavigationCanceled => None,
    }
}

/// Fetch-and-rank cycles over one fetcher, one cycle at a time.
pub struct Pipeline<F> {
    fetcher: F,
    config: Config,
    in_flight: Mutex<()>,
}

impl<F: PageTextFetcher> Pipeline<F> {
    pub fn new(fetcher: F, config: Config) -> Self {
        Pipeline {
            fetcher,
            config,
            in_flight: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run one cycle for `url`.
    ///
    /// Returns `Busy` without fetching if another cycle on this pipeline has
    /// not finished yet.
    pub async fn run(&self, url: &Url) -> Result<Outcome, PipelineError> {
        let _guard = self.in_flight.try_lock().map_err(|_| PipelineError::Busy)?;

        let span = tracing::span!(Level::INFO, "topwords.cycle", url = %url);
        let outcome = self.cycle(url).instrument(span).await;
        Ok(outcome)
    }

    async fn cycle(&self, url: &Url) -> Outcome {
        let start = Instant::now();
        let outcome = match self.fetcher.fetch_text(url).await {
            Ok(raw) => self.process_text(&raw),
            Err(FetchError::Canceled) => {
                warn!(elapsed_ms = start.elapsed().as_millis(), "navigation_canceled");
                Outcome::NavigationCanceled
            }
            Err(err) => {
                warn!(error = %err, elapsed_ms = start.elapsed().as_millis(), "fetch_failure");
                Outcome::Error
            }
        };

        if let Some(words) = reported_words(&outcome) {
            info!(
                words,
                elapsed_ms = start.elapsed().as_millis(),
                "cycle_complete"
            );
        }
        outcome
    }

    /// Normalize and rank text that was obtained some other way.
    pub fn process_text(&self, raw: &str) -> Outcome {
        crate::process(raw, &self.config)
    }
}
