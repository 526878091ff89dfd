use crate::config::Config;
use crate::extract::{self, PageParts};
use crate::frames::FrameTracker;
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP {status} for {url}")]
    Status { status: StatusCode, url: Url },
    #[error("timed out after {0:?}")]
    Timeout(Duration),
    #[error("navigation canceled")]
    Canceled,
}

/// Parse a user-supplied address into an absolute http(s) URL.
pub fn parse_url(input: &str) -> Result<Url, FetchError> {
    let input = input.trim();
    let url = Url::parse(input).map_err(|e| FetchError::InvalidUrl {
        url: input.to_string(),
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(FetchError::InvalidUrl {
            url: input.to_string(),
            reason: format!("unsupported scheme {:?}", other),
        }),
    }
}

/// Source of a page's visible text.
///
/// Resolves once per call, after the page and all of its frames are loaded.
#[async_trait]
pub trait PageTextFetcher: Send + Sync {
    async fn fetch_text(&self, url: &Url) -> Result<String, FetchError>;
}

pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
    follow_frames: bool,
    max_frames: usize,
}

impl HttpFetcher {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(timeout)
            .build()?;
        Ok(HttpFetcher {
            client,
            timeout,
            follow_frames: config.follow_frames,
            max_frames: config.max_frames,
        })
    }

    async fn load_frames(&self, frames: Vec<Url>) -> FrameTexts {
        let total = frames.len();
        let (tx, rx) = mpsc::channel(total.max(1));
        let mut tasks = JoinSet::new();

        for (index, url) in frames.into_iter().enumerate() {
            let client = self.client.clone();
            let timeout = self.timeout;
            let tx = tx.clone();
            tasks.spawn(async move {
                let result = load_page(&client, &url, timeout).await;
                let _ = tx.send((index, url, result)).await;
            });
        }
        drop(tx);

        // dropping the set aborts any frame still loading
        collect_frames(rx, total).await
    }
}

pub(crate) type FrameResult = (usize, Url, Result<PageParts, FetchError>);

/// Frame texts in document order, and whether every frame reported in.
#[derive(Debug, Default)]
pub(crate) struct FrameTexts {
    pub texts: Vec<String>,
    pub complete: bool,
}

/// Gather frame results until the tracker says the page is done.
///
/// Stops early if every sender is gone before that; `complete` is then false.
pub(crate) async fn collect_frames(mut rx: mpsc::Receiver<FrameResult>, total: usize) -> FrameTexts {
    let mut tracker = FrameTracker::new(total);
    let mut texts: Vec<String> = vec![String::new(); total];

    while !tracker.is_done() {
        let Some((index, url, result)) = rx.recv().await else {
            break;
        };
        match result {
            Ok(page) => {
                debug!(frame = %url, chars = page.text.len(), "frame_loaded");
                if let Some(slot) = texts.get_mut(index) {
                    *slot = page.text;
                }
            }
            Err(err) => {
                warn!(frame = %url, error = %err, "frame_failed");
            }
        }
        let done = tracker.record_completion();
        debug!(
            completed = tracker.completed(),
            total = tracker.total(),
            done,
            "frame_progress"
        );
    }

    let complete = tracker.is_done();
    if !complete {
        warn!(
            completed = tracker.completed(),
            total = tracker.total(),
            "frames_incomplete"
        );
    }
    FrameTexts { texts, complete }
}

fn classify(err: reqwest::Error, timeout: Duration) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout(timeout)
    } else {
        FetchError::Transport(err)
    }
}

async fn load_page(client: &Client, url: &Url, timeout: Duration) -> Result<PageParts, FetchError> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| classify(e, timeout))?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            status,
            url: url.clone(),
        });
    }
    let html = response.text().await.map_err(|e| classify(e, timeout))?;
    Ok(extract::parse_page(&html, url))
}

#[async_trait]
impl PageTextFetcher for HttpFetcher {
    async fn fetch_text(&self, url: &Url) -> Result<String, FetchError> {
        let page = load_page(&self.client, url, self.timeout).await?;
        if page.is_canceled() {
            return Err(FetchError::Canceled);
        }

        let PageParts {
            text: mut raw,
            frames,
            ..
        } = page;
        if !self.follow_frames || frames.is_empty() {
            return Ok(raw);
        }

        let declared = frames.len();
        let frames: Vec<Url> = frames.into_iter().take(self.max_frames).collect();
        if frames.len() < declared {
            warn!(declared, loaded = frames.len(), "frame_limit_reached");
        }
        let loaded = self.load_frames(frames).await;
        debug!(complete = loaded.complete, "frames_collected");
        for text in loaded.texts {
            raw.push('\n');
            raw.push_str(&text);
        }
        Ok(raw)
    }
}
