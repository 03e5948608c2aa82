//! Sequential image fetcher.
//!
//! Each URL gets exactly one streamed GET. The response headers are checked
//! before any byte is saved; a rejected transfer is aborted rather than drained.
//! URLs are processed one at a time in input order and no failure stops the run.

mod handler;
mod outcome;

pub use outcome::{FailureKind, FetchAttempt, FetchError, Outcome};

use std::path::Path;
use std::time::Duration;

use curl::easy::Easy2;

use crate::config::FetchConfig;
use crate::gate::Rejection;
use crate::url_model::derive_filename;

use handler::{ImageHandler, Stage};

const MAX_REDIRECTS: u32 = 10;

/// Fetches image URLs into the configured output directory.
#[derive(Debug, Clone)]
pub struct Fetcher {
    config: FetchConfig,
}

impl Fetcher {
    pub fn new(config: FetchConfig) -> Self {
        Self { config }
    }

    pub fn output_dir(&self) -> &Path {
        &self.config.output_dir
    }

    /// Create the output directory (and parents) if missing.
    ///
    /// Failure is logged, not returned: each URL then fails on its own when the
    /// file cannot be created.
    pub fn prepare_output_dir(&self) {
        if let Err(e) = std::fs::create_dir_all(self.output_dir()) {
            tracing::warn!(
                dir = %self.output_dir().display(),
                "cannot create output directory: {}",
                e
            );
        }
    }

    /// Fetch every URL in order and return one attempt per URL, in the same order.
    pub fn fetch_all<S: AsRef<str>>(&self, urls: &[S]) -> Vec<FetchAttempt> {
        let mut attempts = Vec::with_capacity(urls.len());
        self.fetch_each(urls, |attempt| attempts.push(attempt));
        attempts
    }

    /// Like `fetch_all`, but hands each attempt to `on_attempt` as soon as it finishes.
    pub fn fetch_each<S, F>(&self, urls: &[S], mut on_attempt: F)
    where
        S: AsRef<str>,
        F: FnMut(FetchAttempt),
    {
        self.prepare_output_dir();
        for url in urls {
            on_attempt(self.fetch_one(url.as_ref()));
        }
    }

    /// Fetch a single URL. Expects the output directory to exist already
    /// (see `prepare_output_dir`).
    pub fn fetch_one(&self, url: &str) -> FetchAttempt {
        tracing::debug!(url, "fetching");
        let outcome = self.run_transfer(url).unwrap_or_else(Outcome::Failed);
        match &outcome {
            Outcome::Saved { path, bytes } => {
                tracing::info!(url, path = %path.display(), bytes, "image saved");
            }
            Outcome::Failed(e) => {
                tracing::warn!(url, kind = ?e.kind(), "fetch failed: {}", e);
            }
            other => {
                tracing::debug!(url, outcome = other.label(), "skipped");
            }
        }
        FetchAttempt {
            url: url.to_string(),
            outcome,
        }
    }

    fn run_transfer(&self, url: &str) -> Result<Outcome, FetchError> {
        let cfg = &self.config;
        let filename = derive_filename(url, &cfg.fallback_filename);
        let target = cfg.output_dir.join(&filename);

        let handler = ImageHandler::new(
            target.clone(),
            cfg.max_bytes,
            cfg.enforce_limit_while_streaming,
        );
        let mut easy = Easy2::new(handler);
        easy.url(url)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", url, e)))?;
        easy.get(true)?;
        easy.follow_location(cfg.follow_redirects)?;
        easy.max_redirections(MAX_REDIRECTS)?;
        easy.connect_timeout(Duration::from_secs(cfg.timeout_secs))?;
        // Abort when fewer than 1 byte/s arrives for the whole window: a per-read timeout.
        easy.low_speed_limit(1)?;
        easy.low_speed_time(Duration::from_secs(cfg.timeout_secs))?;
        easy.buffer_size(cfg.chunk_size)?;
        easy.useragent(&cfg.user_agent)?;

        let performed = easy.perform();
        let handler = easy.get_mut();
        if performed.is_ok() {
            // Bodyless response: write() never ran, so check the headers now.
            handler.decide();
        }
        let content_type = handler.content_type();

        let outcome = match (handler.take_stage(), performed) {
            (Stage::Rejected(rejection), _) => match rejection {
                Rejection::Status(status) => Outcome::Failed(FetchError::Http { status }),
                Rejection::NotImage => Outcome::SkippedNotImage { content_type },
                Rejection::Duplicate => Outcome::SkippedDuplicate { filename },
                Rejection::TooLarge(bytes) => Outcome::SkippedTooLarge { bytes },
            },
            (Stage::Overflow(bytes), _) => Outcome::SkippedTooLarge { bytes },
            (Stage::StorageFailed(e), _) => Outcome::Failed(FetchError::filesystem(&target, e)),
            (Stage::Writing(file), Ok(())) => {
                let bytes = file.bytes_written();
                match file.finish() {
                    Ok(path) => Outcome::Saved { path, bytes },
                    Err(e) => Outcome::Failed(FetchError::filesystem(&target, e)),
                }
            }
            (Stage::Writing(file), Err(e)) => {
                file.discard();
                Outcome::Failed(FetchError::Network(e))
            }
            (Stage::Pending, Err(e)) => Outcome::Failed(FetchError::Network(e)),
            (Stage::Pending, Ok(())) => Outcome::Failed(FetchError::Http {
                status: easy.response_code().unwrap_or(0),
            }),
        };
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetcher_in(dir: &Path) -> Fetcher {
        Fetcher::new(FetchConfig {
            output_dir: dir.to_path_buf(),
            timeout_secs: 2,
            ..FetchConfig::default()
        })
    }

    #[test]
    fn prepare_output_dir_creates_nested_and_is_idempotent() {
        let base = tempfile::tempdir().unwrap();
        let out = base.path().join("a").join("b");
        let f = fetcher_in(&out);
        f.prepare_output_dir();
        assert!(out.is_dir());
        f.prepare_output_dir();
        assert!(out.is_dir());
    }

    #[test]
    fn empty_input_yields_no_attempts() {
        let base = tempfile::tempdir().unwrap();
        let f = fetcher_in(base.path());
        let urls: [&str; 0] = [];
        assert!(f.fetch_all(&urls).is_empty());
    }

    #[test]
    fn unsupported_scheme_fails_without_writing() {
        let base = tempfile::tempdir().unwrap();
        let f = fetcher_in(base.path());
        let attempts = f.fetch_all(&["nosuchscheme://example.com/cat.jpg"]);
        assert_eq!(attempts.len(), 1);
        match &attempts[0].outcome {
            Outcome::Failed(e) => assert_eq!(e.kind(), FailureKind::Network),
            other => panic!("expected Failed, got {:?}", other),
        }
        assert!(!base.path().join("cat.jpg").exists());
    }
}
