//! Per-URL results: the outcome enumeration and the failure reasons it carries.

use std::io;
use std::path::{Path, PathBuf};

/// Why a URL ended in `Outcome::Failed`.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// libcurl refused the URL text.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    /// Connection, DNS, TLS, timeout, or another transport failure.
    #[error("{0}")]
    Network(#[from] curl::Error),
    /// The final response was not 2xx.
    #[error("server returned HTTP {status}")]
    Http { status: u32 },
    /// Creating, writing, or syncing the output file failed.
    #[error("cannot write {}: {source}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Coarse failure category, for callers that only need to branch on the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Network,
    Http,
    Filesystem,
}

impl FetchError {
    pub fn kind(&self) -> FailureKind {
        match self {
            FetchError::InvalidUrl(_) | FetchError::Network(_) => FailureKind::Network,
            FetchError::Http { .. } => FailureKind::Http,
            FetchError::Filesystem { .. } => FailureKind::Filesystem,
        }
    }

    pub(crate) fn filesystem(path: &Path, source: io::Error) -> Self {
        FetchError::Filesystem {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Terminal classification of one URL.
#[derive(Debug)]
pub enum Outcome {
    /// Body written to `path`.
    Saved { path: PathBuf, bytes: u64 },
    /// `Content-Type` missing or not `image/*`.
    SkippedNotImage { content_type: Option<String> },
    /// A file named `filename` already exists in the output directory.
    SkippedDuplicate { filename: String },
    /// Declared (or, when enforced, streamed) size over the limit.
    SkippedTooLarge { bytes: u64 },
    Failed(FetchError),
}

impl Outcome {
    /// Short stable name, used in log records.
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Saved { .. } => "saved",
            Outcome::SkippedNotImage { .. } => "skipped_not_image",
            Outcome::SkippedDuplicate { .. } => "skipped_duplicate",
            Outcome::SkippedTooLarge { .. } => "skipped_too_large",
            Outcome::Failed(_) => "failed",
        }
    }
}

/// One URL's processing result.
#[derive(Debug)]
pub struct FetchAttempt {
    pub url: String,
    pub outcome: Outcome,
}

impl FetchAttempt {
    /// Where the image was saved; `Some` only for `Outcome::Saved`.
    pub fn saved_path(&self) -> Option<&Path> {
        match &self.outcome {
            Outcome::Saved { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Rendered failure reason; `Some` only for `Outcome::Failed`.
    pub fn error_detail(&self) -> Option<String> {
        match &self.outcome {
            Outcome::Failed(e) => Some(e.to_string()),
            _ => None,
        }
    }

    pub fn is_saved(&self) -> bool {
        matches!(self.outcome, Outcome::Saved { .. })
    }
}
