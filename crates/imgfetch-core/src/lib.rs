pub mod config;
pub mod logging;

pub mod fetcher;
pub mod gate;
pub mod headers;
pub mod storage;
pub mod url_model;

pub use fetcher::{FailureKind, FetchAttempt, FetchError, Fetcher, Outcome};
