//! Easy2 Handler for one image transfer.
//! Collects headers, runs the precaution checks on the first body chunk, then
//! either streams to disk or returns 0 to abort the transfer.

use std::io;
use std::mem;
use std::path::PathBuf;

use curl::easy::{Handler, WriteError};

use crate::gate::{self, Rejection, Verdict};
use crate::headers::HeaderCollector;
use crate::storage::ImageFile;

/// Where a transfer stands from the handler's point of view.
#[derive(Debug)]
pub(super) enum Stage {
    /// No body seen yet; checks not run.
    Pending,
    /// Checks passed; body is being written.
    Writing(ImageFile),
    /// A check failed; transfer aborted on purpose.
    Rejected(Rejection),
    /// Streamed byte count passed the limit (only when enforced); file removed.
    Overflow(u64),
    /// Creating or writing the file failed; any partial file removed.
    StorageFailed(io::Error),
}

pub(super) struct ImageHandler {
    headers: HeaderCollector,
    target: PathBuf,
    max_bytes: u64,
    enforce_limit: bool,
    stage: Stage,
}

impl ImageHandler {
    pub(super) fn new(target: PathBuf, max_bytes: u64, enforce_limit: bool) -> Self {
        Self {
            headers: HeaderCollector::new(),
            target,
            max_bytes,
            enforce_limit,
            stage: Stage::Pending,
        }
    }

    /// Run the checks against the headers seen so far and open the file on accept.
    /// No-op unless still pending.
    pub(super) fn decide(&mut self) {
        if !matches!(self.stage, Stage::Pending) {
            return;
        }
        let head = self.headers.head();
        let verdict = gate::evaluate(&head, &self.target, self.max_bytes);
        tracing::debug!(
            target_path = %self.target.display(),
            status = ?head.status,
            content_type = ?head.content_type,
            content_length = ?head.content_length,
            ?verdict,
            "header checks"
        );
        self.stage = match verdict {
            Verdict::Accept => match ImageFile::create(&self.target) {
                Ok(file) => Stage::Writing(file),
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    Stage::Rejected(Rejection::Duplicate)
                }
                Err(e) => Stage::StorageFailed(e),
            },
            Verdict::Reject(rejection) => Stage::Rejected(rejection),
        };
    }

    pub(super) fn content_type(&self) -> Option<String> {
        self.headers.head().content_type
    }

    pub(super) fn take_stage(&mut self) -> Stage {
        mem::replace(&mut self.stage, Stage::Pending)
    }

    /// Move to `next`, removing the file if one was being written.
    fn abandon(&mut self, next: Stage) {
        if let Stage::Writing(file) = mem::replace(&mut self.stage, next) {
            file.discard();
        }
    }
}

impl Handler for ImageHandler {
    fn header(&mut self, data: &[u8]) -> bool {
        self.headers.push(data);
        true
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, WriteError> {
        self.decide();
        let Stage::Writing(file) = &mut self.stage else {
            return Ok(0);
        };
        let total = file.bytes_written() + data.len() as u64;
        if self.enforce_limit && total > self.max_bytes {
            self.abandon(Stage::Overflow(total));
            return Ok(0);
        }
        match file.write_chunk(data) {
            Ok(()) => Ok(data.len()),
            Err(e) => {
                self.abandon(Stage::StorageFailed(e));
                Ok(0)
            }
        }
    }
}
