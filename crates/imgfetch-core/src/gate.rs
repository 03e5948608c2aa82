//! Precaution checks applied to a response before any body byte is saved.
//!
//! Order: HTTP status, content type, duplicate filename, declared size.
//! The first failing check decides.

use std::path::Path;

use crate::headers::ResponseHead;

/// Decision for one response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Stream the body to disk.
    Accept,
    Reject(Rejection),
}

/// Why a response is not saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Final response was not 2xx (or had no parseable status line).
    Status(u32),
    /// `Content-Type` missing or not `image/*`.
    NotImage,
    /// The target file already exists.
    Duplicate,
    /// Declared `Content-Length` exceeds the limit.
    TooLarge(u64),
}

/// True if a `Content-Type` value names an image media type.
pub fn is_image_content_type(value: &str) -> bool {
    let value = value.trim_start();
    value
        .get(..6)
        .map(|prefix| prefix.eq_ignore_ascii_case("image/"))
        .unwrap_or(false)
}

/// Runs the checks for a response whose body would be saved at `target`.
pub fn evaluate(head: &ResponseHead, target: &Path, max_bytes: u64) -> Verdict {
    let status = head.status.unwrap_or(0);
    if !(200..300).contains(&status) {
        return Verdict::Reject(Rejection::Status(status));
    }
    let is_image = head
        .content_type
        .as_deref()
        .map(is_image_content_type)
        .unwrap_or(false);
    if !is_image {
        return Verdict::Reject(Rejection::NotImage);
    }
    if target.exists() {
        return Verdict::Reject(Rejection::Duplicate);
    }
    match head.content_length {
        Some(len) if len > max_bytes => Verdict::Reject(Rejection::TooLarge(len)),
        _ => Verdict::Accept,
    }
}
