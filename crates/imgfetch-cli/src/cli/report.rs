//! Per-URL status lines printed to stdout.

use imgfetch_core::{FetchAttempt, Outcome};

pub fn status_line(attempt: &FetchAttempt) -> String {
    let url = &attempt.url;
    match &attempt.outcome {
        Outcome::Saved { path, .. } => {
            format!("✅ Image saved successfully at {}", path.display())
        }
        Outcome::SkippedNotImage { .. } => format!("⚠ Skipped (Not an image): {}", url),
        Outcome::SkippedDuplicate { filename } => format!("ℹ Skipped duplicate: {}", filename),
        Outcome::SkippedTooLarge { .. } => format!("⚠ Skipped (File too large): {}", url),
        Outcome::Failed(e) => format!("⚠ Failed to fetch {}: {}", url, e),
    }
}
