//! URL modeling and filename derivation.
//!
//! The saved filename comes from the URL text alone (never from response
//! headers or content), sanitized for Linux filesystems.

mod path;
mod sanitize;

pub use path::final_path_segment;
pub use sanitize::sanitize_filename;

/// Derives the filename an image from `url` is saved under.
///
/// Uses the final path segment of `url`; when that is missing, empty, or a
/// reserved name like `.` or `..`, returns `fallback`.
///
/// # Examples
///
/// - `derive_filename("http://example.com/cat.jpg", "downloaded_image.jpg")` → `"cat.jpg"`
/// - `derive_filename("http://example.com/gallery/", "downloaded_image.jpg")` → `"downloaded_image.jpg"`
pub fn derive_filename(url: &str, fallback: &str) -> String {
    let sanitized = final_path_segment(url)
        .map(|s| sanitize_filename(&s))
        .unwrap_or_default();
    if sanitized.is_empty() || sanitized == "." || sanitized == ".." {
        fallback.to_string()
    } else {
        sanitized
    }
}
