//! Linux-safe filename sanitization.

/// Linux NAME_MAX in bytes.
const NAME_MAX: usize = 255;

/// Sanitizes a URL-derived filename for safe use on Linux.
///
/// - Replaces NUL, `\`, and control characters with `_`
/// - Truncates to 255 bytes on a char boundary
///
/// `/` cannot occur since the input is a single path segment. Dots are kept,
/// so callers must still reject `.` and `..`.
pub fn sanitize_filename(name: &str) -> String {
    let out: String = name
        .chars()
        .map(|c| if c == '\\' || c.is_control() { '_' } else { c })
        .collect();

    if out.len() > NAME_MAX {
        let mut take = NAME_MAX;
        while take > 0 && !out.is_char_boundary(take) {
            take -= 1;
        }
        out[..take].to_string()
    } else {
        out
    }
}
