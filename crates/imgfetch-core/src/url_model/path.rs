//! Final path segment extraction.

/// Returns the text after the last `/` of the URL's path.
///
/// Query and fragment are excluded and percent-encoding is kept verbatim.
/// Returns `None` when the path is empty or ends in `/`. Text the `url` crate
/// cannot parse (e.g. `example.com/cat.jpg` without a scheme) is split by hand:
/// everything before the first `/` is the host, so `example.com` has no path.
pub fn final_path_segment(url: &str) -> Option<String> {
    match url::Url::parse(url) {
        Ok(parsed) => last_segment(parsed.path()).map(str::to_string),
        Err(_) => {
            let end = url.find(['?', '#']).unwrap_or(url.len());
            let (_host, path) = url[..end].split_once('/')?;
            last_segment(path).map(str::to_string)
        }
    }
}

fn last_segment(path: &str) -> Option<&str> {
    let segment = path.rsplit('/').next()?;
    if segment.is_empty() {
        None
    } else {
        Some(segment)
    }
}
