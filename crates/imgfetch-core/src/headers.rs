//! Response header collection and parsing.
//!
//! libcurl hands over every header line of every response in a transfer,
//! including redirect hops and `100 Continue`. Only the last response counts.

/// The parts of an HTTP response head the precaution checks look at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseHead {
    /// Status code from the `HTTP/x y` line, if one was seen.
    pub status: Option<u32>,
    /// `Content-Type` value, if present.
    pub content_type: Option<String>,
    /// Declared body size; a missing or non-numeric `Content-Length` is `None`.
    pub content_length: Option<u64>,
}

/// Accumulates raw header lines, restarting at each status line.
#[derive(Debug, Default)]
pub struct HeaderCollector {
    lines: Vec<String>,
}

impl HeaderCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one raw header line as delivered by libcurl (CRLF included).
    pub fn push(&mut self, data: &[u8]) {
        let line = String::from_utf8_lossy(data);
        let line = line.trim_end();
        if line.starts_with("HTTP/") {
            self.lines.clear();
        }
        if !line.is_empty() {
            self.lines.push(line.to_string());
        }
    }

    /// Parse the lines of the most recent response seen so far.
    pub fn head(&self) -> ResponseHead {
        parse_headers(&self.lines)
    }
}

/// Parse collected header lines into a ResponseHead.
pub fn parse_headers(lines: &[String]) -> ResponseHead {
    let mut head = ResponseHead::default();

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("HTTP/") {
            head.status = parse_status_line(line);
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim();
            let value = value.trim();
            if name.eq_ignore_ascii_case("content-type") {
                head.content_type = Some(value.to_string());
            }
            if name.eq_ignore_ascii_case("content-length") {
                head.content_length = value.parse::<u64>().ok();
            }
        }
    }

    head
}

/// Status code from a line like `HTTP/1.1 200 OK` or `HTTP/2 404`.
fn parse_status_line(line: &str) -> Option<u32> {
    line.split_whitespace().nth(1)?.parse().ok()
}
