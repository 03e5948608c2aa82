//! Interactive URL prompt.

use anyhow::{Context, Result};
use std::io::{BufRead, Write};

/// Print the banner and prompt, then read one line of whitespace-separated URLs.
/// End of input yields an empty list.
pub fn read_urls<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Vec<String>> {
    writeln!(output, "imgfetch: image fetcher")?;
    writeln!(output, "Enter image URLs separated by spaces:")?;
    write!(output, "> ")?;
    output.flush()?;

    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("failed to read URLs from stdin")?;
    Ok(split_urls(&line))
}

pub fn split_urls(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_string).collect()
}
