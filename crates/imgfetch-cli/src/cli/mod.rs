//! CLI for imgfetch.

mod prompt;
mod report;

use anyhow::Result;
use clap::Parser;
use imgfetch_core::config;
use imgfetch_core::Fetcher;
use std::io::{self, Write};
use std::path::PathBuf;

/// Fetch images from URLs into a local folder, skipping non-images,
/// duplicates, and oversized files.
#[derive(Debug, Parser)]
#[command(name = "imgfetch", version)]
#[command(about = "Fetch images from URLs into a local folder", long_about = None)]
pub struct Cli {
    /// Image URLs to fetch. When none are given, they are read from a prompt.
    pub urls: Vec<String>,

    /// Directory to save images in (default: Fetched_Images).
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Read settings from this TOML file instead of ~/.config/imgfetch/config.toml.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let mut cfg = match &self.config {
            Some(path) => config::load_from(path)?,
            None => config::load_or_default()?,
        };
        if let Some(dir) = self.output_dir {
            cfg.output_dir = dir;
        }
        tracing::debug!("effective config: {:?}", cfg);

        let urls = if self.urls.is_empty() {
            prompt::read_urls(&mut io::stdin().lock(), &mut io::stdout())?
        } else {
            self.urls
        };
        tracing::info!(count = urls.len(), "starting run");

        let fetcher = Fetcher::new(cfg);
        let mut out = io::stdout().lock();
        fetcher.fetch_each(&urls, |attempt| {
            if let Err(e) = writeln!(out, "{}", report::status_line(&attempt)) {
                tracing::warn!("cannot write status line: {}", e);
            }
        });
        Ok(())
    }
}

pub fn run_from_args() -> Result<()> {
    Cli::parse().run()
}

#[cfg(test)]
mod tests;
