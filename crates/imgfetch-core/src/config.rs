use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Size limit applied to a declared `Content-Length` (10 MiB).
pub const DEFAULT_MAX_BYTES: u64 = 10 * 1024 * 1024;

/// Filename used when the URL has no final path segment.
pub const DEFAULT_FALLBACK_FILENAME: &str = "downloaded_image.jpg";

/// Configuration loaded from `~/.config/imgfetch/config.toml`.
///
/// Every field may be omitted from the file; missing fields take the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Directory saved images are written to (created on first use).
    pub output_dir: PathBuf,
    /// Connect timeout, and the window after which a stalled transfer is aborted.
    pub timeout_secs: u64,
    /// Maximum accepted `Content-Length` in bytes.
    pub max_bytes: u64,
    /// Receive buffer size; the body is written in chunks of at most this many bytes.
    pub chunk_size: usize,
    /// Filename used when the URL path has no final segment.
    pub fallback_filename: String,
    /// Follow HTTP redirects (at most 10 hops).
    pub follow_redirects: bool,
    /// Also abort and discard when the streamed body grows past `max_bytes`,
    /// for servers that omit or understate `Content-Length`. Off by default.
    pub enforce_limit_while_streaming: bool,
    /// `User-Agent` request header.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("Fetched_Images"),
            timeout_secs: 10,
            max_bytes: DEFAULT_MAX_BYTES,
            chunk_size: 1024,
            fallback_filename: DEFAULT_FALLBACK_FILENAME.to_string(),
            follow_redirects: true,
            enforce_limit_while_streaming: false,
            user_agent: concat!("imgfetch/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Where the user config file lives: `~/.config/imgfetch/config.toml`.
pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("imgfetch")?;
    Ok(xdg_dirs.get_config_home().join("imgfetch").join("config.toml"))
}

/// Load configuration from the XDG config dirs, or defaults when no file exists.
///
/// Nothing is written to disk.
pub fn load_or_default() -> Result<FetchConfig> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("imgfetch")?;
    match xdg_dirs.find_config_file("config.toml") {
        Some(path) => load_from(&path),
        None => {
            tracing::debug!("no config file found, using defaults");
            Ok(FetchConfig::default())
        }
    }
}

/// Load configuration from an explicit file.
pub fn load_from(path: &Path) -> Result<FetchConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let cfg: FetchConfig = toml::from_str(&data)
        .with_context(|| format!("invalid config {}", path.display()))?;
    tracing::info!("loaded config from {}", path.display());
    Ok(cfg)
}
