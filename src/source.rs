//! Input acquisition: remote URLs and local files.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Error, Result};

/// Where a PDF comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// An `http://` or `https://` URL
    Url(String),
    /// A path on the local filesystem
    File(PathBuf),
}

impl Source {
    /// Classify an input string.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(Error::InvalidSource("empty source".to_string()));
        }

        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Ok(Source::Url(trimmed.to_string()))
        } else if lower.starts_with("file://") {
            Ok(Source::File(PathBuf::from(&trimmed["file://".len()..])))
        } else if lower.contains("://") {
            Err(Error::InvalidSource(format!(
                "unsupported scheme in {}",
                trimmed
            )))
        } else {
            Ok(Source::File(PathBuf::from(trimmed)))
        }
    }

    /// Check if the source is remote.
    pub fn is_remote(&self) -> bool {
        matches!(self, Source::Url(_))
    }

    /// Load the raw bytes of the source.
    pub fn load(&self, options: &FetchOptions) -> Result<Vec<u8>> {
        match self {
            Source::File(path) => {
                log::info!("Reading {}", path.display());
                std::fs::read(path).map_err(|source| Error::SourceRead {
                    path: path.clone(),
                    source,
                })
            }
            Source::Url(url) => fetch(url, options),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Url(url) => f.write_str(url),
            Source::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// HTTP settings for remote sources.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Overall request timeout
    pub timeout: Duration,

    /// Connection establishment timeout
    pub connect_timeout: Duration,

    /// User-Agent header value
    pub user_agent: String,

    /// Upper bound on the response size in bytes (0 = unlimited)
    pub max_bytes: u64,
}

impl FetchOptions {
    /// Create new fetch options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the overall request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the connection timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the maximum response size in bytes.
    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60),
            connect_timeout: Duration::from_secs(10),
            user_agent: concat!("pdfprobe/", env!("CARGO_PKG_VERSION")).to_string(),
            max_bytes: 0,
        }
    }
}

#[cfg(feature = "remote")]
fn fetch(url: &str, options: &FetchOptions) -> Result<Vec<u8>> {
    log::info!("Fetching {}", url);

    let client = reqwest::blocking::Client::builder()
        .timeout(options.timeout)
        .connect_timeout(options.connect_timeout)
        .user_agent(options.user_agent.as_str())
        .build()?;

    let response = client.get(url).send()?;
    let status = response.status();
    if !status.is_success() {
        return Err(Error::HttpStatus {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    if options.max_bytes > 0 {
        if let Some(len) = response.content_length() {
            if len > options.max_bytes {
                return Err(Error::Fetch(format!(
                    "response of {} bytes exceeds limit of {} bytes",
                    len, options.max_bytes
                )));
            }
        }
    }

    let bytes = response.bytes()?;
    if options.max_bytes > 0 && bytes.len() as u64 > options.max_bytes {
        return Err(Error::Fetch(format!(
            "response of {} bytes exceeds limit of {} bytes",
            bytes.len(),
            options.max_bytes
        )));
    }

    log::info!("Fetched {} bytes", bytes.len());
    Ok(bytes.to_vec())
}

#[cfg(not(feature = "remote"))]
fn fetch(url: &str, _options: &FetchOptions) -> Result<Vec<u8>> {
    Err(Error::RemoteDisabled(url.to_string()))
}
