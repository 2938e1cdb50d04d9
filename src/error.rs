// src/error.rs
// =============================================================================
// Error types for the crawler.
//
// Only CrawlError is fatal. FetchError and PersistError describe a single
// URL going wrong; the engine logs them, counts them, and keeps crawling.
// =============================================================================

use std::path::PathBuf;

use thiserror::Error;

/// Errors that stop a crawl before it starts.
#[derive(Debug, Error)]
pub enum CrawlError {
    /// The output root already exists or could not be created.
    #[error("cannot create output directory {path}: {source}")]
    OutputRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The HTTP client could not be built (TLS backend, bad user agent...).
    #[error("cannot build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// A single fetch that failed. Recovered by skipping the URL.
#[derive(Debug, Error)]
pub enum FetchError {
    /// DNS, connection refused, timeout, TLS, redirect loop, bad scheme.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with something other than 2xx.
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },
}

/// Writing one image to disk failed. Recovered by skipping the file.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("IO error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The response body broke off while we were streaming it.
    #[error("body of {url} ended early: {message}")]
    Body { url: String, message: String },

    /// The decoded URL path names no file, or would leave the output root.
    #[error("no safe local path for {url}")]
    UnsafePath { url: String },
}

impl PersistError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
