// src/resource/http.rs
// =============================================================================
// Fetches one URL with a single GET.
//
// Key functionality:
// - Follows redirects (up to MAX_REDIRECTS)
// - Only the connect phase is bounded by default; a total deadline is opt-in
// - Never buffers the body up front: the caller decides whether to read it
//   as text, stream it to a file, or drain it
// - Turns every transport failure and every non-2xx status into a FetchError
// - No retries: each URL gets exactly one attempt
// =============================================================================

use futures::Stream;
use reqwest::header::CONTENT_TYPE;
use reqwest::{redirect, Client, Response};
use url::Url;

use super::classify::{classify, media_type, ContentKind};
use crate::config::CrawlConfig;
use crate::error::FetchError;

// Redirect hops followed before a fetch counts as failed
const MAX_REDIRECTS: usize = 10;

/// Shared HTTP client. Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(config: &CrawlConfig) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder()
            .connect_timeout(config.connection_timeout())
            .redirect(redirect::Policy::limited(MAX_REDIRECTS))
            .user_agent(config.agent());

        // A total deadline would also cut off slow image bodies, so it's opt-in
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Issues the GET and checks the status. The body is still unread.
    pub async fn fetch(&self, url: &Url) -> Result<Fetched, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        // Headers that aren't visible ASCII count as missing
        let header = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok());

        Ok(Fetched {
            kind: classify(header),
            media_type: media_type(header),
            requested: url.clone(),
            response,
        })
    }
}

/// A successful response whose body hasn't been consumed yet.
///
/// Dropping it closes the connection, so every exit path releases it.
#[derive(Debug)]
pub struct Fetched {
    pub kind: ContentKind,
    pub media_type: String,
    requested: Url,
    response: Response,
}

impl Fetched {
    /// The URL we asked for.
    pub fn requested(&self) -> &Url {
        &self.requested
    }

    /// Where we ended up after redirects.
    pub fn final_url(&self) -> &Url {
        self.response.url()
    }

    /// Reads the whole body as text, honoring the declared charset.
    pub async fn text(self) -> Result<String, FetchError> {
        let url = self.requested.to_string();
        self.response
            .text()
            .await
            .map_err(|source| FetchError::Transport { url, source })
    }

    /// The body as a stream of chunks.
    pub fn into_stream(self) -> impl Stream<Item = Result<impl AsRef<[u8]>, reqwest::Error>> {
        self.response.bytes_stream()
    }

    /// Reads and discards the body so the connection can go back to the pool.
    pub async fn drain(mut self) -> Result<u64, FetchError> {
        let mut total = 0u64;
        loop {
            match self.response.chunk().await {
                Ok(Some(chunk)) => total += chunk.len() as u64,
                Ok(None) => return Ok(total),
                Err(source) => {
                    return Err(FetchError::Transport {
                        url: self.requested.to_string(),
                        source,
                    })
                }
            }
        }
    }
}

impl FetchError {
    /// Short label for logs.
    pub fn reason(&self) -> &'static str {
        match self {
            FetchError::Status { status: 404 | 410, .. } => "broken",
            FetchError::Status { .. } => "http error",
            FetchError::Transport { source, .. } => {
                let text = source.to_string().to_lowercase();
                if source.is_timeout() {
                    "timeout"
                } else if source.is_redirect() {
                    "too many redirects"
                } else if source.is_builder() {
                    "unsupported url"
                } else if source.is_connect() && text.contains("dns") {
                    "dns error"
                } else if source.is_connect() {
                    "connection failed"
                } else if text.contains("certificate") || text.contains("tls") {
                    "tls error"
                } else {
                    "error"
                }
            }
        }
    }
}
