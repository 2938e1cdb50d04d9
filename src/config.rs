// src/config.rs
// =============================================================================
// The crawl configuration record.
//
// Built once by the CLI (or a test), then handed to the Crawler by value.
// Fields are private so nothing can change a config mid-crawl.
// =============================================================================

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Serialize;
use url::Url;

/// Depth used when `-l` is not given.
pub const DEFAULT_DEPTH: usize = 5;

/// Output root used when `-p` is not given.
pub const DEFAULT_OUTPUT_ROOT: &str = "./data";

/// Concurrent fetches per level.
pub const DEFAULT_JOBS: usize = 8;

/// How long to wait for a TCP/TLS connection. Reading the body is unbounded
/// unless a total timeout is asked for.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Everything the engine needs to know about one crawl.
#[derive(Debug, Clone, Serialize)]
pub struct CrawlConfig {
    seed: Url,
    recursive: bool,
    max_depth: usize,
    output_root: PathBuf,
    jobs: usize,
    #[serde(serialize_with = "serialize_secs")]
    connect_timeout: Duration,
    #[serde(serialize_with = "serialize_optional_secs")]
    timeout: Option<Duration>,
    user_agent: String,
}

impl CrawlConfig {
    // A non-recursive config with the default depth and pool size, and no
    // total request deadline
    pub fn new(seed: Url, output_root: impl Into<PathBuf>) -> Self {
        Self {
            seed,
            recursive: false,
            max_depth: DEFAULT_DEPTH,
            output_root: output_root.into(),
            jobs: DEFAULT_JOBS,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            timeout: None,
            user_agent: concat!("spider/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    // Size of the fetch pool. Zero is bumped to one.
    pub fn jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    // Opt-in deadline for a whole request, body included. Without it a slow
    // but live download is never cut off.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn seed(&self) -> &Url {
        &self.seed
    }

    pub fn is_recursive(&self) -> bool {
        self.recursive
    }

    // The deepest level the engine may schedule.
    //
    // Without -r this is always 1: the seed, plus whatever the seed
    // page references directly, and nothing further.
    pub fn effective_depth(&self) -> usize {
        if self.recursive {
            self.max_depth
        } else {
            1
        }
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    pub fn concurrency(&self) -> usize {
        self.jobs
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn connection_timeout(&self) -> Duration {
        self.connect_timeout
    }

    pub fn agent(&self) -> &str {
        &self.user_agent
    }
}

fn serialize_secs<S: serde::Serializer>(value: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(value.as_secs())
}

fn serialize_optional_secs<S: serde::Serializer>(
    value: &Option<Duration>,
    s: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(d) => s.serialize_some(&d.as_secs()),
        None => s.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed() -> Url {
        Url::parse("http://example.com/").unwrap()
    }

    #[test]
    fn test_non_recursive_clamps_depth() {
        let config = CrawlConfig::new(seed(), "out").max_depth(9);
        assert_eq!(config.effective_depth(), 1);

        let config = CrawlConfig::new(seed(), "out").max_depth(0);
        assert_eq!(config.effective_depth(), 1);
    }

    #[test]
    fn test_recursive_keeps_depth() {
        let config = CrawlConfig::new(seed(), "out").recursive(true).max_depth(3);
        assert_eq!(config.effective_depth(), 3);

        let config = CrawlConfig::new(seed(), "out").recursive(true);
        assert_eq!(config.effective_depth(), DEFAULT_DEPTH);
    }

    #[test]
    fn test_serializes_for_the_json_report() {
        let config = CrawlConfig::new(seed(), "out").jobs(4);
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["seed"], "http://example.com/");
        assert!(json["timeout"].is_null());
        assert_eq!(json["connect_timeout"], 10);
        assert_eq!(json["jobs"], 4);
        assert_eq!(json["output_root"], "out");
    }

    #[test]
    fn test_no_total_timeout_unless_asked() {
        let config = CrawlConfig::new(seed(), "out");
        assert_eq!(config.request_timeout(), None);
        assert_eq!(config.connection_timeout(), DEFAULT_CONNECT_TIMEOUT);
        assert!(!config.is_recursive());

        let config = config.timeout(Duration::from_secs(5));
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_zero_jobs_becomes_one() {
        let config = CrawlConfig::new(seed(), "out").jobs(0);
        assert_eq!(config.concurrency(), 1);
    }
}
