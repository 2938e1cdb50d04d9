// src/lib.rs
// =============================================================================
// spider: a bounded-depth, breadth-first web crawler.
//
// Give it a seed URL and it fetches the page, follows every href/src it
// finds (level by level, up to a depth limit) and mirrors each image it
// meets into a local directory that follows the URL's path.
//
// The `crawl` binary in src/main.rs is a thin CLI over this library.
// =============================================================================

pub mod config;
pub mod crawl;
pub mod error;
pub mod persist;
pub mod resource;

pub use config::CrawlConfig;
pub use crawl::{CrawlReport, Crawler, VisitRecord, VisitStatus};
pub use error::{CrawlError, FetchError, PersistError};

/// Runs a crawl to completion with the given config.
pub async fn run(config: CrawlConfig) -> Result<CrawlReport, CrawlError> {
    Crawler::new(config)?.run().await
}
