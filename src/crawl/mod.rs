// src/crawl/mod.rs
// =============================================================================
// This module handles the crawl itself.
//
// Features:
// - Breadth-first crawling starting from a seed URL, level by level
// - Configurable depth limit
// - A bounded pool of concurrent fetches inside each level
// - Images mirrored to disk, HTML followed, everything else ignored
// =============================================================================

mod engine;
mod frontier;
mod report;

pub use engine::Crawler;
pub use frontier::{Frontier, VisitedSet};
pub use report::{CrawlReport, VisitRecord, VisitStatus};
