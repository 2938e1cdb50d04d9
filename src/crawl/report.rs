// src/crawl/report.rs
// =============================================================================
// What a crawl did, for printing or --json output.
//
// Purely informational: the crawl's real output is the files on disk.
// =============================================================================

use std::path::PathBuf;

use serde::Serialize;

/// How one visit ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VisitStatus {
    /// HTML, links followed (or drained on the last level)
    Page,
    /// Image, saved to disk
    Image,
    /// Anything else, body drained and ignored
    Other,
    FetchFailed,
    PersistFailed,
}

/// One fetch attempt and the level it happened at.
#[derive(Debug, Clone, Serialize)]
pub struct VisitRecord {
    pub url: String,
    pub depth: usize,
    pub status: VisitStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CrawlReport {
    /// Levels that started, the seed's included.
    pub levels: usize,
    pub pages: usize,
    /// Every file written, in completion order.
    pub images: Vec<PathBuf>,
    pub skipped: usize,
    pub fetch_failures: usize,
    pub persist_failures: usize,
    /// True when the crawl was cut short by an interrupt.
    pub interrupted: bool,
    pub visits: Vec<VisitRecord>,
}

impl CrawlReport {
    /// Fetch attempts that completed (successfully or not).
    pub fn visited(&self) -> usize {
        self.visits.len()
    }

    /// Every depth at which `url` was processed. At most one entry.
    pub fn depths_of(&self, url: &str) -> Vec<usize> {
        self.visits
            .iter()
            .filter(|v| v.url == url)
            .map(|v| v.depth)
            .collect()
    }

    pub(crate) fn record(&mut self, record: VisitRecord) {
        match record.status {
            VisitStatus::Page => self.pages += 1,
            VisitStatus::Image => {}
            VisitStatus::Other => self.skipped += 1,
            VisitStatus::FetchFailed => self.fetch_failures += 1,
            VisitStatus::PersistFailed => self.persist_failures += 1,
        }
        self.visits.push(record);
    }
}
