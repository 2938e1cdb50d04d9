// src/crawl/engine.rs
// =============================================================================
// Breadth-first crawling, one level at a time.
//
// How it works:
// 1. Create the output root (it must not exist yet)
// 2. Level 0 is just the seed URL
// 3. Every URL in the level is fetched, up to `jobs` at once
// 4. HTML pages contribute their links to the next level; images are
//    saved; everything else is drained and ignored
// 5. The next level starts only after the current one has fully drained,
//    and only if it has URLs and is within the depth limit
//
// The engine owns the frontier and the visited set. Workers just return a
// VisitOutcome, and the engine folds those in as they arrive, so there is
// no shared mutable state between fetches.
//
// A failed fetch or a failed write is logged and counted, never fatal.
// =============================================================================

use std::collections::HashSet;
use std::future::Future;
use std::path::Path;

use futures::stream::{self, StreamExt};
use tokio::fs;
use tracing::{debug, info, warn};
use url::Url;

use super::frontier::{Frontier, VisitedSet};
use super::report::{CrawlReport, VisitRecord, VisitStatus};
use crate::config::CrawlConfig;
use crate::error::CrawlError;
use crate::persist::{persist, Persisted};
use crate::resource::{extract_links, ContentKind, Fetched, Fetcher};

/// Result of visiting one URL, handed back to the engine.
#[derive(Debug)]
enum VisitOutcome {
    Page { links: HashSet<Url> },
    Image(Persisted),
    Other,
    FetchFailed(String),
    PersistFailed(String),
}

impl VisitOutcome {
    fn status(&self) -> VisitStatus {
        match self {
            VisitOutcome::Page { .. } => VisitStatus::Page,
            VisitOutcome::Image(_) => VisitStatus::Image,
            VisitOutcome::Other => VisitStatus::Other,
            VisitOutcome::FetchFailed(_) => VisitStatus::FetchFailed,
            VisitOutcome::PersistFailed(_) => VisitStatus::PersistFailed,
        }
    }
}

/// A configured crawl, ready to run.
#[derive(Debug)]
pub struct Crawler {
    config: CrawlConfig,
    fetcher: Fetcher,
}

impl Crawler {
    pub fn new(config: CrawlConfig) -> Result<Self, CrawlError> {
        let fetcher = Fetcher::new(&config)?;
        Ok(Self { config, fetcher })
    }

    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    /// Crawls until the frontier empties or the depth limit is reached.
    pub async fn run(&self) -> Result<CrawlReport, CrawlError> {
        self.run_until(std::future::pending()).await
    }

    /// Like `run`, but stops as soon as `shutdown` completes.
    ///
    /// Fetches in flight are abandoned. Files already written stay on disk,
    /// and the partial report comes back with `interrupted` set.
    pub async fn run_until<F>(&self, shutdown: F) -> Result<CrawlReport, CrawlError>
    where
        F: Future<Output = ()>,
    {
        create_output_root(self.config.output_root()).await?;

        info!(
            seed = %self.config.seed(),
            recursive = self.config.is_recursive(),
            depth = self.config.effective_depth(),
            output = %self.config.output_root().display(),
            "Crawl starting"
        );

        let mut report = CrawlReport::default();
        let interrupted = tokio::select! {
            _ = self.traverse(&mut report) => false,
            _ = shutdown => true,
        };

        if interrupted {
            info!("Crawl interrupted");
            report.interrupted = true;
        }

        info!(
            levels = report.levels,
            visited = report.visited(),
            images = report.images.len(),
            "Crawl finished"
        );

        Ok(report)
    }

    async fn traverse(&self, report: &mut CrawlReport) {
        let max_depth = self.config.effective_depth();
        let mut visited = VisitedSet::default();
        let mut frontier = Frontier::seeded(self.config.seed().clone());
        let mut depth = 0;

        loop {
            // Claim the whole batch before any fetch in it is issued
            let batch: Vec<Url> = frontier
                .into_batch()
                .into_iter()
                .filter(|url| {
                    let fresh = visited.claim(url);
                    if !fresh {
                        debug!(url = %url, "already visited");
                    }
                    fresh
                })
                .collect();

            report.levels += 1;
            debug!(depth, urls = batch.len(), visited = visited.len(), "level started");

            // Links found on the last level would never be fetched
            let follow_links = depth < max_depth;
            let mut next = Frontier::default();

            let mut visits = stream::iter(batch)
                .map(|url| async move {
                    let outcome = self.visit(&url, follow_links).await;
                    (url, outcome)
                })
                .buffer_unordered(self.config.concurrency());

            while let Some((url, outcome)) = visits.next().await {
                let message = match &outcome {
                    VisitOutcome::FetchFailed(m) | VisitOutcome::PersistFailed(m) => {
                        Some(m.clone())
                    }
                    _ => None,
                };
                let status = outcome.status();

                match outcome {
                    VisitOutcome::Page { links } => {
                        for link in links {
                            if !visited.contains(&link) {
                                next.push(link);
                            }
                        }
                    }
                    VisitOutcome::Image(saved) => report.images.push(saved.path),
                    _ => {}
                }

                report.record(VisitRecord {
                    url: url.to_string(),
                    depth,
                    status,
                    message,
                });
            }

            if next.is_empty() || depth + 1 > max_depth {
                debug!(depth, "no further levels");
                break;
            }

            debug!(depth = depth + 1, queued = next.len(), "next level queued");
            depth += 1;
            frontier = next;
        }
    }

    async fn visit(&self, url: &Url, follow_links: bool) -> VisitOutcome {
        match self.fetcher.fetch(url).await {
            Ok(fetched) => {
                info!(url = %url, media_type = %fetched.media_type, "Visiting");
                self.dispatch(fetched, follow_links).await
            }
            Err(e) => {
                warn!(url = %url, reason = e.reason(), error = %e, "Skipping");
                VisitOutcome::FetchFailed(e.to_string())
            }
        }
    }

    async fn dispatch(&self, fetched: Fetched, follow_links: bool) -> VisitOutcome {
        let url = fetched.requested().clone();

        match fetched.kind {
            ContentKind::Html if follow_links => {
                // Relative links resolve against the URL we asked for,
                // same as the image path below
                if fetched.final_url() != &url {
                    debug!(url = %url, landed = %fetched.final_url(), "redirected");
                }
                match fetched.text().await {
                    Ok(html) => {
                        let links = extract_links(&html, &url);
                        debug!(url = %url, links = links.len(), "links extracted");
                        VisitOutcome::Page { links }
                    }
                    Err(e) => {
                        warn!(url = %url, error = %e, "Skipping");
                        VisitOutcome::FetchFailed(e.to_string())
                    }
                }
            }
            ContentKind::Html => match fetched.drain().await {
                Ok(_) => VisitOutcome::Page {
                    links: HashSet::new(),
                },
                Err(e) => VisitOutcome::FetchFailed(e.to_string()),
            },
            ContentKind::Image => {
                let root = self.config.output_root();
                match persist(&url, fetched.into_stream(), root).await {
                    Ok(saved) => {
                        info!(path = %saved.path.display(), bytes = saved.bytes, "Downloaded");
                        VisitOutcome::Image(saved)
                    }
                    Err(e) => {
                        warn!(url = %url, error = %e, "Could not save image");
                        VisitOutcome::PersistFailed(e.to_string())
                    }
                }
            }
            ContentKind::Other => match fetched.drain().await {
                Ok(bytes) => {
                    debug!(url = %url, bytes, "ignored");
                    VisitOutcome::Other
                }
                Err(e) => VisitOutcome::FetchFailed(e.to_string()),
            },
        }
    }
}

// Creates the output root. Refuses to reuse one that already exists.
async fn create_output_root(path: &Path) -> Result<(), CrawlError> {
    fs::create_dir(path)
        .await
        .map_err(|source| CrawlError::OutputRoot {
            path: path.to_path_buf(),
            source,
        })
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why one batch per level instead of a single queue?
//    - A level is every URL at the same hop count from the seed
//    - Level N+1 is only known once every page in level N is parsed
//    - Waiting for the whole batch is the barrier between levels
//
// 2. What is buffer_unordered?
//    - Turns a stream of futures into a stream of their results
//    - Runs at most `n` of them at once (our --jobs)
//    - Yields results in completion order, not input order
//
// 3. Why claim the whole batch in the visited set before fetching?
//    - Two pages in the same level can link to each other
//    - Claiming first means neither gets queued again for the next level
//    - The engine is the only owner of the set, so no Mutex is needed
//
// 4. What is tokio::select!?
//    - Waits on several futures and runs the branch of whichever finishes first
//    - The other futures are dropped, which cancels them
//    - We race the crawl against Ctrl-C this way
//
// 5. Why return a VisitOutcome instead of touching the report?
//    - Workers run concurrently and the report is a plain struct
//    - Handing results back keeps all mutation in one place
// -----------------------------------------------------------------------------
