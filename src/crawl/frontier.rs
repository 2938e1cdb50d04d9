// src/crawl/frontier.rs
// =============================================================================
// The two collections a breadth-first crawl needs.
//
// - Frontier: URLs waiting for one level, in discovery order, no duplicates.
//   A page linked from three sibling pages is still queued once.
// - VisitedSet: every URL we have attempted, for the whole crawl. It only
//   grows. A URL goes in before its fetch starts, so nothing is fetched twice.
//
// Both are owned by the engine alone; workers never see them.
// =============================================================================

use std::collections::HashSet;

use url::Url;

#[derive(Debug, Default)]
pub struct Frontier {
    order: Vec<Url>,
    queued: HashSet<Url>,
}

impl Frontier {
    pub fn seeded(seed: Url) -> Self {
        let mut frontier = Self::default();
        frontier.push(seed);
        frontier
    }

    // Queues `url` unless it's already queued. Returns whether it was added.
    pub fn push(&mut self, url: Url) -> bool {
        if self.queued.insert(url.clone()) {
            self.order.push(url);
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    // Hands the level's batch over. The batch size is fixed from here on.
    pub fn into_batch(self) -> Vec<Url> {
        self.order
    }
}

#[derive(Debug, Default)]
pub struct VisitedSet {
    seen: HashSet<Url>,
}

impl VisitedSet {
    pub fn contains(&self, url: &Url) -> bool {
        self.seen.contains(url)
    }

    /// Marks `url` as visited. False if it already was.
    pub fn claim(&mut self, url: &Url) -> bool {
        if self.seen.contains(url) {
            return false;
        }
        self.seen.insert(url.clone())
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why both a Vec and a HashSet in Frontier?
//    - The Vec keeps insertion order, so logs and batches are predictable
//    - The HashSet answers "already queued?" in O(1)
//
// 2. What does into_batch(self) mean?
//    - It takes the frontier by value, so the caller can't push into it again
//    - Once a level starts, its batch is fixed
//
// 3. Why does claim() return a bool?
//    - HashSet::insert already tells us whether the value was new
//    - One call both checks and marks, so there's no gap between the two
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_frontier_dedups_and_keeps_order() {
        let mut frontier = Frontier::seeded(url("http://a.test/"));
        assert!(frontier.push(url("http://a.test/x")));
        assert!(!frontier.push(url("http://a.test/")));
        assert!(frontier.push(url("http://a.test/y")));
        assert!(!frontier.push(url("http://a.test/x")));

        assert_eq!(frontier.len(), 3);
        let batch: Vec<String> = frontier.into_batch().into_iter().map(String::from).collect();
        assert_eq!(batch, vec!["http://a.test/", "http://a.test/x", "http://a.test/y"]);
    }

    #[test]
    fn test_visited_claims_once() {
        let mut visited = VisitedSet::default();
        assert!(visited.is_empty());
        assert!(visited.claim(&url("http://a.test/d")));
        assert!(!visited.claim(&url("http://a.test/d")));
        assert!(visited.contains(&url("http://a.test/d")));
        assert_eq!(visited.len(), 1);
    }
}
