use crate::canonical::CanonicalUrl;
use std::collections::{HashSet, VecDeque};

/// A pending unit of crawl work
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierItem {
    pub url: CanonicalUrl,
    pub depth: usize,
}

/// BFS work queue plus the set of URLs already dequeued
///
/// A URL is marked visited when it is dequeued, not when it is queued.
/// Pending URLs are tracked in their own set so a link discovered from two
/// pages is only queued once.
#[derive(Debug)]
pub struct Frontier {
    queue: VecDeque<FrontierItem>,
    pending: HashSet<String>,
    visited: HashSet<String>,
    max_depth: usize,
}

impl Frontier {
    pub fn new(max_depth: usize) -> Self {
        Self {
            queue: VecDeque::new(),
            pending: HashSet::new(),
            visited: HashSet::new(),
            max_depth,
        }
    }

    /// Queue `url` at `depth`; returns false when the push was dropped
    pub fn push(&mut self, url: CanonicalUrl, depth: usize) -> bool {
        if depth > self.max_depth {
            ::log::trace!("Dropping {} at depth {} (max {})", url, depth, self.max_depth);
            return false;
        }
        if self.visited.contains(url.as_str()) || self.pending.contains(url.as_str()) {
            return false;
        }

        self.pending.insert(url.as_str().to_string());
        self.queue.push_back(FrontierItem { url, depth });
        true
    }

    /// Remove the oldest pending item
    pub fn pop(&mut self) -> Option<FrontierItem> {
        let item = self.queue.pop_front()?;
        self.pending.remove(item.url.as_str());
        Some(item)
    }

    /// Record that `url` has been claimed; true the first time only
    pub fn mark_visited(&mut self, url: &CanonicalUrl) -> bool {
        self.visited.insert(url.as_str().to_string())
    }

    pub fn is_visited(&self, url: &CanonicalUrl) -> bool {
        self.visited.contains(url.as_str())
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> CanonicalUrl {
        CanonicalUrl::parse(s).unwrap()
    }

    #[test]
    fn test_fifo_order() {
        let mut frontier = Frontier::new(3);
        assert!(frontier.push(url("https://a.com/1"), 0));
        assert!(frontier.push(url("https://a.com/2"), 1));
        assert!(frontier.push(url("https://a.com/3"), 1));

        let order: Vec<_> = std::iter::from_fn(|| frontier.pop())
            .map(|item| item.url.as_str().to_string())
            .collect();
        assert_eq!(
            order,
            vec!["https://a.com/1", "https://a.com/2", "https://a.com/3"]
        );
        assert!(frontier.is_empty());
    }

    #[test]
    fn test_depth_bound() {
        let mut frontier = Frontier::new(1);
        assert!(frontier.push(url("https://a.com/"), 0));
        assert!(frontier.push(url("https://a.com/b"), 1));
        assert!(!frontier.push(url("https://a.com/c"), 2));
        assert_eq!(frontier.len(), 2);
        while let Some(item) = frontier.pop() {
            assert!(item.depth <= frontier.max_depth());
        }
    }

    #[test]
    fn test_pending_duplicate_dropped() {
        let mut frontier = Frontier::new(2);
        assert!(frontier.push(url("https://a.com/x"), 1));
        assert!(!frontier.push(url("https://a.com/x"), 1));
        assert!(!frontier.push(url("https://a.com/x"), 2));
        assert_eq!(frontier.len(), 1);
    }

    #[test]
    fn test_visited_url_not_requeued() {
        let mut frontier = Frontier::new(2);
        frontier.push(url("https://a.com/x"), 0);
        let item = frontier.pop().unwrap();
        assert!(frontier.mark_visited(&item.url));

        assert!(!frontier.push(url("https://a.com/x"), 1));
        assert!(frontier.is_empty());
    }

    #[test]
    fn test_mark_visited_idempotent() {
        let mut frontier = Frontier::new(0);
        let target = url("https://a.com/");
        assert!(frontier.mark_visited(&target));
        assert!(!frontier.mark_visited(&target));
        assert!(frontier.is_visited(&target));
        assert_eq!(frontier.visited_count(), 1);
    }

    #[test]
    fn test_popped_but_unvisited_can_requeue() {
        // Dequeue alone does not claim a URL; the engine marks it right after.
        let mut frontier = Frontier::new(1);
        frontier.push(url("https://a.com/"), 0);
        frontier.pop();
        assert!(frontier.push(url("https://a.com/"), 1));
    }
}
