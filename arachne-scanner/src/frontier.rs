use std::collections::{HashSet, VecDeque};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    pub url: String,
    pub depth: usize,
}

/// Breadth-first work queue.
///
/// `queued` holds every URL ever accepted, so a link discovered from several
/// pages before it is processed still lands in the queue only once.
/// `visited` holds the URLs that have been handed out by `dequeue`.
#[derive(Debug)]
pub struct Frontier {
    queue: VecDeque<FrontierEntry>,
    queued: HashSet<String>,
    visited: HashSet<String>,
    max_depth: usize,
}

impl Frontier {
    pub fn new(max_depth: usize) -> Self {
        Self {
            queue: VecDeque::new(),
            queued: HashSet::new(),
            visited: HashSet::new(),
            max_depth,
        }
    }

    /// Returns `true` if the entry was appended.
    pub fn enqueue(&mut self, url: String, depth: usize) -> bool {
        if depth > self.max_depth {
            debug!("Depth {} exceeds max {}, dropping {}", depth, self.max_depth, url);
            return false;
        }
        if self.visited.contains(&url) || !self.queued.insert(url.clone()) {
            return false;
        }

        self.queue.push_back(FrontierEntry { url, depth });
        true
    }

    /// Pops the head and marks it visited. `None` means the frontier is exhausted.
    pub fn dequeue(&mut self) -> Option<FrontierEntry> {
        let entry = self.queue.pop_front()?;
        self.visited.insert(entry.url.clone());
        Some(entry)
    }

    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
