// src/crawl/visited.rs
// =============================================================================
// This module implements the shared "already visited" set.
//
// Why does this exist?
// - Many crawl tasks run at the same time
// - Two of them may discover the same URL through different pages
// - Exactly ONE of them should fetch it; the other should back off
//
// The whole trick is one atomic operation: claim().
// "Check if present, insert if absent" happens inside a single lock,
// so no two tasks can both see "absent" for the same URL.
//
// Rust concepts:
// - Mutex: Mutual exclusion lock guarding the inner HashSet
// - Interior mutability: claim() takes &self but still mutates
// - Arc (used by callers): Shared ownership across tasks
// =============================================================================

use std::collections::HashSet;
use std::sync::Mutex;

// The set of URLs some crawl task has taken responsibility for.
//
// One instance is created per crawl session and shared (via Arc) by
// every task in that session. URLs are only ever added, never removed.
#[derive(Debug, Default)]
pub struct VisitedSet {
    inner: Mutex<HashSet<String>>,
}

impl VisitedSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(HashSet::new()),
        }
    }

    // Atomically claims a URL for the calling task.
    //
    // Returns:
    //   true  = the URL was not present; it is now recorded and the
    //           caller owns visiting it
    //   false = some other caller already claimed it (earlier or
    //           concurrently); the set is unchanged
    //
    // HashSet::insert already returns whether the value was newly
    // inserted, so the check and the mark are one operation. Holding
    // the lock around it is what makes the claim race-free.
    pub fn claim(&self, url: &str) -> bool {
        let mut set = self.inner.lock().expect("visited set lock poisoned");

        set.insert(url.to_string())
    }

    /// Number of URLs claimed so far.
    pub fn len(&self) -> usize {
        self.inner.lock().expect("visited set lock poisoned").len()
    }

    /// True if nothing has been claimed yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Returns a sorted copy of every claimed URL.
    //
    // Meant for reporting after the crawl has finished. The copy is
    // sorted because tasks complete in no particular order and we want
    // runs over the same site to print the same report.
    pub fn snapshot(&self) -> Vec<String> {
        let set = self.inner.lock().expect("visited set lock poisoned");

        let mut urls: Vec<String> = set.iter().cloned().collect();
        urls.sort();
        urls
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why Mutex and not RwLock?
//    - RwLock shines when most accesses are reads
//    - Here nearly every access is claim(), which writes
//    - A plain Mutex is simpler and just as fast for this pattern
//
// 2. What is interior mutability?
//    - claim() takes &self (shared reference) but mutates the set
//    - The Mutex makes that safe: it hands out exclusive access at
//      runtime instead of compile time
//    - This is what lets many tasks share one set through an Arc
//
// 3. Why does claim() take &str but store String?
//    - Callers usually still need their URL afterwards
//    - We only allocate a copy when the URL is actually new
//
// 4. What about lock poisoning?
//    - A Mutex becomes "poisoned" if a thread panics while holding it
//    - Nothing in claim() can panic, so we treat poisoning as a bug
//      and expect() on it, like unwrapping a known-valid selector
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_first_claim_wins() {
        let visited = VisitedSet::new();
        assert!(visited.claim("https://example.com/"));
        assert!(!visited.claim("https://example.com/"));
        assert_eq!(visited.len(), 1);
    }

    #[test]
    fn test_distinct_urls_are_independent() {
        let visited = VisitedSet::new();
        assert!(visited.claim("https://example.com/a"));
        assert!(visited.claim("https://example.com/b"));
        assert_eq!(visited.len(), 2);
    }

    #[test]
    fn test_snapshot_is_sorted() {
        let visited = VisitedSet::new();
        visited.claim("https://example.com/c");
        visited.claim("https://example.com/a");
        visited.claim("https://example.com/b");

        assert_eq!(
            visited.snapshot(),
            vec![
                "https://example.com/a".to_string(),
                "https://example.com/b".to_string(),
                "https://example.com/c".to_string(),
            ]
        );
    }

    // The property that matters: out of N concurrent claimants for the
    // same URL, exactly one sees true.
    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_claims_have_one_winner() {
        let visited = Arc::new(VisitedSet::new());
        let mut handles = Vec::new();

        for _ in 0..64 {
            let visited = Arc::clone(&visited);
            handles.push(tokio::spawn(async move {
                visited.claim("https://example.com/contended")
            }));
        }

        let mut winners = 0;
        for handle in handles {
            if handle.await.unwrap() {
                winners += 1;
            }
        }

        assert_eq!(winners, 1);
        assert_eq!(visited.len(), 1);
    }
}
