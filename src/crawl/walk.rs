// src/crawl/walk.rs
// =============================================================================
// This module implements the crawl itself: a depth-bounded, concurrent
// walk over the link graph.
//
// How one page is handled:
// 1. Out of depth budget? Stop (normal termination, not an error)
// 2. Try to claim the URL in the shared VisitedSet; if someone else
//    already claimed it, stop (their task owns that subtree)
// 3. Fetch the page; on failure, report it and stop this branch only
// 4. Spawn one task per link found (all spawned before any is awaited)
// 5. Wait for every spawned child before returning
//
// Step 5 is what makes crawl() synchronous from the caller's point of
// view: when it returns, the whole reachable subtree within the depth
// budget has been visited or has failed. No work leaks into the
// background.
//
// Rust concepts:
// - BoxFuture: Lets an async function call itself recursively
// - JoinSet: Spawns tasks and waits for all of them (fan-out/fan-in)
// - Arc: Shares the fetcher and the visited set across tasks
// =============================================================================

use std::sync::Arc;

use futures::future::BoxFuture;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::fetch::Fetcher;

use super::visited::VisitedSet;

// Crawls the link graph starting at `start`, following links up to
// `max_depth` levels deep.
//
// Parameters:
//   start: URL to start from
//   max_depth: remaining depth budget; the start page itself costs 1,
//              so max_depth=1 fetches only the start page
//   fetcher: the page-fetching capability (shared by every task)
//   visited: the claim set for this session (shared by every task)
//
// Every distinct URL within reach is fetched at most once no matter
// how many pages link to it; cycles in the graph are harmless for the
// same reason. Returns only after all spawned work has finished.
pub async fn crawl(
    start: &str,
    max_depth: usize,
    fetcher: Arc<dyn Fetcher>,
    visited: Arc<VisitedSet>,
) {
    walk(start.to_string(), max_depth, fetcher, visited, None).await;
}

// Like crawl(), but with at most `max_concurrent` fetches in flight.
//
// crawl() spawns one task per link with no cap, which on a dense site
// can mean a burst of hundreds of simultaneous requests. This variant
// gates the fetch call with a semaphore.
//
// Permits are held only while fetching, never while a parent waits for
// its children, so the cap cannot deadlock the fan-in: a waiting
// parent always leaves its permit available for descendants.
pub async fn crawl_bounded(
    start: &str,
    max_depth: usize,
    max_concurrent: usize,
    fetcher: Arc<dyn Fetcher>,
    visited: Arc<VisitedSet>,
) {
    // A cap of 0 would stall forever; treat it as 1
    let gate = Arc::new(Semaphore::new(max_concurrent.max(1)));
    walk(start.to_string(), max_depth, fetcher, visited, Some(gate)).await;
}

// The recursive worker behind both entry points.
//
// Returns a BoxFuture because async functions cannot refer to
// themselves directly: the compiler cannot size a future that contains
// itself, so each recursion level gets boxed.
fn walk(
    url: String,
    depth: usize,
    fetcher: Arc<dyn Fetcher>,
    visited: Arc<VisitedSet>,
    gate: Option<Arc<Semaphore>>,
) -> BoxFuture<'static, ()> {
    Box::pin(async move {
        // Depth budget spent: this branch ends here
        if depth == 0 {
            return;
        }

        // Exactly one task gets true for any given URL.
        // Losing the claim is the expected outcome for every duplicate
        // discovery (cycles, self-links, shared parents), so it is not
        // logged, let alone treated as an error.
        if !visited.claim(&url) {
            return;
        }

        let result = {
            // Hold a permit only for the duration of the fetch
            let _permit = match &gate {
                Some(gate) => Some(
                    Arc::clone(gate)
                        .acquire_owned()
                        .await
                        .expect("crawl semaphore closed"),
                ),
                None => None,
            };

            debug!(%url, depth, "fetching");
            fetcher.fetch(&url).await
        };

        let page = match result {
            Ok(page) => page,
            Err(e) => {
                // Reported once, here, and nowhere else. The failure
                // of this page never aborts sibling or parent work.
                warn!(%url, error = %e, "fetch failed");
                return;
            }
        };

        debug!(%url, links = page.links.len(), "fetched");

        // Fan-out: spawn every child before awaiting any of them.
        // Links are spawned in document order, but they complete in
        // whatever order the scheduler and the network decide.
        let mut children = JoinSet::new();
        for link in page.links {
            children.spawn(walk(
                link,
                depth - 1,
                Arc::clone(&fetcher),
                Arc::clone(&visited),
                gate.clone(),
            ));
        }

        // Fan-in: drain the set so our caller can rely on the whole
        // subtree being done when we return
        while let Some(joined) = children.join_next().await {
            if let Err(e) = joined {
                // A child panicked; surface it but keep draining
                warn!(error = %e, "crawl task failed");
            }
        }
    })
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why BoxFuture?
//    - An async fn is compiled into a state machine struct
//    - A recursive async fn would contain itself, which has no finite
//      size, so Rust rejects it
//    - Boxing the future puts each level on the heap and breaks the
//      infinite-size cycle
//
// 2. Why tokio::spawn (via JoinSet) instead of join_all on futures?
//    - Spawned tasks run on the runtime's worker threads in parallel
//    - Plain futures polled from one task would merely interleave
//    - A crawl is I/O heavy but we still want true parallelism for
//      the fan-out
//
// 3. What is acquire_owned()?
//    - A Semaphore permit normally borrows the semaphore
//    - acquire_owned() ties the permit to an Arc instead, so it can
//      live inside a spawned task without lifetime trouble
//    - Dropping the permit (end of the fetch block) releases it
//
// 4. Why is the claim taken before the fetch?
//    - Claiming first means a URL is owned by exactly one task for
//      the whole session, even while its fetch is still in flight
//    - Claiming after the fetch would let two tasks fetch the same
//      page at the same time and both "win"
// -----------------------------------------------------------------------------
