// src/crawl/mod.rs
// =============================================================================
// This module contains the crawl core.
//
// Submodules:
// - visited: The shared set of already-claimed URLs
// - walk: The depth-bounded concurrent walk over the link graph
//
// These two pieces are the heart of the whole tool. Everything else
// (fetchers, CLI, reporting) exists to feed them or to show their
// output.
//
// Rust concepts:
// - Modules: Organize code into namespaces
// - pub use: Re-export items to simplify imports for users of this module
// =============================================================================

mod visited;
mod walk;

// Re-export public items from submodules
// This lets users write `crawl::crawl()` instead of
// `crawl::walk::crawl()`
pub use visited::VisitedSet;
pub use walk::{crawl, crawl_bounded};
