// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Enums: Types that can be one of several variants
// - Derive macros: Automatically generate code for our types
// =============================================================================

use clap::{Parser, Subcommand};

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "site-scout",
    version = "0.1.0",
    about = "A CLI tool to map the reachable pages of a website",
    long_about = "site-scout crawls a website concurrently up to a configurable depth and \
                  reports every distinct page it reached. Each page is fetched exactly once, \
                  no matter how many links point to it."
)]
pub struct Cli {
    // The #[command(subcommand)] attribute tells clap that this field
    // will hold one of the subcommands defined in the Commands enum
    #[command(subcommand)]
    pub command: Commands,
}

// This enum defines our subcommands (site, demo)
//
// Each variant represents a different subcommand the user can run
// The fields inside each variant become the arguments for that subcommand
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crawl a live website and list every page reached
    ///
    /// Example: site-scout site https://example.com --max-depth 3
    Site {
        /// Website URL to start from (e.g., https://example.com)
        ///
        /// This is a positional argument (required)
        website_url: String,

        /// Maximum crawl depth (default: 2)
        ///
        /// This controls how many levels deep we crawl from the starting page
        /// Depth 1 = just the starting page
        /// Depth 2 = starting page + all pages it links to
        /// etc.
        #[arg(long, default_value_t = 2)]
        max_depth: usize,

        /// Cap on simultaneous fetches (default: no cap)
        ///
        /// Without a cap the crawler starts one fetch per discovered
        /// link; on a dense site that can be a lot of simultaneous
        /// requests. --max-concurrent 8 keeps at most 8 in flight.
        #[arg(long)]
        max_concurrent: Option<usize>,

        /// Output results in JSON format instead of a table
        ///
        /// This is an optional flag: --json
        #[arg(long)]
        json: bool,
    },

    /// Crawl a small built-in sample site (no network needed)
    ///
    /// Example: site-scout demo --max-depth 4
    Demo {
        /// Maximum crawl depth (default: 4)
        #[arg(long, default_value_t = 4)]
        max_depth: usize,

        /// Output results in JSON format instead of a table
        #[arg(long)]
        json: bool,
    },
}
