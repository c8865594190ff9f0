// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Dispatch to the appropriate subcommand handler
// 3. Run the crawl and wait for it to finish completely
// 4. Print the set of visited pages
// 5. Exit with proper code (0 = success, 2 = error)
//
// Rust concepts used:
// - async/await: Because the crawl runs many fetches concurrently
// - Result<T, E>: For error handling (T = success type, E = error type)
// - match: Pattern matching to handle different subcommands
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;           // src/cli.rs - command-line parsing
mod crawl;         // src/crawl/ - visited set + concurrent walk
mod fetch;         // src/fetch/ - the Fetcher trait and its two impls

use std::sync::Arc;

// Import items we need from our modules
use cli::{Cli, Commands};
use clap::Parser;  // Parser trait enables the parse() method
use fetch::{FixtureFetcher, HttpFetcher};

// anyhow::Result is like std::result::Result but simpler for applications
// It lets us return any error type with the ? operator
use anyhow::Result;
use serde::Serialize;

// The #[tokio::main] attribute transforms our async main into a real main function
// It creates a tokio runtime and runs our async code inside it
#[tokio::main]
async fn main() {
    init_tracing();

    // Run our application logic and capture the exit code
    // std::process::exit() terminates the program with the given code
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // If an unexpected error occurred, print it and exit with code 2
            eprintln!("Error: {}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Sets up the tracing subscriber that prints crawl events.
//
// Default level is warn, so users see fetch failures and nothing else.
// RUST_LOG=site_scout=debug shows every fetch as it happens.
// Events go to stderr so --json output on stdout stays clean.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("site_scout=warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

// This is the main application logic
// Returns:
//   Ok(0) = crawl completed
//   Ok(2) = internal error
//   Err = unexpected error
async fn run() -> Result<i32> {
    // Parse command-line arguments into our Cli struct
    // This will automatically handle --help, --version, etc.
    let cli = Cli::parse();

    // Match on which subcommand was used
    // Each branch handles a different command (site, demo)
    match cli.command {
        Commands::Site {
            website_url,
            max_depth,
            max_concurrent,
            json,
        } => handle_site_scan(&website_url, max_depth, max_concurrent, json).await,
        Commands::Demo { max_depth, json } => handle_demo_scan(max_depth, json).await,
    }
}

// Handles the 'site' subcommand
// Parameters:
//   website_url: URL to start crawling from
//   max_depth: how many levels deep to crawl
//   max_concurrent: optional cap on simultaneous fetches
//   json: whether to output JSON format
async fn handle_site_scan(
    website_url: &str,
    max_depth: usize,
    max_concurrent: Option<usize>,
    json: bool,
) -> Result<i32> {
    if !json {
        println!("🔍 Crawling website: {}", website_url);
        println!("📊 Max crawl depth: {}", max_depth);
    }

    // The fetcher is scoped to the start domain so the crawl does not
    // wander off into every site the target links to
    let fetcher = Arc::new(HttpFetcher::scoped_to(website_url)?);
    let visited = Arc::new(crawl::VisitedSet::new());

    // Returns only once every reachable page within the depth budget
    // has been visited or has failed
    match max_concurrent {
        Some(cap) => {
            crawl::crawl_bounded(
                website_url,
                max_depth,
                cap,
                fetcher,
                Arc::clone(&visited),
            )
            .await
        }
        None => crawl::crawl(website_url, max_depth, fetcher, Arc::clone(&visited)).await,
    }

    // Safe to enumerate now: no crawl tasks are left running
    let report = CrawlReport::new(website_url, max_depth, visited.snapshot());
    print_report(&report, json)?;

    Ok(0)
}

// Handles the 'demo' subcommand
//
// Crawls the built-in sample site, which needs no network and includes
// a dead link so the failure path shows up in the output.
async fn handle_demo_scan(max_depth: usize, json: bool) -> Result<i32> {
    let start = "https://example.com/";

    if !json {
        println!("🔍 Crawling sample site: {}", start);
        println!("📊 Max crawl depth: {}", max_depth);
    }

    let fetcher = Arc::new(FixtureFetcher::sample_site());
    let visited = Arc::new(crawl::VisitedSet::new());

    // Coerce the concrete Arc to the trait object the crawler expects,
    // keeping the concrete `fetcher` handle for total_fetches() below.
    let fetcher_dyn: Arc<dyn fetch::Fetcher> = fetcher.clone();
    crawl::crawl(start, max_depth, fetcher_dyn, Arc::clone(&visited)).await;

    let report = CrawlReport::new(start, max_depth, visited.snapshot());
    print_report(&report, json)?;

    if !json {
        // The fixture counts fetch calls; on any run this equals the
        // number of visited pages, dead link included
        println!("   📡 Fetch calls: {}", fetcher.total_fetches());
    }

    Ok(0)
}

// The final result of one crawl session: everything we reached.
//
// This is what --json serializes, so field names are part of the
// tool's output format.
#[derive(Debug, Serialize)]
struct CrawlReport {
    start: String,
    max_depth: usize,
    pages_visited: usize,
    visited: Vec<String>,
}

impl CrawlReport {
    fn new(start: &str, max_depth: usize, visited: Vec<String>) -> Self {
        Self {
            start: start.to_string(),
            max_depth,
            pages_visited: visited.len(),
            visited,
        }
    }
}

// Prints the report either as a table or JSON
// Parameters:
//   report: the finished crawl report
//   json: whether to output JSON format
fn print_report(report: &CrawlReport, json: bool) -> Result<()> {
    if json {
        // Serialize the report to JSON and print
        let json_output = serde_json::to_string_pretty(report)?;
        println!("{}", json_output);
    } else {
        // Print human-readable table
        print_table(report);
    }
    Ok(())
}

// Prints the report as a human-readable table in the terminal
fn print_table(report: &CrawlReport) {
    println!();
    println!("{:<70}", "VISITED PAGE");
    println!("{}", "=".repeat(70));

    for url in &report.visited {
        // Truncate URL if too long for display
        let url_display = if url.len() > 67 {
            format!("{}...", &url[..67])
        } else {
            url.clone()
        };

        println!("{:<70}", url_display);
    }

    println!();

    // Print summary
    println!("📊 Summary:");
    println!("   🌐 Start: {}", report.start);
    println!("   📏 Max depth: {}", report.max_depth);
    println!("   📄 Pages visited: {}", report.pages_visited);
}
