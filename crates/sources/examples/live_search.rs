//! Example: Run one live search against the YouTube Data API
//!
//! Run with: YOUTUBE_API_KEY=... cargo run --package sources --example live_search -- lofi chill
//!
//! This example shows how to:
//! 1. Build a search client with a request timeout
//! 2. Issue one music search
//! 3. Normalize the payload into candidates
//! 4. Display the results

use anyhow::Context;
use sources::{language_hint, normalize_candidates, SearchRequest, YouTubeSearchClient};
use std::time::{Duration, Instant};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("info,sources=debug")
        .init();

    let api_key = std::env::var("YOUTUBE_API_KEY").context("YOUTUBE_API_KEY is not set")?;
    let terms: Vec<String> = std::env::args().skip(1).collect();
    let query = if terms.is_empty() {
        "lofi chill".to_string()
    } else {
        terms.join(" ")
    };

    println!("=== YouTube Search Example ===\n");

    let client = YouTubeSearchClient::new(api_key, Duration::from_secs(10))?;
    let request = SearchRequest {
        query,
        max_results: 10,
        language: language_hint(None),
    };

    let start = Instant::now();
    let payload = client.search(&request).await?;
    let raw_count = payload.items.len();
    let candidates = normalize_candidates(payload);
    println!(
        "Query '{}' returned {} records, {} usable candidates in {:?}\n",
        request.query,
        raw_count,
        candidates.len(),
        start.elapsed()
    );

    for (i, candidate) in candidates.iter().enumerate() {
        println!(
            "{:2}. {} [{}]",
            i + 1,
            candidate.title.as_deref().unwrap_or("(untitled)"),
            candidate.channel_title.as_deref().unwrap_or("unknown channel")
        );
        println!("    {}", candidate.url);
    }

    Ok(())
}
