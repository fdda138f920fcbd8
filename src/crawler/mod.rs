//! Crawler module for fetching and extracting forum threads
//!
//! This module contains the core crawl logic, including:
//! - HTTP fetching with rate-limit retry and bounded concurrency
//! - Listing-page parsing (thread rows and pagination)
//! - Thread detail-page text extraction
//! - Overall crawl coordination

mod coordinator;
mod detail;
mod fetcher;
mod listing;

pub use coordinator::{run_sweep, CrawlSummary, Crawler};
pub use detail::{extract_mention_text, fetch_mention_text};
pub use fetcher::{build_http_client, FetchOutcome, Fetcher};
pub use listing::{parse_listing, ListingPage, ThreadRow};
