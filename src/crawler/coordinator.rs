//! Crawl coordinator - main crawl loop
//!
//! Drives the listing pagination from the seed URL: fetch a listing page,
//! parse its thread rows, fetch every thread's detail page for mention text,
//! write one CSV record per thread, then follow the "next page" link. The
//! loop stops at the end of pagination, on a repeated listing URL, at the
//! page ceiling, or when a listing page cannot be fetched.

use crate::config::Config;
use crate::crawler::detail::fetch_mention_text;
use crate::crawler::fetcher::Fetcher;
use crate::crawler::listing::{parse_listing, ThreadRow};
use crate::output::{CsvSink, ThreadRecord};
use crate::state::{CrawlState, StopReason};
use crate::SweepError;
use std::path::Path;
use url::Url;

/// Result of a completed crawl run
#[derive(Debug, Clone, Copy)]
pub struct CrawlSummary {
    /// Listing pages processed
    pub pages: u32,
    /// Thread records written
    pub records: u64,
    /// Why the loop stopped
    pub reason: StopReason,
}

/// Main crawl coordinator structure
///
/// Owns the fetch session, the output sink, and the run state. Construct one
/// per run; nothing is shared or persisted between runs.
pub struct Crawler {
    config: Config,
    fetcher: Fetcher,
    sink: CsvSink,
    state: CrawlState,
}

impl Crawler {
    /// Creates a new crawler, opening the output file
    ///
    /// The output file is truncated here, so even a run that fails on the
    /// first listing page leaves a header-only CSV behind.
    pub fn new(config: Config) -> Result<Self, SweepError> {
        let fetcher = Fetcher::new(&config.crawl, &config.identity)?;
        let sink = CsvSink::create(Path::new(&config.output.csv_path))?;

        Ok(Self {
            config,
            fetcher,
            sink,
            state: CrawlState::new(),
        })
    }

    /// Runs the crawl loop to completion
    pub async fn run(&mut self) -> Result<CrawlSummary, SweepError> {
        let mut url = self.config.crawl.seed_url.clone();

        let reason = loop {
            // Cycle guard: terminate at the second occurrence of a listing
            // URL without re-processing it
            if !self.state.mark_visited(&url) {
                tracing::warn!("Duplicate listing URL detected: {}", url);
                break StopReason::PageCycle;
            }

            tracing::info!("Scraping page {}...", self.state.page_number());

            let body = match self.fetcher.fetch(&url).await.into_body() {
                Some(body) => body,
                None => {
                    tracing::error!("Failed to fetch listing page {}", url);
                    break StopReason::ListingFetchFailed;
                }
            };

            let listing = parse_listing(&body);
            tracing::debug!(
                "Page {} listed {} threads",
                self.state.page_number(),
                listing.rows.len()
            );

            self.process_rows(&url, listing.rows).await?;

            url = match listing.next_page_url {
                Some(next) => resolve_next_url(&url, &next),
                None => {
                    tracing::info!("No more pages found, stopping");
                    break StopReason::EndOfPagination;
                }
            };

            if self.state.advance() > self.config.crawl.max_pages {
                tracing::info!(
                    "Reached maximum page limit ({}), stopping",
                    self.config.crawl.max_pages
                );
                break StopReason::PageLimit;
            }
        };

        let summary = CrawlSummary {
            pages: self.state.pages_visited(),
            records: self.sink.records_written(),
            reason,
        };
        tracing::info!(
            "Crawl finished ({}): {} pages, {} records",
            summary.reason,
            summary.pages,
            summary.records
        );
        Ok(summary)
    }

    /// Fetches detail pages for one listing's rows and writes their records
    ///
    /// Detail fetches run concurrently, bounded by the shared semaphore, but
    /// results are awaited and written in document order so CSV row order
    /// matches the site listing.
    async fn process_rows(
        &mut self,
        listing_url: &str,
        rows: Vec<ThreadRow>,
    ) -> Result<(), SweepError> {
        let mut handles = Vec::with_capacity(rows.len());
        for row in &rows {
            let fetcher = self.fetcher.clone();
            let thread_url = resolve_next_url(listing_url, &row.thread_url);
            handles.push(tokio::spawn(async move {
                fetch_mention_text(&fetcher, &thread_url).await
            }));
        }

        for (row, handle) in rows.into_iter().zip(handles) {
            // A panicked detail task degrades to an empty mention, the same
            // as any other detail failure
            let mention_text = handle.await.unwrap_or_default();
            self.sink.write(&ThreadRecord {
                thread_title: row.thread_title,
                topic_title: row.topic_title,
                author_name: row.author_name,
                post_date: row.post_date,
                mention_text,
                author_profile_link: row.author_profile_link,
            })?;
        }

        Ok(())
    }
}

/// Resolves a possibly relative link against the page it appeared on
///
/// The forum emits absolute pagination and thread links, but fixtures and
/// mirrored copies use relative ones; an unresolvable link passes through
/// unchanged and fails at fetch time instead.
fn resolve_next_url(base: &str, link: &str) -> String {
    if link.is_empty() {
        return String::new();
    }
    match Url::parse(base).and_then(|b| b.join(link)) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => link.to_string(),
    }
}

/// Runs a complete sweep with the given configuration
///
/// This is the main library entry point: it builds the crawler, runs the
/// loop, and returns the run summary.
pub async fn run_sweep(config: Config) -> Result<CrawlSummary, SweepError> {
    let mut crawler = Crawler::new(config)?;
    crawler.run().await
}
