//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlState`: the per-run visited set and page counter
//! - `StopReason`: why the crawl loop terminated

mod crawl_state;
mod stop_reason;

// Re-export main types
pub use crawl_state::CrawlState;
pub use stop_reason::StopReason;
