use serde::Deserialize;

/// Seed URL of the search-results listing the crawl starts from
pub const DEFAULT_SEED_URL: &str =
    "https://forums.automobile-propre.com/search/?q=Tesla&updated_after=any&sortby=relevancy&search_in=titles";

/// Known page count of the reference deployment; the crawl never goes past it
pub const DEFAULT_MAX_PAGES: u32 = 176;

/// Main configuration structure for Mention-Sweep
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawl: CrawlConfig,
    pub output: OutputConfig,
    pub identity: IdentityConfig,
}

/// Crawl behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlConfig {
    /// Search-results listing URL the crawl starts from
    #[serde(rename = "seed-url")]
    pub seed_url: String,

    /// Safety ceiling on the number of listing pages visited
    #[serde(rename = "max-pages")]
    pub max_pages: u32,

    /// Maximum number of in-flight HTTP requests (listing and detail combined)
    #[serde(rename = "max-concurrent-fetches")]
    pub max_concurrent_fetches: u32,

    /// Maximum number of retries for a rate-limited (HTTP 429) URL
    #[serde(rename = "retry-limit")]
    pub retry_limit: u32,

    /// Base unit of the exponential backoff, in milliseconds.
    /// Retry n sleeps base * 2^n, so the default of 1000 gives 2,4,8,16,32 s.
    #[serde(rename = "backoff-base-ms")]
    pub backoff_base_ms: u64,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path of the CSV file; truncated and recreated at each run start
    #[serde(rename = "csv-path")]
    pub csv_path: String,
}

/// Request identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    /// Pool of User-Agent strings; one is chosen at random per request
    #[serde(rename = "user-agents")]
    pub user_agents: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            crawl: CrawlConfig::default(),
            output: OutputConfig::default(),
            identity: IdentityConfig::default(),
        }
    }
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            seed_url: DEFAULT_SEED_URL.to_string(),
            max_pages: DEFAULT_MAX_PAGES,
            max_concurrent_fetches: 5,
            retry_limit: 5,
            backoff_base_ms: 1000,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: "tesla_forum_data.csv".to_string(),
        }
    }
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            user_agents: vec![
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/115.0.0.0 Safari/537.36".to_string(),
                "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/115.0.0.0 Safari/537.36".to_string(),
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:91.0) Gecko/20100101 Firefox/91.0".to_string(),
                "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:91.0) Gecko/20100101 Firefox/91.0".to_string(),
            ],
        }
    }
}
