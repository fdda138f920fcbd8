use std::fmt;

/// Why the crawl loop terminated
///
/// Every run ends in exactly one of these states. The loop never resumes
/// after stopping; a failed run is restarted from the seed URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The listing page had no "next page" link (normal end of pagination)
    EndOfPagination,

    /// A listing URL was encountered a second time (self-referential or
    /// malformed pagination link)
    PageCycle,

    /// The page-count safety ceiling was reached
    PageLimit,

    /// The listing page itself could not be fetched
    ListingFetchFailed,
}

impl StopReason {
    /// Returns true when the run ended by exhausting the pagination rather
    /// than hitting a guard or a failure
    pub fn is_normal(&self) -> bool {
        matches!(self, Self::EndOfPagination)
    }

    /// Returns true when the run was cut short by a fetch failure
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::ListingFetchFailed)
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::EndOfPagination => "no more pages",
            Self::PageCycle => "duplicate listing URL",
            Self::PageLimit => "page limit reached",
            Self::ListingFetchFailed => "listing page fetch failed",
        };
        f.write_str(text)
    }
}
