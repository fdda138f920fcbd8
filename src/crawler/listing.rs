//! Listing-page parser
//!
//! Extracts per-thread summary fields and the pagination link from a forum
//! search-results page (Invision Community markup).

use scraper::{ElementRef, Html, Selector};

/// Thread-title anchors; the anchor text is the title, its href the thread URL
const THREAD_TITLES: &str = "h2.ipsType_reset.ipsStreamItem_title.ipsContained_container a";
/// Topic anchors, one per stream item status line
const TOPIC_LINKS: &str = "p.ipsType_reset.ipsStreamItem_status.ipsType_blendLinks a:last-of-type";
/// Author-name anchors
const AUTHOR_NAMES: &str = "a.ipsType_break";
/// Post-date elements; the site puts the full timestamp in the title attribute
const POST_DATES: &str = "ul.ipsList_inline.ipsStreamItem_meta li time";
/// Author profile-photo anchors
const AUTHOR_PROFILES: &str = "a.ipsUserPhoto.ipsUserPhoto_mini";
/// The "next page" anchor inside the pagination control
const NEXT_PAGE: &str = "li.ipsPagination_next a";

/// Summary fields of one thread as listed on a search-results page
///
/// Everything except `mention_text` of the final record; that comes from the
/// thread's own page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThreadRow {
    pub thread_title: String,
    pub thread_url: String,
    pub topic_title: String,
    pub author_name: String,
    pub post_date: String,
    pub author_profile_link: String,
}

/// Everything extracted from one listing page
#[derive(Debug, Clone)]
pub struct ListingPage {
    /// Threads in document order
    pub rows: Vec<ThreadRow>,
    /// Absolute URL of the next listing page, absent at the end of pagination
    pub next_page_url: Option<String>,
}

/// Parses a listing page into thread rows and the next-page link
///
/// Rows are built positionally: row i pairs the i-th element of each field
/// list. A list that is shorter than the title list contributes an empty
/// string from its end onward; the site markup does not carry a per-thread
/// grouping that would allow re-pairing, so short lists shift later pairings
/// rather than failing. The title list alone determines the row count.
pub fn parse_listing(html: &str) -> ListingPage {
    let document = Html::parse_document(html);

    let titles = select_all(&document, THREAD_TITLES);
    let topics = select_all(&document, TOPIC_LINKS);
    let authors = select_all(&document, AUTHOR_NAMES);
    let dates = select_all(&document, POST_DATES);
    let profiles = select_all(&document, AUTHOR_PROFILES);

    let mut rows = Vec::with_capacity(titles.len());
    for (i, title) in titles.iter().enumerate() {
        rows.push(ThreadRow {
            thread_title: element_text(title),
            thread_url: attr_or_empty(title, "href"),
            topic_title: topics.get(i).map(element_text).unwrap_or_default(),
            author_name: authors.get(i).map(element_text).unwrap_or_default(),
            post_date: dates
                .get(i)
                .map(|e| attr_or_empty(e, "title"))
                .unwrap_or_default(),
            author_profile_link: profiles
                .get(i)
                .map(|e| attr_or_empty(e, "href"))
                .unwrap_or_default(),
        });
    }

    ListingPage {
        rows,
        next_page_url: find_next_page(&document),
    }
}

/// Locates the next-page link, if the pagination control still has one
fn find_next_page(document: &Html) -> Option<String> {
    let selector = Selector::parse(NEXT_PAGE).ok()?;
    document
        .select(&selector)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(|href| href.trim().to_string())
        .filter(|href| !href.is_empty())
}

/// Collects all elements matched by a fixed selector, in document order
fn select_all<'a>(document: &'a Html, css: &str) -> Vec<ElementRef<'a>> {
    match Selector::parse(css) {
        Ok(selector) => document.select(&selector).collect(),
        Err(_) => Vec::new(),
    }
}

fn element_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn attr_or_empty(element: &ElementRef, name: &str) -> String {
    element
        .value()
        .attr(name)
        .map(|v| v.trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream_item(title: &str, url: &str, topic: &str, author: &str, date: &str, profile: &str) -> String {
        format!(
            r#"<div class="ipsStreamItem">
                <a class="ipsUserPhoto ipsUserPhoto_mini" href="{profile}"></a>
                <h2 class="ipsType_reset ipsStreamItem_title ipsContained_container">
                    <a href="{url}">{title}</a>
                </h2>
                <p class="ipsType_reset ipsStreamItem_status ipsType_blendLinks">
                    In <a href="/forum/12-general/">{topic}</a>
                </p>
                <a class="ipsType_break" href="/profile/">{author}</a>
                <ul class="ipsList_inline ipsStreamItem_meta">
                    <li><time title="{date}" datetime="2023-01-12T14:02:00Z">el 12</time></li>
                </ul>
            </div>"#
        )
    }

    fn page(items: &[String], next: Option<&str>) -> String {
        let pagination = match next {
            Some(href) => format!(
                r#"<ul class="ipsPagination"><li class="ipsPagination_next"><a href="{href}">Next</a></li></ul>"#
            ),
            None => String::new(),
        };
        format!(
            "<html><body>{}{}</body></html>",
            items.join("\n"),
            pagination
        )
    }

    #[test]
    fn test_parses_aligned_rows() {
        let html = page(
            &[
                stream_item("Model 3 range", "/topic/1/", "Model 3", "alice", "12/01/2023 14:02", "/profile/1-alice/"),
                stream_item("Charging at home", "/topic/2/", "Charging", "bob", "13/01/2023 09:30", "/profile/2-bob/"),
            ],
            Some("/search/?page=2"),
        );

        let listing = parse_listing(&html);
        assert_eq!(listing.rows.len(), 2);
        assert_eq!(listing.rows[0].thread_title, "Model 3 range");
        assert_eq!(listing.rows[0].thread_url, "/topic/1/");
        assert_eq!(listing.rows[0].topic_title, "Model 3");
        assert_eq!(listing.rows[0].author_name, "alice");
        assert_eq!(listing.rows[0].post_date, "12/01/2023 14:02");
        assert_eq!(listing.rows[0].author_profile_link, "/profile/1-alice/");
        assert_eq!(listing.rows[1].author_name, "bob");
        assert_eq!(listing.next_page_url.as_deref(), Some("/search/?page=2"));
    }

    #[test]
    fn test_short_field_list_degrades_to_empty() {
        // Three threads, but the second stream item carries no topic anchor:
        // [3 titles, 2 topics, 3 authors, 3 dates, 3 profiles]
        let mut items = vec![
            stream_item("A", "/topic/1/", "Topic A", "alice", "d1", "/p/1/"),
        ];
        // Item without the status paragraph
        items.push(format!(
            r#"<div class="ipsStreamItem">
                <a class="ipsUserPhoto ipsUserPhoto_mini" href="/p/2/"></a>
                <h2 class="ipsType_reset ipsStreamItem_title ipsContained_container">
                    <a href="/topic/2/">B</a>
                </h2>
                <a class="ipsType_break" href="/profile/">bob</a>
                <ul class="ipsList_inline ipsStreamItem_meta">
                    <li><time title="d2">el</time></li>
                </ul>
            </div>"#
        ));
        items.push(stream_item("C", "/topic/3/", "Topic C", "carol", "d3", "/p/3/"));

        let listing = parse_listing(&page(&items, None));
        assert_eq!(listing.rows.len(), 3);
        // Positional pairing shifts: row 1 takes item 3's topic, row 2 gets none
        assert_eq!(listing.rows[0].topic_title, "Topic A");
        assert_eq!(listing.rows[1].topic_title, "Topic C");
        assert_eq!(listing.rows[2].topic_title, "");
        // The other lists stay aligned
        assert_eq!(listing.rows[2].author_name, "carol");
        assert_eq!(listing.rows[2].post_date, "d3");
    }

    #[test]
    fn test_no_next_page_link() {
        let html = page(
            &[stream_item("A", "/topic/1/", "T", "a", "d", "/p/")],
            None,
        );
        let listing = parse_listing(&html);
        assert!(listing.next_page_url.is_none());
    }

    #[test]
    fn test_empty_page_yields_no_rows() {
        let listing = parse_listing("<html><body></body></html>");
        assert!(listing.rows.is_empty());
        assert!(listing.next_page_url.is_none());
    }

    #[test]
    fn test_title_anchor_without_href() {
        let html = page(
            &[r#"<h2 class="ipsType_reset ipsStreamItem_title ipsContained_container"><a>No link</a></h2>"#.to_string()],
            None,
        );
        let listing = parse_listing(&html);
        assert_eq!(listing.rows.len(), 1);
        assert_eq!(listing.rows[0].thread_title, "No link");
        assert_eq!(listing.rows[0].thread_url, "");
    }

    #[test]
    fn test_post_date_read_from_title_attribute() {
        let html = page(
            &[stream_item("A", "/topic/1/", "T", "a", "12/01/2023 14:02", "/p/")],
            None,
        );
        let listing = parse_listing(&html);
        // The visible element text is ignored; only the title attribute counts
        assert_eq!(listing.rows[0].post_date, "12/01/2023 14:02");
    }
}
