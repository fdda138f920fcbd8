//! Thread detail-page fetching and text extraction
//!
//! A thread's "mention text" is the concatenation of all paragraph text
//! inside the comment-content region of its page. Failures at this boundary
//! degrade to an empty string; a thread with no readable body still produces
//! a record.

use crate::crawler::fetcher::Fetcher;
use scraper::{Html, Selector};

/// Paragraphs inside the post body container
const COMMENT_PARAGRAPHS: &str = r#"div[data-role="commentContent"] p"#;

/// Extracts the mention text from a thread page
///
/// Non-empty paragraphs are trimmed and joined with a single space. A page
/// without matching paragraphs yields the empty string.
pub fn extract_mention_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let selector = match Selector::parse(COMMENT_PARAGRAPHS) {
        Ok(selector) => selector,
        Err(_) => return String::new(),
    };

    document
        .select(&selector)
        .map(|p| p.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Fetches a thread page and extracts its mention text
///
/// Never fails: an unfetchable page, an empty URL (a listing row whose title
/// anchor carried no href), or a page without comment paragraphs all yield
/// the empty string.
pub async fn fetch_mention_text(fetcher: &Fetcher, thread_url: &str) -> String {
    if thread_url.is_empty() {
        return String::new();
    }

    match fetcher.fetch(thread_url).await.into_body() {
        Some(body) => extract_mention_text(&body),
        None => {
            tracing::warn!("Could not fetch thread page {}, leaving mention text empty", thread_url);
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joins_paragraphs_with_single_space() {
        let html = r#"
            <div data-role="commentContent">
                <p>  First paragraph.  </p>
                <p>Second paragraph.</p>
            </div>
        "#;
        assert_eq!(
            extract_mention_text(html),
            "First paragraph. Second paragraph."
        );
    }

    #[test]
    fn test_skips_empty_paragraphs() {
        let html = r#"
            <div data-role="commentContent">
                <p>Body text</p>
                <p>   </p>
                <p></p>
            </div>
        "#;
        assert_eq!(extract_mention_text(html), "Body text");
    }

    #[test]
    fn test_no_matching_region_yields_empty() {
        let html = "<html><body><p>Outside the comment region</p></body></html>";
        assert_eq!(extract_mention_text(html), "");
    }

    #[test]
    fn test_collects_across_multiple_comments() {
        let html = r#"
            <div data-role="commentContent"><p>First post.</p></div>
            <div data-role="commentContent"><p>A reply.</p></div>
        "#;
        assert_eq!(extract_mention_text(html), "First post. A reply.");
    }

    #[test]
    fn test_nested_markup_flattens_to_text() {
        let html = r#"
            <div data-role="commentContent">
                <p>My <strong>Model 3</strong> arrived <a href="/x">today</a>.</p>
            </div>
        "#;
        assert_eq!(extract_mention_text(html), "My Model 3 arrived today.");
    }
}
