//! Output module for persisting extracted thread records
//!
//! One CSV row is written per thread, in the order threads appear on their
//! listing page. The file is recreated at every run start.

mod csv_sink;

pub use csv_sink::CsvSink;

use serde::{Deserialize, Serialize};

/// One extracted forum thread, ready to be written as a CSV row
///
/// All fields are best-effort strings; a field whose source element was
/// missing on the listing page is the empty string, never an absent record.
/// Field order here fixes the CSV column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadRecord {
    pub thread_title: String,
    pub topic_title: String,
    pub author_name: String,
    /// Verbatim site-formatted timestamp from the listing's time element
    pub post_date: String,
    /// Concatenated post body text from the thread's detail page
    pub mention_text: String,
    pub author_profile_link: String,
}
