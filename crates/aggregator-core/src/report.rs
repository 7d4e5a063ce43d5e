//! Report block formatting.

use crate::matcher::TopicMatcher;

/// Line closing every report block.
pub const SEPARATOR: &str = "--------------------------------";

/// Formats the block for one URL, or returns an empty string when the page
/// has no reference to the topic.
///
/// Layout: `Source url:<url>\n<references>\n<SEPARATOR>\n\n`.
pub fn format_report(url: &str, page: &str, matcher: &TopicMatcher) -> String {
    let references = matcher.find_references(page);
    if references.is_empty() {
        return String::new();
    }
    format!("Source url:{}\n{}\n{}\n\n", url, references, SEPARATOR)
}

/// One-shot form of [`format_report`] that compiles the topic itself.
pub fn report_topic(url: &str, page: &str, topic: &str) -> Result<String, regex::Error> {
    Ok(format_report(url, page, &TopicMatcher::new(topic)?))
}
