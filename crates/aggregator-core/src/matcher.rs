//! Topic extraction from raw page markup.
//!
//! A reference is the text between a `>` and the next `<` that contains the
//! topic as a whole word. Matching is case-insensitive and may cross lines.
//! This is plain pattern matching over the page text, not an HTML parse.

use regex::Regex;

/// Compiled matcher for one topic. Build once per run, reuse for every page.
#[derive(Debug, Clone)]
pub struct TopicMatcher {
    topic: String,
    re: Regex,
}

impl TopicMatcher {
    /// Compiles the pattern for `topic`. The topic is escaped, so regex
    /// metacharacters in it are matched literally.
    pub fn new(topic: &str) -> Result<Self, regex::Error> {
        let pattern = format!(r"(?is)>([^<]*\b{}\b[^<]*)<", regex::escape(topic));
        let re = Regex::new(&pattern)?;
        Ok(Self {
            topic: topic.to_string(),
            re,
        })
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// All references in page order.
    pub fn matches<'p>(&self, page: &'p str) -> Vec<&'p str> {
        self.re
            .captures_iter(page)
            .filter_map(|c| c.get(1))
            .map(|m| m.as_str())
            .collect()
    }

    /// References joined by `\n`; empty string when there are none.
    pub fn find_references(&self, page: &str) -> String {
        self.matches(page).join("\n")
    }
}

/// One-shot form of [`TopicMatcher::find_references`].
pub fn find_references(page: &str, topic: &str) -> Result<String, regex::Error> {
    Ok(TopicMatcher::new(topic)?.find_references(page))
}
