//! Query parsing for the public feed and explore listings.

use crate::entity::PublicFilter;

/// Default number of notes returned by public listings.
pub const DEFAULT_LIMIT: usize = 20;
/// Upper bound on a caller-supplied listing limit.
pub const MAX_LIMIT: usize = 100;

/// Parse a raw search string into a [`PublicFilter`].
///
/// Tokens of the form `topic:<name>` select a topic; every other token is
/// kept, in order, as the free-text part.
///
/// # Examples
///
/// ```ignore
/// let filter = parse_query("topic:rust borrow checker");
/// assert_eq!(filter.text, Some("borrow checker".to_string()));
/// assert_eq!(filter.topic, Some("rust".to_string()));
/// ```
pub fn parse_query(raw: &str) -> PublicFilter {
    let mut filter = PublicFilter::default();
    let mut remaining = Vec::new();

    for token in raw.split_whitespace() {
        match token.strip_prefix("topic:") {
            Some(value) if !value.is_empty() => filter.topic = Some(value.to_string()),
            Some(_) => {}
            None => remaining.push(token),
        }
    }

    if !remaining.is_empty() {
        filter.text = Some(remaining.join(" "));
    }

    filter
}

/// Combine the `query` and `topic` request parameters. An explicit topic
/// parameter wins over a `topic:` token inside the query.
pub fn build_filter(query: Option<&str>, topic: Option<&str>) -> PublicFilter {
    let mut filter = query.map(parse_query).unwrap_or_default();

    if let Some(topic) = topic.map(str::trim).filter(|t| !t.is_empty()) {
        filter.topic = Some(topic.to_string());
    }

    filter
}

/// Clamp a requested limit into `1..=MAX_LIMIT`.
pub fn clamp_limit(limit: Option<usize>) -> usize {
    limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
}
