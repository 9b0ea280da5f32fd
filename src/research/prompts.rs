//! Stage inputs handed to the searcher and writer

use crate::types::{SearchItem, SearchResult};
use std::fmt::Write;

/// Input for one searcher call
pub fn search_input(item: &SearchItem) -> String {
    format!(
        "Search the web for '{}', Reason for searching: {}",
        item.query, item.reason
    )
}

/// Input for the writer: the original query followed by every result as a
/// numbered block, in the order given.
pub fn writer_input(query: &str, results: &[SearchResult]) -> String {
    let mut input = format!("Original query: {}\n\nSummarized search results:\n", query);
    for (i, result) in results.iter().enumerate() {
        let _ = write!(
            input,
            "\n[{}] {}\n{}\n",
            i + 1,
            result.query,
            result.text.trim()
        );
    }
    input
}
