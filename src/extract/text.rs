// src/extract/text.rs
// =============================================================================
// Small text helpers shared by the extractors.
//
// Two flavors of "text of an element" are needed:
// - lines(): every text node, split on newlines, trimmed, blanks dropped.
//   Used for the free-form details cell.
// - cell_text(): trimmed text nodes glued together with no separator.
//   Used for table cells, where markup like <abbr> splits one value.
// =============================================================================

use regex::Regex;
use scraper::{ElementRef, Selector};

/// Builds a selector from a constant CSS string.
///
/// All selectors in this crate are literals, so a parse failure is a
/// programmer error and panics.
pub fn selector(css: &'static str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid selector {:?}: {:?}", css, e))
}

/// Same contract as selector(), for line patterns.
pub fn pattern(re: &'static str) -> Regex {
    Regex::new(re).unwrap_or_else(|e| panic!("invalid pattern {:?}: {}", re, e))
}

pub fn lines(element: ElementRef) -> Vec<String> {
    element
        .text()
        .flat_map(|chunk| chunk.split('\n'))
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn cell_text(element: ElementRef) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .collect()
}
