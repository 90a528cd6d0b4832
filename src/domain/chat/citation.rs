//! Removal of inline citation markers.
//!
//! File-search assistants annotate replies with markers such as
//! `【4:2†source】` pointing at retrieved passages. The chat UI has nowhere
//! to show them, so they are cut out before the reply leaves the server.

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

/// Lenticular brackets wrapping digits, colon, dagger, parentheses, word
/// characters, hyphens, periods and whitespace.
static CITATION_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"【[\d:†()\w\s\-.]+】").expect("citation marker pattern is valid")
});

/// Deletes every citation marker from `text`.
///
/// Markers are removed wholesale with no placeholder, and the surrounding
/// text is left exactly as it was (no whitespace is collapsed). Text without
/// markers is returned borrowed and unchanged.
pub fn strip_citations(text: &str) -> Cow<'_, str> {
    CITATION_MARKER.replace_all(text, "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn removes_marker_between_words() {
        assert_eq!(
            strip_citations("A schema is 【4:2†source】a logical grouping."),
            "A schema is a logical grouping."
        );
    }

    #[test]
    fn removes_multiple_markers() {
        let text = "Tables【1:0†tables.md】 and views【12:3†views (v2).pdf】.";
        assert_eq!(strip_citations(text), "Tables and views.");
    }

    #[test]
    fn leaves_text_without_markers_borrowed() {
        let text = "No citations here [1] (see docs).";
        let stripped = strip_citations(text);
        assert!(matches!(stripped, Cow::Borrowed(_)));
        assert_eq!(stripped, text);
    }

    #[test]
    fn keeps_brackets_with_disallowed_content() {
        // Commas are outside the marker alphabet.
        let text = "Keep 【a, b】 as is";
        assert_eq!(strip_citations(text), text);
    }

    #[test]
    fn keeps_empty_brackets() {
        assert_eq!(strip_citations("【】"), "【】");
    }

    fn marker() -> impl Strategy<Value = String> {
        (0u32..100, 0u32..100, "[A-Za-z0-9_.()-]{1,16}")
            .prop_map(|(doc, passage, source)| format!("【{doc}:{passage}†{source}】"))
    }

    proptest! {
        #[test]
        fn marker_free_text_is_unchanged(text in "[^【】]{0,64}") {
            prop_assert_eq!(strip_citations(&text), text.as_str());
        }

        #[test]
        fn marker_is_removed_and_neighbours_untouched(
            before in "[^【】]{0,32}",
            after in "[^【】]{0,32}",
            citation in marker(),
        ) {
            let text = format!("{before}{citation}{after}");
            let expected = format!("{before}{after}");
            prop_assert_eq!(strip_citations(&text), expected.as_str());
        }

        #[test]
        fn stripping_twice_equals_stripping_once(
            parts in proptest::collection::vec(("[^【】]{0,16}", marker()), 0..6),
        ) {
            let text: String = parts.iter().map(|(plain, m)| format!("{plain}{m}")).collect();
            let once = strip_citations(&text).into_owned();
            let twice = strip_citations(&once).into_owned();
            prop_assert_eq!(once, twice);
        }
    }
}
