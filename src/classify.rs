//! URL detection for the dispatch branch.
//!
//! A pure predicate with no side effects: the input either contains a
//! fetchable web address or it is treated as a follow-up question.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Scheme, one or more dotted host labels, an alphabetic TLD, an optional
    // port, and an optional path/query/fragment tail up to the next
    // whitespace.
    static ref URL_RE: Regex =
        Regex::new(r"(?i)\bhttps?://(?:[a-z0-9-]+\.)+[a-z]{2,}(?::\d{1,5})?(?:[/?#]\S*)?")
            .unwrap();
}

/// Extract the first web address in the input, if any.
///
/// The match is a substring, so a URL embedded in surrounding prose is still
/// found. Malformed input never errors, it simply yields `None`.
pub fn find_url(input: &str) -> Option<&str> {
    URL_RE.find(input.trim()).map(|m| m.as_str())
}

/// True when the input contains a fetchable web address.
pub fn is_url(input: &str) -> bool {
    find_url(input).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_urls_match() {
        assert!(is_url("https://example.com"));
        assert!(is_url("http://example.com/path?q=1#frag"));
        assert!(is_url("HTTPS://EXAMPLE.COM/Page"));
    }

    #[test]
    fn questions_and_plain_text_do_not_match() {
        assert!(!is_url("What is the main argument?"));
        assert!(!is_url(""));
        assert!(!is_url("   "));
    }

    #[test]
    fn missing_scheme_does_not_match() {
        assert!(!is_url("www.example.com"));
        assert!(!is_url("example.com/article"));
    }

    #[test]
    fn non_http_schemes_do_not_match() {
        assert!(!is_url("ftp://example.com/file"));
    }

    #[test]
    fn ip_literal_hosts_do_not_match() {
        // The TLD must be alphabetic
        assert!(!is_url("http://192.168.0.1/admin"));
    }

    #[test]
    fn explicit_ports_are_part_of_the_match() {
        assert_eq!(
            find_url("try http://staging.example.com:8080/docs now"),
            Some("http://staging.example.com:8080/docs")
        );
    }

    #[test]
    fn url_is_extracted_from_surrounding_prose() {
        assert_eq!(
            find_url("please summarize https://example.com/article for me"),
            Some("https://example.com/article")
        );
    }

    #[test]
    fn trailing_sentence_punctuation_after_host_is_excluded() {
        assert_eq!(
            find_url("Have a look at https://example.com."),
            Some("https://example.com")
        );
    }

    #[test]
    fn trailing_punctuation_inside_a_path_is_kept() {
        // Once a path starts, everything up to whitespace belongs to the URL
        assert_eq!(
            find_url("see https://example.com/a."),
            Some("https://example.com/a.")
        );
    }

    #[test]
    fn input_is_trimmed_before_matching() {
        assert_eq!(
            find_url("  https://example.com  "),
            Some("https://example.com")
        );
    }
}
