//! Web scraping module for content extraction.
//!
//! Uses reqwest for fetching and scraper for HTML parsing.

use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;
use thiserror::Error;

/// Timeout for page fetches
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Fragments shorter than this are treated as navigation noise
const MIN_FRAGMENT_LEN: usize = 20;

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("failed to fetch URL: {0}")]
    FetchError(#[from] reqwest::Error),
    #[error("no content found at URL")]
    NoContent,
}

/// Extracted content from a webpage
#[derive(Debug, Clone)]
pub struct WebContent {
    /// The original URL
    pub url: String,
    /// Page title
    pub title: Option<String>,
    /// Main text content
    pub text: String,
}

/// Create the HTTP client used for page fetches
pub fn build_client(user_agent: &str) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(REQUEST_TIMEOUT)
        .build()
}

/// Fetch a URL and extract its readable content.
///
/// Non-2xx responses and network failures surface as [`ScraperError::FetchError`];
/// a page with no extractable text is [`ScraperError::NoContent`].
pub async fn fetch_content(client: &Client, url: &str) -> Result<WebContent, ScraperError> {
    let response = client.get(url).send().await?.error_for_status()?;
    let html = response.text().await?;

    let (title, text) = extract_page(&html);

    if text.trim().is_empty() {
        return Err(ScraperError::NoContent);
    }

    Ok(WebContent {
        url: url.to_string(),
        title,
        text,
    })
}

/// Parse an HTML document into a title and its readable text
fn extract_page(html: &str) -> (Option<String>, String) {
    let document = Html::parse_document(html);
    (extract_title(&document), extract_text(&document))
}

/// Extract the page title from <title> or <h1>
fn extract_title(document: &Html) -> Option<String> {
    for selector_str in ["title", "h1"] {
        let selector = Selector::parse(selector_str).unwrap();
        if let Some(element) = document.select(&selector).next() {
            let title: String = element.text().collect();
            if !title.trim().is_empty() {
                return Some(title.trim().to_string());
            }
        }
    }
    None
}

/// Extract readable text content from the page
fn extract_text(document: &Html) -> String {
    // Prefer a dedicated content container when the page has one
    let main_selectors = ["article", "main", "[role='main']", ".content", "#content"];

    for selector_str in main_selectors {
        if let Ok(selector) = Selector::parse(selector_str) {
            if let Some(element) = document.select(&selector).next() {
                let text = harvest_text(&Html::parse_fragment(&element.html()));
                if !text.trim().is_empty() {
                    return text;
                }
            }
        }
    }

    // Fall back to harvesting the whole document
    harvest_text(document)
}

/// Collect paragraph, heading, and list-item text, normalizing whitespace
fn harvest_text(document: &Html) -> String {
    let content_selector = Selector::parse("p, h1, h2, h3, h4, h5, h6, li").unwrap();

    let mut paragraphs: Vec<String> = Vec::new();

    for element in document.select(&content_selector) {
        let text: String = element.text().collect::<Vec<_>>().join(" ");
        let cleaned = text.split_whitespace().collect::<Vec<_>>().join(" ");

        if cleaned.len() > MIN_FRAGMENT_LEN {
            paragraphs.push(cleaned);
        }
    }

    paragraphs.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARTICLE_PAGE: &str = r#"
        <html>
          <head><title>Test Page</title></head>
          <body>
            <nav><li>Home</li><li>About</li></nav>
            <article>
              <h2>A heading that is long enough to keep</h2>
              <p>The first paragraph carries the argument of the page.</p>
              <p>The second paragraph adds supporting detail to it.</p>
            </article>
          </body>
        </html>"#;

    #[test]
    fn title_comes_from_title_tag() {
        let (title, _) = extract_page(ARTICLE_PAGE);
        assert_eq!(title.as_deref(), Some("Test Page"));
    }

    #[test]
    fn title_falls_back_to_h1() {
        let html = "<html><body><h1>Only Heading Here</h1>\
                    <p>Some paragraph that is long enough.</p></body></html>";
        let (title, _) = extract_page(html);
        assert_eq!(title.as_deref(), Some("Only Heading Here"));
    }

    #[test]
    fn article_container_wins_over_navigation() {
        let (_, text) = extract_page(ARTICLE_PAGE);
        assert!(text.contains("first paragraph carries the argument"));
        assert!(!text.contains("Home"));
    }

    #[test]
    fn short_fragments_are_dropped() {
        let html = "<html><body><p>tiny</p>\
                    <p>A paragraph comfortably above the noise threshold.</p></body></html>";
        let (_, text) = extract_page(html);
        assert!(!text.contains("tiny"));
        assert!(text.contains("noise threshold"));
    }

    #[test]
    fn whitespace_is_normalized() {
        let html = "<html><body><p>spread    out \n\n   across     lines of text</p></body></html>";
        let (_, text) = extract_page(html);
        assert_eq!(text, "spread out across lines of text");
    }

    #[test]
    fn empty_page_extracts_nothing() {
        let (title, text) = extract_page("<html><body></body></html>");
        assert!(title.is_none());
        assert!(text.is_empty());
    }
}
