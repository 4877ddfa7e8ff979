use log::info;
use reqwest::{ Client as HttpClient, header::USER_AGENT };
use scraper::{ Html, Selector };
use std::error::Error as StdError;

pub const DEFAULT_SEARCH_BASE_URL: &str = "https://html.duckduckgo.com";

// Browser-like agent; the HTML endpoint rejects obvious bots.
const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
const MAX_RESULTS: usize = 5;

/// One parsed result block. Ephemeral: folded into a synthesized user
/// message and never persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchResult {
    pub title: String,
    pub snippet: String,
    pub url: String,
}

pub struct SearchClient {
    http: HttpClient,
    base_url: String,
}

impl SearchClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: HttpClient::new(),
            base_url: base_url.into(),
        }
    }

    /// One GET against the provider's HTML endpoint, parsed for up to five
    /// result triples. Network and parse problems surface as `Err`; the
    /// orchestrator folds them into the prompt as plain text.
    pub async fn search(
        &self,
        query: &str
    ) -> Result<Vec<SearchResult>, Box<dyn StdError + Send + Sync>> {
        let url = format!("{}/html/", self.base_url.trim_end_matches('/'));
        info!("Searching the web for: {}", query);

        let body = self.http
            .get(&url)
            .query(&[("q", query)])
            .header(USER_AGENT, BROWSER_USER_AGENT)
            .send().await?
            .error_for_status()?
            .text().await?;

        Ok(parse_results(&body))
    }
}

/// Extract (title, snippet, url) triples from the result markup in document
/// order. Containers missing either the title or the snippet are skipped
/// and do not count toward the cap.
pub fn parse_results(html: &str) -> Vec<SearchResult> {
    let document = Html::parse_document(html);
    let container_selector = Selector::parse("div.result").unwrap();
    let title_selector = Selector::parse("a.result__a").unwrap();
    let snippet_selector = Selector::parse("a.result__snippet").unwrap();

    let mut results = Vec::new();
    for container in document.select(&container_selector) {
        let title_elem = container.select(&title_selector).next();
        let snippet_elem = container.select(&snippet_selector).next();

        if let (Some(title), Some(snippet)) = (title_elem, snippet_elem) {
            results.push(SearchResult {
                title: title.text().collect::<String>().trim().to_string(),
                snippet: snippet.text().collect::<String>().trim().to_string(),
                url: title.value().attr("href").unwrap_or_default().to_string(),
            });
            if results.len() == MAX_RESULTS {
                break;
            }
        }
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_block(title: &str, snippet: &str, href: &str) -> String {
        format!(
            r#"<div class="result">
                 <a class="result__a" href="{href}">{title}</a>
                 <a class="result__snippet">{snippet}</a>
               </div>"#
        )
    }

    #[test]
    fn parses_result_triples_in_document_order() {
        let html = format!(
            "<html><body>{}{}</body></html>",
            result_block("Rust Language", "A systems language.", "https://rust-lang.org"),
            result_block("Crates.io", "The package registry.", "https://crates.io")
        );

        let results = parse_results(&html);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, "Rust Language");
        assert_eq!(results[0].snippet, "A systems language.");
        assert_eq!(results[0].url, "https://rust-lang.org");
        assert_eq!(results[1].title, "Crates.io");
    }

    #[test]
    fn caps_results_at_five() {
        let blocks: String = (0..8)
            .map(|i| result_block(&format!("Title {i}"), "snippet", "https://example.com"))
            .collect();
        let html = format!("<html><body>{blocks}</body></html>");

        let results = parse_results(&html);
        assert_eq!(results.len(), 5);
        assert_eq!(results[4].title, "Title 4");
    }

    #[test]
    fn skips_blocks_missing_title_or_snippet() {
        let html = format!(
            r#"<html><body>
                 <div class="result"><a class="result__a" href="https://a.example">No snippet</a></div>
                 <div class="result"><a class="result__snippet">No title</a></div>
                 {}
               </body></html>"#,
            result_block("Complete", "Has both.", "https://b.example")
        );

        let results = parse_results(&html);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Complete");
    }

    #[test]
    fn empty_page_yields_no_results() {
        assert!(parse_results("<html><body></body></html>").is_empty());
    }
}
