use std::time::Duration;
use reqwest::Client;
use nb_core::Result;

pub mod news;
pub mod website;

pub use news::NewsApiScraper;
pub use website::WebsiteScraper;

pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

pub fn build_client(timeout: Duration) -> Result<Client> {
    Ok(Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()?)
}

/// Common utilities for scrapers
pub(crate) mod utils {
    use nb_core::{Error, Result};
    use scraper::node::Node;
    use scraper::{ElementRef, Selector};

    pub fn selector(css: &str) -> Result<Selector> {
        Selector::parse(css).map_err(|e| Error::Parse(format!("Invalid selector {}: {:?}", css, e)))
    }

    /// Text of `element` and its descendants, skipping script and style subtrees.
    pub fn visible_text(element: ElementRef) -> String {
        let mut out = String::new();
        collect_text(element, &mut out);
        out
    }

    fn collect_text(element: ElementRef, out: &mut String) {
        for child in element.children() {
            match child.value() {
                Node::Text(text) => out.push_str(text),
                Node::Element(el) if matches!(el.name(), "script" | "style") => {}
                Node::Element(_) => {
                    if let Some(child) = ElementRef::wrap(child) {
                        collect_text(child, out);
                    }
                }
                _ => {}
            }
        }
    }

    pub fn collapse_whitespace(text: &str) -> String {
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    pub fn truncate_chars(text: &str, max: usize) -> String {
        match text.char_indices().nth(max) {
            Some((index, _)) => text[..index].to_string(),
            None => text.to_string(),
        }
    }
}
