use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use scraper::Html;
use nb_core::{is_valid_url, Error, PageScraper, Result};
use tracing::{debug, info};
use super::{build_client, utils};

/// Longest excerpt handed on to the brief
pub const MAX_CONTENT_LENGTH: usize = 5000;

/// Structural blocks shorter than this are navigation noise
const MIN_BLOCK_LENGTH: usize = 50;

/// Fetches a company page and reduces it to readable text.
#[derive(Debug, Clone)]
pub struct WebsiteScraper {
    client: Client,
}

impl WebsiteScraper {
    pub fn new(timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
        })
    }

    /// Reuse an existing client; it should carry its own timeout.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    async fn fetch_html(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(fetch_error)?;
        response.text().await.map_err(fetch_error)
    }
}

fn fetch_error(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::Timeout("Website request timed out".to_string())
    } else {
        Error::Fetch(format!("Error fetching website: {}", err))
    }
}

/// Headings, then paragraphs, then substantial main/article/section blocks,
/// flattened to a single line and capped at [`MAX_CONTENT_LENGTH`] characters.
pub fn extract_content(html: &str) -> Result<String> {
    let document = Html::parse_document(html);
    let mut fragments: Vec<String> = Vec::new();

    for css in ["h1, h2, h3", "p"] {
        let selector = utils::selector(css)?;
        fragments.extend(
            document
                .select(&selector)
                .map(|el| utils::visible_text(el).trim().to_string())
                .filter(|text| !text.is_empty()),
        );
    }

    let blocks = utils::selector("main, article, section")?;
    fragments.extend(
        document
            .select(&blocks)
            .map(|el| utils::visible_text(el).trim().to_string())
            .filter(|text| text.chars().count() > MIN_BLOCK_LENGTH),
    );

    let content = utils::collapse_whitespace(&fragments.join(" "));
    Ok(utils::truncate_chars(&content, MAX_CONTENT_LENGTH))
}

#[async_trait]
impl PageScraper for WebsiteScraper {
    fn name(&self) -> &str {
        "website"
    }

    async fn extract(&self, url: &str) -> Result<String> {
        if !is_valid_url(url) {
            return Err(Error::InvalidInput("Invalid URL provided".to_string()));
        }

        info!("🔍 Scraping website content from {}", url.trim());
        let html = self.fetch_html(url.trim()).await?;
        let content = extract_content(&html)?;
        debug!("✅ Extracted {} characters of content", content.chars().count());
        Ok(content)
    }
}
