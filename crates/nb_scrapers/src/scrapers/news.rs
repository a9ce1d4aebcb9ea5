use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use nb_core::{sanitize_input, ArticleRecord, NewsSource, Result};
use tracing::{debug, info, warn};
use super::build_client;

pub const NEWS_API_URL: &str = "https://newsapi.org/v2/everything";

/// Recent articles from NewsAPI's `everything` search.
#[derive(Clone)]
pub struct NewsApiScraper {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl NewsApiScraper {
    pub fn new(api_key: Option<String>, timeout: Duration) -> Result<Self> {
        Ok(Self::with_client(build_client(timeout)?, api_key))
    }

    pub fn with_client(client: Client, api_key: Option<String>) -> Self {
        Self {
            client,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            base_url: NEWS_API_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn request(&self, api_key: &str, query: &str, max_articles: usize) -> reqwest::Result<Value> {
        let page_size = max_articles.to_string();
        self.client
            .get(&self.base_url)
            .query(&[
                ("q", query),
                ("apiKey", api_key),
                ("pageSize", page_size.as_str()),
                ("language", "en"),
                ("sortBy", "publishedAt"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await
    }
}

impl std::fmt::Debug for NewsApiScraper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewsApiScraper")
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .finish()
    }
}

fn field(article: &Value, name: &str) -> String {
    article
        .get(name)
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string()
}

/// Articles from a NewsAPI response body, or nothing if the body reports a problem.
pub fn parse_news_response(body: &Value) -> Vec<ArticleRecord> {
    let status = body.get("status").and_then(|s| s.as_str()).unwrap_or_default();
    if status != "ok" {
        let message = body
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("Unknown error");
        warn!("⚠️ News API error: {}", message);
        return Vec::new();
    }

    let articles = match body.get("articles") {
        None => return Vec::new(),
        Some(Value::Array(articles)) => articles,
        Some(_) => {
            warn!("⚠️ Unexpected news API response format");
            return Vec::new();
        }
    };

    articles
        .iter()
        .map(|article| ArticleRecord {
            title: field(article, "title"),
            description: field(article, "description"),
            url: field(article, "url"),
        })
        .collect()
}

#[async_trait]
impl NewsSource for NewsApiScraper {
    fn name(&self) -> &str {
        "NewsAPI"
    }

    async fn fetch_news(&self, query: &str, max_articles: usize) -> Vec<ArticleRecord> {
        let query = sanitize_input(query);
        if query.is_empty() {
            debug!("No industry keyword provided for news search");
            return Vec::new();
        }
        let Some(api_key) = self.api_key.as_deref() else {
            debug!("No news API key configured, skipping news search");
            return Vec::new();
        };

        info!("📰 Fetching latest news for {:?}", query);
        match self.request(api_key, &query, max_articles).await {
            Ok(body) => {
                let articles = parse_news_response(&body);
                info!("✅ Found {} recent articles", articles.len());
                articles
            }
            Err(e) if e.is_timeout() => {
                warn!("⚠️ News request timed out, continuing without news");
                Vec::new()
            }
            Err(e) => {
                warn!("⚠️ Error fetching news: {}", e);
                Vec::new()
            }
        }
    }
}
