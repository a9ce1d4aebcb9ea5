use async_trait::async_trait;
use crate::types::ArticleRecord;
use crate::Result;

/// Turns a web page into a bounded plain-text excerpt.
#[async_trait]
pub trait PageScraper: Send + Sync {
    fn name(&self) -> &str;

    /// Fetches `url` and returns the cleaned text, or an error describing why it could not.
    async fn extract(&self, url: &str) -> Result<String>;
}

/// Searches a news service for recent articles about a topic.
///
/// Implementations never fail: any problem with the service reads as "no news found".
#[async_trait]
pub trait NewsSource: Send + Sync {
    fn name(&self) -> &str;

    async fn fetch_news(&self, query: &str, max_articles: usize) -> Vec<ArticleRecord>;
}
