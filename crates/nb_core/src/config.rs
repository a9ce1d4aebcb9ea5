use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_STORE_PATH: &str = "networking_memory.json";
pub const DEFAULT_MODEL_NAME: &str = "gemini-1.5-flash";
pub const DEFAULT_MAX_ARTICLES: usize = 5;
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Everything the research pipeline needs to know about its environment.
#[derive(Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub news_api_key: Option<String>,
    pub model_name: String,
    pub store_path: PathBuf,
    pub request_timeout: Duration,
    pub max_articles: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            news_api_key: None,
            model_name: DEFAULT_MODEL_NAME.to_string(),
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            request_timeout: REQUEST_TIMEOUT,
            max_articles: DEFAULT_MAX_ARTICLES,
        }
    }
}

impl Config {
    /// Defaults overridden by `GEMINI_API_KEY`, `NEWS_API_KEY`, `NETBRIEF_MODEL` and `NETBRIEF_STORE`.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.gemini_api_key = non_empty_var("GEMINI_API_KEY");
        config.news_api_key = non_empty_var("NEWS_API_KEY");
        if let Some(model) = non_empty_var("NETBRIEF_MODEL") {
            config.model_name = model;
        }
        if let Some(path) = non_empty_var("NETBRIEF_STORE") {
            config.store_path = PathBuf::from(path);
        }
        config
    }

    pub fn with_gemini_api_key(mut self, key: Option<String>) -> Self {
        self.gemini_api_key = key.filter(|k| !k.trim().is_empty());
        self
    }

    pub fn with_news_api_key(mut self, key: Option<String>) -> Self {
        self.news_api_key = key.filter(|k| !k.trim().is_empty());
        self
    }

    pub fn with_store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.store_path = path.into();
        self
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("gemini_api_key", &self.gemini_api_key.as_deref().map(|_| "<redacted>"))
            .field("news_api_key", &self.news_api_key.as_deref().map(|_| "<redacted>"))
            .field("model_name", &self.model_name)
            .field("store_path", &self.store_path)
            .field("request_timeout", &self.request_timeout)
            .field("max_articles", &self.max_articles)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.store_path, PathBuf::from("networking_memory.json"));
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.max_articles, 5);
        assert!(config.gemini_api_key.is_none());
    }

    #[test]
    fn test_debug_redacts_keys() {
        let config = Config::default()
            .with_gemini_api_key(Some("secret-gemini".to_string()))
            .with_news_api_key(Some("secret-news".to_string()));
        let debug = format!("{:?}", config);
        assert!(!debug.contains("secret-gemini"));
        assert!(!debug.contains("secret-news"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_blank_keys_are_ignored() {
        let config = Config::default().with_news_api_key(Some("  ".to_string()));
        assert!(config.news_api_key.is_none());
    }
}
