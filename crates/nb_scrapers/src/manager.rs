use std::fmt;
use std::sync::Arc;
use nb_core::{
    Config, ContactInfo, ContactRecord, ContactStorage, Error, InferenceModel, NewsSource,
    PageScraper, Result,
};
use nb_inference::BriefGenerator;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use crate::logging::Logger;
use crate::scrapers::{build_client, NewsApiScraper, WebsiteScraper};

/// Links shown alongside a finished brief
pub const DISPLAYED_NEWS_LINKS: usize = 5;

/// Progress of one research run, in the order it happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResearchEvent {
    Started(String),
    Progress(String),
    Warning(String),
    Saved(usize),
    SaveFailed(String),
}

impl fmt::Display for ResearchEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResearchEvent::Started(name) => write!(f, "🚀 Starting research on {}...", name),
            ResearchEvent::Progress(message) => write!(f, "{}", message),
            ResearchEvent::Warning(message) => write!(f, "⚠️ {}", message),
            ResearchEvent::Saved(total) => write!(
                f,
                "🧠 Contact saved successfully! You now have {} contacts in your network.",
                total
            ),
            ResearchEvent::SaveFailed(reason) => write!(f, "❌ Failed to save contact: {}", reason),
        }
    }
}

/// What a research run produced. The record exists even when every source failed.
#[derive(Debug)]
pub struct ResearchOutcome {
    pub record: ContactRecord,
    pub warnings: Vec<String>,
    /// Number of stored contacts after the append, or why it failed
    pub saved: Result<usize>,
}

impl ResearchOutcome {
    pub fn is_saved(&self) -> bool {
        self.saved.is_ok()
    }

    /// The brief and its news links, formatted for display.
    pub fn report(&self) -> String {
        let mut report = format!(
            "📋 NETWORKING BRIEF FOR {}\n{}\n\n{}\n",
            self.record.name.to_uppercase(),
            "=".repeat(60),
            self.record.summary
        );
        if !self.record.news_links.is_empty() {
            report.push_str(&format!(
                "\n📰 Related News Articles ({}):\n",
                self.record.news_links.len()
            ));
            for (i, link) in self.record.news_links.iter().take(DISPLAYED_NEWS_LINKS).enumerate() {
                report.push_str(&format!("  {}. {}\n", i + 1, link));
            }
        }
        report
    }
}

/// A research run executing on its own task.
pub struct ResearchTask {
    pub events: UnboundedReceiver<ResearchEvent>,
    pub handle: JoinHandle<ResearchOutcome>,
}

impl ResearchTask {
    pub async fn finish(self) -> Result<ResearchOutcome> {
        self.handle
            .await
            .map_err(|e| Error::External(anyhow::anyhow!("research task failed: {}", e)))
    }
}

/// Sends events to whoever is listening and mirrors them to the log.
struct Reporter<'a> {
    events: Option<&'a UnboundedSender<ResearchEvent>>,
    logger: Logger,
    warnings: Vec<String>,
}

impl Reporter<'_> {
    fn emit(&mut self, event: ResearchEvent) {
        match &event {
            ResearchEvent::Warning(message) => {
                self.logger.warn(message);
                self.warnings.push(message.clone());
            }
            ResearchEvent::SaveFailed(_) => self.logger.error(&event.to_string()),
            _ => self.logger.info(&event.to_string()),
        }
        if let Some(events) = self.events {
            // A closed receiver only means nobody is watching any more.
            let _ = events.send(event);
        }
    }

    fn progress(&mut self, message: impl Into<String>) {
        self.emit(ResearchEvent::Progress(message.into()));
    }

    fn warning(&mut self, message: impl Into<String>) {
        self.emit(ResearchEvent::Warning(message.into()));
    }
}

/// Runs the research pipeline: website, news, brief, store.
pub struct ResearchManager {
    scraper: Arc<dyn PageScraper>,
    news: Arc<dyn NewsSource>,
    brief: BriefGenerator,
    storage: Arc<dyn ContactStorage>,
    max_articles: usize,
}

impl ResearchManager {
    pub fn new(
        scraper: Arc<dyn PageScraper>,
        news: Arc<dyn NewsSource>,
        brief: BriefGenerator,
        storage: Arc<dyn ContactStorage>,
    ) -> Self {
        Self {
            scraper,
            news,
            brief,
            storage,
            max_articles: nb_core::config::DEFAULT_MAX_ARTICLES,
        }
    }

    /// Wire the production scrapers from `config` around the given model and store.
    pub fn from_config(
        config: &Config,
        model: Option<Arc<dyn InferenceModel>>,
        storage: Arc<dyn ContactStorage>,
    ) -> Result<Self> {
        let client = build_client(config.request_timeout)?;
        let scraper = WebsiteScraper::with_client(client.clone());
        let news = NewsApiScraper::with_client(client, config.news_api_key.clone());
        Ok(Self::new(Arc::new(scraper), Arc::new(news), BriefGenerator::new(model), storage)
            .with_max_articles(config.max_articles))
    }

    pub fn with_max_articles(mut self, max_articles: usize) -> Self {
        self.max_articles = max_articles;
        self
    }

    pub fn storage(&self) -> &Arc<dyn ContactStorage> {
        &self.storage
    }

    /// Research `info` and append the result to the store.
    pub async fn research_and_save(&self, info: &ContactInfo) -> ResearchOutcome {
        self.run(info, None).await
    }

    /// Run the pipeline on a background task, streaming progress events.
    pub fn spawn(self: &Arc<Self>, info: ContactInfo) -> ResearchTask {
        let (tx, rx) = mpsc::unbounded_channel();
        let manager = Arc::clone(self);
        let handle = tokio::spawn(async move { manager.run(&info, Some(&tx)).await });
        ResearchTask { events: rx, handle }
    }

    async fn run(&self, info: &ContactInfo, events: Option<&UnboundedSender<ResearchEvent>>) -> ResearchOutcome {
        let mut reporter = Reporter {
            events,
            logger: Logger::new().with_prefix(format!("[{}]", info.name.trim())),
            warnings: Vec::new(),
        };
        reporter.emit(ResearchEvent::Started(info.name.trim().to_string()));

        let mut sections = Vec::new();
        if let Some(content) = self.collect_website(info, &mut reporter).await {
            sections.push(format!("Company Website Content:\n{}", content));
        }
        let (news_content, news_links) = self.collect_news(info, &mut reporter).await;
        if let Some(content) = news_content {
            sections.push(format!("Recent Industry News:\n{}", content));
        }

        reporter.progress("🤖 Generating AI networking brief...");
        let combined = sections.join("\n\n");
        let summary = self.brief.generate(&combined, info).await;

        let record = ContactRecord::from_info(info, summary, news_links);
        let saved = self.storage.append(&record).await;
        match &saved {
            Ok(total) => reporter.emit(ResearchEvent::Saved(*total)),
            Err(e) => reporter.emit(ResearchEvent::SaveFailed(e.to_string())),
        }

        ResearchOutcome {
            record,
            warnings: reporter.warnings,
            saved,
        }
    }

    async fn collect_website(&self, info: &ContactInfo, reporter: &mut Reporter<'_>) -> Option<String> {
        let website = info.website.trim();
        if website.is_empty() {
            return None;
        }

        reporter.progress("🌐 Analyzing company website...");
        match self.scraper.extract(website).await {
            Ok(content) if !content.is_empty() => {
                reporter.progress("✅ Website analysis complete");
                Some(content)
            }
            Ok(_) => {
                reporter.warning("No readable content found on the website");
                None
            }
            Err(e) => {
                reporter.warning(format!("Website scraping failed: {}", e));
                None
            }
        }
    }

    async fn collect_news(&self, info: &ContactInfo, reporter: &mut Reporter<'_>) -> (Option<String>, Vec<String>) {
        let industry = info.industry.trim();
        if industry.is_empty() {
            return (None, Vec::new());
        }

        reporter.progress("📰 Fetching industry news...");
        let articles = self.news.fetch_news(industry, self.max_articles).await;

        let mut lines = Vec::new();
        let mut links = Vec::new();
        for article in articles.iter().filter(|a| a.has_text()) {
            lines.push(format!("• {}: {}", article.title, article.description));
            if !article.url.trim().is_empty() {
                links.push(article.url.clone());
            }
        }

        if lines.is_empty() {
            reporter.progress("📭 No recent news found");
            return (None, links);
        }
        reporter.progress(format!("✅ Found {} news articles", lines.len()));
        (Some(lines.join("\n")), links)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use async_trait::async_trait;
    use nb_core::ArticleRecord;
    use nb_inference::brief::UNAVAILABLE_SUMMARY;
    use nb_inference::models::DummyModel;
    use nb_storage::InMemoryStorage;

    struct FakeScraper {
        result: fn() -> Result<String>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl PageScraper for FakeScraper {
        fn name(&self) -> &str {
            "fake"
        }

        async fn extract(&self, _url: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.result)()
        }
    }

    struct FakeNews {
        articles: Vec<ArticleRecord>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl NewsSource for FakeNews {
        fn name(&self) -> &str {
            "fake"
        }

        async fn fetch_news(&self, _query: &str, max_articles: usize) -> Vec<ArticleRecord> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.articles.iter().take(max_articles).cloned().collect()
        }
    }

    fn scraper(result: fn() -> Result<String>) -> Arc<FakeScraper> {
        Arc::new(FakeScraper {
            result,
            calls: AtomicUsize::new(0),
        })
    }

    fn news(articles: Vec<ArticleRecord>) -> Arc<FakeNews> {
        Arc::new(FakeNews {
            articles,
            calls: AtomicUsize::new(0),
        })
    }

    fn manager(
        scraper: Arc<FakeScraper>,
        news: Arc<FakeNews>,
        storage: Arc<InMemoryStorage>,
    ) -> ResearchManager {
        ResearchManager::new(
            scraper,
            news,
            BriefGenerator::new(Some(Arc::new(DummyModel::new()))),
            storage,
        )
    }

    #[tokio::test]
    async fn test_no_enrichment_sources() {
        let scraper = scraper(|| Ok("unused".to_string()));
        let news = news(vec![]);
        let storage = Arc::new(InMemoryStorage::new());
        let manager = manager(scraper.clone(), news.clone(), storage.clone());

        let outcome = manager.research_and_save(&ContactInfo::new("Alice", "Acme")).await;
        assert_eq!(outcome.record.summary, UNAVAILABLE_SUMMARY);
        assert!(outcome.record.news_links.is_empty());
        assert_eq!(scraper.calls.load(Ordering::SeqCst), 0);
        assert_eq!(news.calls.load(Ordering::SeqCst), 0);
        assert_eq!(outcome.saved.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_combines_website_and_news() {
        let scraper = scraper(|| Ok("Acme builds rockets".to_string()));
        let news = news(vec![
            ArticleRecord::new("Launch", "Acme flies again", "https://news.example/1"),
            ArticleRecord::new("", "", "https://news.example/ignored"),
            ArticleRecord::new("Funding", "", ""),
        ]);
        let storage = Arc::new(InMemoryStorage::new());
        let manager = manager(scraper, news, storage.clone());

        let info = ContactInfo::new("Alice", "Acme")
            .with_website("https://acme.example")
            .with_industry("aerospace");
        let outcome = manager.research_and_save(&info).await;

        assert_eq!(outcome.record.news_links, vec!["https://news.example/1".to_string()]);
        let summary = &outcome.record.summary;
        assert!(summary.contains("Company Website Content: Acme builds rockets Recent Industry News:"));
        assert!(summary.contains("• Launch: Acme flies again • Funding:"));
        assert!(outcome.warnings.is_empty());
        assert_eq!(storage.load().await, vec![outcome.record.clone()]);
    }

    #[tokio::test]
    async fn test_website_failure_is_a_warning() {
        let scraper = scraper(|| Err(Error::Fetch("Error fetching website: 503".to_string())));
        let storage = Arc::new(InMemoryStorage::new());
        let manager = manager(scraper, news(vec![]), storage.clone());

        let info = ContactInfo::new("Alice", "Acme").with_website("https://acme.example");
        let outcome = manager.research_and_save(&info).await;

        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].starts_with("Website scraping failed"));
        assert_eq!(outcome.record.summary, UNAVAILABLE_SUMMARY);
        assert_eq!(storage.load().await.len(), 1);
    }

    #[tokio::test]
    async fn test_max_articles_is_passed_on() {
        let articles = (0..4)
            .map(|i| ArticleRecord::new(format!("t{}", i), "d", format!("https://news.example/{}", i)))
            .collect();
        let storage = Arc::new(InMemoryStorage::new());
        let manager = manager(scraper(|| Ok(String::new())), news(articles), storage).with_max_articles(2);

        let outcome = manager
            .research_and_save(&ContactInfo::new("Alice", "Acme").with_industry("energy"))
            .await;
        assert_eq!(outcome.record.news_links.len(), 2);
    }

    #[tokio::test]
    async fn test_spawned_run_streams_events() {
        let storage = Arc::new(InMemoryStorage::new());
        let manager = Arc::new(manager(
            scraper(|| Err(Error::Timeout("Website request timed out".to_string()))),
            news(vec![ArticleRecord::new("Wind", "Turbines", "https://news.example/w")]),
            storage,
        ));

        let info = ContactInfo::new("Jane Doe", "Acme")
            .with_website("https://acme.example/about")
            .with_industry("renewable energy");
        let mut task = manager.spawn(info);

        let mut events = Vec::new();
        while let Some(event) = task.events.recv().await {
            events.push(event);
        }
        let outcome = task.finish().await.unwrap();

        assert_eq!(events.first(), Some(&ResearchEvent::Started("Jane Doe".to_string())));
        assert_eq!(events.last(), Some(&ResearchEvent::Saved(1)));
        assert!(events.iter().any(|e| matches!(e, ResearchEvent::Warning(w) if w.contains("timed out"))));
        assert!(events.contains(&ResearchEvent::Progress("✅ Found 1 news articles".to_string())));
        assert_eq!(outcome.record.news_links.len(), 1);
    }

    #[tokio::test]
    async fn test_news_count_only_includes_articles_with_text() {
        let manager = Arc::new(manager(
            scraper(|| Ok(String::new())),
            news(vec![
                ArticleRecord::new("Launch", "Acme flies again", "https://news.example/1"),
                ArticleRecord::new("", "", "https://news.example/empty"),
                ArticleRecord::new("  ", "\t", "https://news.example/blank"),
            ]),
            Arc::new(InMemoryStorage::new()),
        ));

        let mut task = manager.spawn(ContactInfo::new("Alice", "Acme").with_industry("aerospace"));
        let mut events = Vec::new();
        while let Some(event) = task.events.recv().await {
            events.push(event);
        }
        let outcome = task.finish().await.unwrap();

        assert!(events.contains(&ResearchEvent::Progress("✅ Found 1 news articles".to_string())));
        assert_eq!(outcome.record.news_links, vec!["https://news.example/1".to_string()]);
    }

    #[test]
    fn test_report_lists_at_most_five_links() {
        let links = (1..=7).map(|i| format!("https://news.example/{}", i)).collect();
        let record = ContactRecord::from_info(&ContactInfo::new("Jane Doe", "Acme"), "Brief".to_string(), links);
        let outcome = ResearchOutcome {
            record,
            warnings: vec![],
            saved: Ok(1),
        };

        let report = outcome.report();
        assert!(report.starts_with("📋 NETWORKING BRIEF FOR JANE DOE"));
        assert!(report.contains("Related News Articles (7)"));
        assert!(report.contains("  5. https://news.example/5"));
        assert!(!report.contains("https://news.example/6"));
    }

    #[test]
    fn test_event_display() {
        assert_eq!(
            ResearchEvent::Warning("Website scraping failed: boom".to_string()).to_string(),
            "⚠️ Website scraping failed: boom"
        );
        assert!(ResearchEvent::Saved(3).to_string().contains("You now have 3 contacts"));
    }
}
