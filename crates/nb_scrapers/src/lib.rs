pub mod logging;
pub mod manager;
pub mod scrapers;

pub use logging::{init_logging, Logger};
pub use manager::{ResearchEvent, ResearchManager, ResearchOutcome, ResearchTask};
pub use scrapers::{NewsApiScraper, WebsiteScraper};

pub mod prelude {
    pub use super::manager::{ResearchEvent, ResearchManager, ResearchOutcome};
    pub use nb_core::{ContactInfo, ContactRecord, Error, NewsSource, PageScraper, Result};
}
