pub mod config;
pub mod error;
pub mod models;
pub mod scraper;
pub mod storage;
pub mod types;
pub mod validation;

pub use config::Config;
pub use error::Error;
pub use models::InferenceModel;
pub use scraper::{NewsSource, PageScraper};
pub use storage::ContactStorage;
pub use types::{ArticleRecord, ContactInfo, ContactRecord};
pub use validation::{is_valid_url, sanitize_input};

pub type Result<T> = std::result::Result<T, Error>;
