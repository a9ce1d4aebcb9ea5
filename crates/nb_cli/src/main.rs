use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use anyhow::{bail, Context};
use clap::Parser;
use nb_core::{is_valid_url, Config, ContactInfo, ContactStorage};
use nb_inference::{create_model, ModelKind};
use nb_scrapers::{init_logging, ResearchManager};
use nb_storage::{create_storage, StorageKind};
use nb_web::AppState;
use tracing::info;

mod display;
mod menu;

use menu::Console;

#[derive(Parser, Debug)]
#[command(author, version, about = "Research networking contacts and keep notes on them", long_about = None)]
pub struct Cli {
    /// Path of the JSON contact store (default: $NETBRIEF_STORE or networking_memory.json)
    #[arg(long)]
    store: Option<PathBuf>,
    #[arg(long, default_value = "json", help = "Storage backend. Available backends: json (default), memory")]
    storage: StorageKind,
    #[arg(long, default_value = "gemini", help = "Model to use for briefs. Available models: gemini (default), dummy")]
    model: ModelKind,
    /// Gemini model name (default: $NETBRIEF_MODEL or gemini-1.5-flash)
    #[arg(long)]
    model_name: Option<String>,
    /// Overrides $GEMINI_API_KEY
    #[arg(long)]
    gemini_api_key: Option<String>,
    /// Overrides $NEWS_API_KEY
    #[arg(long)]
    news_api_key: Option<String>,
    /// Timeout in seconds for website and news requests
    #[arg(long)]
    timeout_secs: Option<u64>,
    /// Number of news articles requested per research run
    #[arg(long)]
    max_articles: Option<usize>,
    #[arg(short, long)]
    verbose: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Interactive menu (the default)
    Menu,
    /// Print saved contacts
    List {
        /// Only contacts whose name, company, role or industry contain this text
        #[arg(long)]
        search: Option<String>,
    },
    /// Delete the first contact with exactly this name and company
    Delete { name: String, company: String },
    /// Research a contact and save the brief
    Research(ContactArgs),
    /// Serve the HTTP API
    Serve {
        #[arg(long, default_value = "127.0.0.1:3000")]
        addr: SocketAddr,
    },
}

#[derive(clap::Args, Debug)]
struct ContactArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    company: String,
    #[arg(long, default_value = "")]
    role: String,
    #[arg(long, default_value = "")]
    linkedin: String,
    #[arg(long, default_value = "")]
    website: String,
    #[arg(long, default_value = "")]
    industry: String,
}

impl ContactArgs {
    fn into_info(self) -> anyhow::Result<ContactInfo> {
        let info = ContactInfo::new(self.name, self.company)
            .with_role(self.role)
            .with_linkedin(self.linkedin)
            .with_website(self.website)
            .with_industry(self.industry);
        if !info.has_required_fields() {
            bail!("Name and Company are required fields.");
        }
        for (label, value) in [("LinkedIn", &info.linkedin), ("Website", &info.website)] {
            if !value.trim().is_empty() && !is_valid_url(value) {
                bail!("{} must be a valid http(s) URL: {}", label, value);
            }
        }
        Ok(info)
    }
}

impl Cli {
    fn config(&self) -> Config {
        let mut config = Config::from_env();
        if self.gemini_api_key.is_some() {
            config = config.with_gemini_api_key(self.gemini_api_key.clone());
        }
        if self.news_api_key.is_some() {
            config = config.with_news_api_key(self.news_api_key.clone());
        }
        if let Some(path) = &self.store {
            config = config.with_store_path(path);
        }
        if let Some(name) = &self.model_name {
            config.model_name = name.clone();
        }
        if let Some(secs) = self.timeout_secs {
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(max_articles) = self.max_articles {
            config.max_articles = max_articles;
        }
        config
    }
}

async fn list_contacts(storage: &dyn ContactStorage, search: Option<&str>) {
    let contacts = match search {
        Some(term) => storage.search(term).await,
        None => storage.load().await,
    };
    if contacts.is_empty() {
        println!("🧠 No networking history found.");
        return;
    }
    for (i, contact) in contacts.iter().enumerate() {
        println!("{}", display::contact_line(i + 1, contact));
    }
}

async fn research(manager: &Arc<ResearchManager>, info: ContactInfo) -> anyhow::Result<()> {
    let mut task = manager.spawn(info);
    while let Some(event) = task.events.recv().await {
        println!("{}", event);
    }
    let outcome = task.finish().await?;
    println!("\n{}", outcome.report());
    outcome.saved.context("contact was researched but not saved")?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let logger = init_logging(cli.verbose);

    let config = cli.config();
    logger.debug(&format!("{:?}", config));

    let storage = create_storage(cli.storage, &config.store_path);
    info!("🏦 Contact store ready ({:?} at {})", cli.storage, config.store_path.display());
    let model = create_model(cli.model, &config)?;
    let manager = Arc::new(ResearchManager::from_config(&config, model, storage.clone())?);

    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Menu => {
            let stdin = io::stdin();
            let mut console = Console::new(stdin.lock(), io::stdout());
            console.run(&manager).await?;
        }
        Commands::List { search } => list_contacts(storage.as_ref(), search.as_deref()).await,
        Commands::Delete { name, company } => {
            if !storage.delete(&name, &company).await? {
                bail!("No contact named {} at {}", name, company);
            }
            println!("✅ Successfully deleted: {} from {}", name, company);
            println!("📊 {} contacts remaining", storage.load().await.len());
        }
        Commands::Research(args) => research(&manager, args.into_info()?).await?,
        Commands::Serve { addr } => {
            info!("🌐 Serving on http://{}", addr);
            nb_web::serve(addr, AppState::new(manager)).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults_to_menu() {
        let cli = Cli::try_parse_from(["netbrief"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.storage, StorageKind::Json);
        assert_eq!(cli.model, ModelKind::Gemini);
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from([
            "netbrief",
            "--store",
            "/tmp/contacts.json",
            "--model-name",
            "gemini-pro",
            "--timeout-secs",
            "3",
            "--max-articles",
            "2",
            "--news-api-key",
            "news-key",
            "list",
        ])
        .unwrap();

        let config = cli.config();
        assert_eq!(config.store_path, PathBuf::from("/tmp/contacts.json"));
        assert_eq!(config.model_name, "gemini-pro");
        assert_eq!(config.request_timeout, Duration::from_secs(3));
        assert_eq!(config.max_articles, 2);
        assert_eq!(config.news_api_key.as_deref(), Some("news-key"));
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        assert!(Cli::try_parse_from(["netbrief", "--storage", "postgres"]).is_err());
        assert!(Cli::try_parse_from(["netbrief", "--model", "ollama"]).is_err());
    }

    #[test]
    fn test_research_args_are_validated() {
        let cli = Cli::try_parse_from([
            "netbrief", "research", "--name", "Jane Doe", "--company", "Acme", "--website", "acme",
        ])
        .unwrap();
        let Some(Commands::Research(args)) = cli.command else {
            panic!("expected research command");
        };
        assert!(args.into_info().unwrap_err().to_string().contains("Website"));

        let blank = ContactArgs {
            name: "  ".to_string(),
            company: "Acme".to_string(),
            role: String::new(),
            linkedin: String::new(),
            website: String::new(),
            industry: String::new(),
        };
        assert!(blank.into_info().is_err());
    }
}
