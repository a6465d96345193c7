mod cli;
mod render;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use journal_api::{ApiClient, JournalBackend};
use journal_client::config::JournalConfig;
use journal_client::{DevBackend, EntryId, HistoryController, JournalEntry, SessionController};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing()?;

    let cli = Cli::parse();
    let dev = cli.dev;

    match cli.command {
        Commands::ConfigPath => config_path()?,
        Commands::Status => {
            let session = SessionController::new(connect(dev)?);
            session.refresh().await;
            render::session(&session.state());
        }
        Commands::Submit { content } => {
            let session = SessionController::new(connect(dev)?);
            session.refresh().await;
            if !session.can_submit() {
                render::session(&session.state());
                anyhow::bail!("Today's entry can't be submitted right now.");
            }
            let outcome = session.submit(&content).await;
            render::session(&session.state());
            outcome.map_err(|_| anyhow::anyhow!("Entry was not saved."))?;
        }
        Commands::History => {
            let history = HistoryController::new(connect(dev)?);
            history.list_all().await;
            render::history(&history.state());
        }
        Commands::Show { id } => {
            let history = HistoryController::new(connect(dev)?);
            history
                .select(JournalEntry {
                    id: Some(EntryId::Text(id)),
                    ..Default::default()
                })
                .await;
            render::selected(&history.state());
        }
    }

    Ok(())
}

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("warn"))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn connect(dev: bool) -> Result<Arc<dyn JournalBackend>> {
    if dev {
        tracing::info!("using in-memory dev backend");
        return Ok(Arc::new(DevBackend::new()));
    }

    let config = JournalConfig::load()?;
    tracing::info!(api_url = %config.api_url, "using journal backend");
    let client = ApiClient::new(&config.api_url)
        .with_context(|| format!("Failed to create client for {}", config.api_url))?;
    Ok(Arc::new(client))
}

fn config_path() -> Result<()> {
    let path = JournalConfig::config_path()?;
    if !path.exists() {
        JournalConfig::default().save()?;
        println!("Created default config at {}", path.display());
    } else {
        println!("{}", path.display());
    }
    Ok(())
}
