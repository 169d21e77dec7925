//! CLI entry point for freepik-dl.

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use freepik_dl_core::bot::{Dispatcher, TelegramClient};
use freepik_dl_core::{ApiKey, DownloadArtifact, Fetcher, FetcherConfig, extract_resource_id};
use tracing::{debug, info};

mod cli;
mod terminal;

use cli::{BotArgs, Cli, Command, FetchArgs, ProviderArgs};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; the variables may come from the environment.
    let dotenv_path = dotenvy::dotenv().ok();

    // Parse CLI arguments first (before tracing, so --help works without logs)
    let cli = Cli::parse();

    terminal::init_tracing(terminal::default_log_level(cli.quiet, cli.verbose));
    if let Some(path) = dotenv_path {
        debug!(path = %path.display(), "loaded .env file");
    }

    match cli.command {
        Command::Id { url } => {
            println!("{}", extract_resource_id(&url));
            Ok(())
        }
        Command::Fetch(args) => run_fetch(&cli.provider, args).await,
        Command::Bot(args) => run_bot(&cli.provider, args).await,
    }
}

fn build_fetcher(provider: &ProviderArgs, config: FetcherConfig) -> Result<Fetcher> {
    let config = FetcherConfig {
        api_key: provider.api_key.clone().and_then(ApiKey::new),
        ..config
    }
    .api_base(provider.api_base.clone())
    .timeouts(provider.connect_timeout, provider.read_timeout);
    Fetcher::new(config).context("invalid provider configuration")
}

async fn run_fetch(provider: &ProviderArgs, args: FetchArgs) -> Result<()> {
    let fetcher = build_fetcher(provider, FetcherConfig::default().output_dir(&args.output_dir))?;

    let artifact = fetcher
        .download(&args.url, args.mode.into())
        .await
        .with_context(|| format!("failed to fetch {}", args.url))?;

    match artifact {
        DownloadArtifact::InMemory { bytes, filename } => {
            info!(filename = %filename, bytes = bytes.len(), "writing file to stdout");
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&bytes).context("failed to write to stdout")?;
            stdout.flush().context("failed to flush stdout")?;
        }
        DownloadArtifact::Persisted { path, .. } => {
            println!("{}", path.display());
        }
    }
    Ok(())
}

async fn run_bot(provider: &ProviderArgs, args: BotArgs) -> Result<()> {
    let fetcher = build_fetcher(provider, FetcherConfig::default())?;
    if fetcher.config().api_key.is_none() {
        anyhow::bail!("FREEPIK_API_KEY is not set; the bot cannot download anything");
    }

    let telegram = TelegramClient::new(&args.telegram_api_base, &args.token, args.poll_timeout)
        .context("failed to build Telegram client")?;
    let dispatcher = Dispatcher::new(Arc::new(fetcher));

    info!("bot starting");
    telegram
        .run_polling(&dispatcher)
        .await
        .context("Telegram bot stopped")?;
    Ok(())
}
