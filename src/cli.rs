//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};

use freepik_dl_core::DeliveryMode;
use freepik_dl_core::bot::{DEFAULT_POLL_TIMEOUT_SECS, DEFAULT_TELEGRAM_API_BASE};
use freepik_dl_core::download::constants::{
    CONNECT_TIMEOUT_SECS, DEFAULT_API_BASE, READ_TIMEOUT_SECS,
};

/// Fetch Freepik resources by page URL.
///
/// Resolves a resource page link to its signed download URL through the
/// Freepik API and saves the file, or serves the same flow as a Telegram bot.
#[derive(Parser, Debug)]
#[command(name = "freepik-dl")]
#[command(author, version, about)]
pub struct Cli {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(flatten)]
    pub provider: ProviderArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Provider API settings shared by `fetch` and `bot`.
#[derive(ClapArgs, Debug, Clone)]
pub struct ProviderArgs {
    /// Freepik API key
    #[arg(long, env = "FREEPIK_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Freepik API base URL
    #[arg(long, env = "FREEPIK_API_BASE", default_value = DEFAULT_API_BASE, global = true)]
    pub api_base: String,

    /// HTTP connect timeout in seconds (1-3600)
    #[arg(
        long,
        env = "FREEPIK_CONNECT_TIMEOUT_SECS",
        default_value_t = CONNECT_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..=3600),
        global = true
    )]
    pub connect_timeout: u64,

    /// HTTP request timeout in seconds (1-3600)
    #[arg(
        long,
        env = "FREEPIK_READ_TIMEOUT_SECS",
        default_value_t = READ_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..=3600),
        global = true
    )]
    pub read_timeout: u64,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Download one resource
    Fetch(FetchArgs),
    /// Print the resource ID extracted from a URL
    Id {
        /// Resource page URL
        url: String,
    },
    /// Run the Telegram bot (long polling)
    Bot(BotArgs),
}

#[derive(ClapArgs, Debug)]
pub struct FetchArgs {
    /// Resource page URL
    pub url: String,

    /// Where the file goes: `disk` writes into --output-dir, `memory` writes bytes to stdout
    #[arg(short, long, value_enum, default_value_t = ModeArg::Disk)]
    pub mode: ModeArg,

    /// Directory for `disk` mode
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,
}

#[derive(ClapArgs, Debug)]
pub struct BotArgs {
    /// Telegram bot token
    #[arg(long, env = "TELEGRAM_BOT_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Telegram Bot API base URL
    #[arg(long, env = "TELEGRAM_API_BASE", default_value = DEFAULT_TELEGRAM_API_BASE)]
    pub telegram_api_base: String,

    /// Long-poll timeout in seconds (1-300)
    #[arg(
        long,
        default_value_t = DEFAULT_POLL_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..=300)
    )]
    pub poll_timeout: u64,
}

/// Delivery mode as spelled on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeArg {
    Disk,
    Memory,
}

impl From<ModeArg> for DeliveryMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Disk => DeliveryMode::ToDisk,
            ModeArg::Memory => DeliveryMode::ToMemory,
        }
    }
}
