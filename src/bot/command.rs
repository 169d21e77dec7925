//! Chat command parsing and fixed reply texts.

use crate::parser::first_url;

/// Reply to `/start`.
pub const START_TEXT: &str =
    "Hello! I'm a bot. I can fetch resources for you. Send /help to see how.";
/// Reply to `/help`.
pub const HELP_TEXT: &str =
    "Send /d <url> with a resource page link and I'll send you the file privately.";
/// Reply to `/about`.
pub const ABOUT_TEXT: &str = "Resource downloader bot.";
/// Reply to `/contact`.
pub const CONTACT_TEXT: &str = "Ask the administrator of this bot for help.";
/// Reply to `/d` without a link.
pub const USAGE_TEXT: &str = "Usage: /d <url>";
/// Reply to any unrecognized command.
pub const UNKNOWN_TEXT: &str = "I don't know that command";
/// Sent privately to the requester before a download starts.
pub const DOWNLOADING_TEXT: &str = "Downloading...";
/// Posted in a group once the file has gone to the requester.
pub const SENT_PRIVATELY_TEXT: &str = "File sent to you privately";

/// A parsed chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotCommand {
    /// `/start`
    Start,
    /// `/help`
    Help,
    /// `/about`
    About,
    /// `/contact`
    Contact,
    /// `/d` with a target; `url` is the first link in the arguments, or the
    /// trimmed argument text when none is found.
    Download { url: String },
    /// `/d` with no arguments.
    DownloadUsage,
    /// Any other `/command`; holds the command name.
    Unknown(String),
    /// Plain text, not a command.
    Text(String),
}

/// Parses message text into a [`BotCommand`].
///
/// Command names are case-sensitive. A `@botname` suffix on the command
/// (`/d@my_bot ...`) is ignored.
#[must_use]
pub fn parse_command(text: &str) -> BotCommand {
    let trimmed = text.trim_start();
    let Some(rest) = trimmed.strip_prefix('/') else {
        return BotCommand::Text(text.to_string());
    };

    let (head, args) = rest
        .split_once(char::is_whitespace)
        .unwrap_or((rest, ""));
    let name = head.split_once('@').map_or(head, |(name, _)| name);

    match name {
        "start" => BotCommand::Start,
        "help" => BotCommand::Help,
        "about" => BotCommand::About,
        "contact" => BotCommand::Contact,
        "d" => {
            let args = args.trim();
            if args.is_empty() {
                BotCommand::DownloadUsage
            } else {
                let url = first_url(args).unwrap_or(args);
                BotCommand::Download {
                    url: url.to_string(),
                }
            }
        }
        other => BotCommand::Unknown(other.to_string()),
    }
}
