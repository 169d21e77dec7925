//! Logging setup and terminal capability checks.

pub(crate) fn no_color_env_requested() -> bool {
    std::env::var_os("NO_COLOR").is_some_and(|value| !value.is_empty())
}

pub(crate) fn is_dumb_terminal() -> bool {
    std::env::var("TERM")
        .map(|value| value.eq_ignore_ascii_case("dumb"))
        .unwrap_or(false)
}

/// Picks the default log level from CLI flags.
/// Priority: quiet flag > verbose flag > default (info). `RUST_LOG` still wins.
pub(crate) fn default_log_level(quiet: bool, verbose: u8) -> &'static str {
    if quiet {
        "error"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

/// Installs the global tracing subscriber, writing to stderr.
pub(crate) fn init_tracing(default_level: &str) {
    let no_color = no_color_env_requested() || is_dumb_terminal();
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .with_env_filter(filter)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::default_log_level;

    #[test]
    fn test_default_log_level_quiet_wins() {
        assert_eq!(default_log_level(true, 2), "error");
    }

    #[test]
    fn test_default_log_level_by_verbosity() {
        assert_eq!(default_log_level(false, 0), "info");
        assert_eq!(default_log_level(false, 1), "debug");
        assert_eq!(default_log_level(false, 5), "trace");
    }
}
