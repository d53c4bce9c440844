//! `fern` logger setup shared by the binaries.

use std::str::FromStr;

use anyhow::Context;
use log::LevelFilter;

/// Environment variable consulted when no level is given explicitly.
pub const LOG_ENV: &str = "LANERUN_LOG";

/// Level from `LANERUN_LOG`, `Info` if unset or unparsable.
pub fn level_from_env() -> LevelFilter {
    std::env::var(LOG_ENV)
        .ok()
        .and_then(|v| parse_level(&v).ok())
        .unwrap_or(LevelFilter::Info)
}

pub fn parse_level(text: &str) -> anyhow::Result<LevelFilter> {
    LevelFilter::from_str(text.trim())
        .map_err(|_| anyhow::anyhow!("unknown log level `{text}`"))
}

/// Installs a stderr logger with a `[LEVEL target] message` format.
///
/// Fails if a logger is already installed.
pub fn init(level: LevelFilter) -> anyhow::Result<()> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{} {}] {}", record.level(), record.target(), message))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()
        .context("install logger")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_levels_case_insensitively() {
        assert_eq!(parse_level("debug").unwrap(), LevelFilter::Debug);
        assert_eq!(parse_level(" WARN ").unwrap(), LevelFilter::Warn);
        assert_eq!(parse_level("off").unwrap(), LevelFilter::Off);
        assert!(parse_level("loud").is_err());
    }
}
