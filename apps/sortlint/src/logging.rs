//! Tracing subscriber setup for the binary.
//!
//! Events go to stderr so `--output json` on stdout stays parseable.
//! `SORTLINT_LOG` takes an `EnvFilter` directive and wins over the
//! configured level.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "SORTLINT_LOG";

/// Build the filter from `SORTLINT_LOG`, falling back to `default_level`.
pub fn filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Install the global subscriber. Later calls are ignored.
pub fn init(default_level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(default_level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_level_and_fallback() {
        // An explicit SORTLINT_LOG in the environment wins over both.
        if std::env::var_os(LOG_ENV).is_some() {
            return;
        }
        assert_eq!(filter("debug").to_string(), "debug");
        assert_eq!(filter("sortlint=loud").to_string(), "warn");
    }
}
