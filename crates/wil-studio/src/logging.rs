//! Logger initialization for the command-line tool.
//!
//! The library only talks to the `log` facade; this is the one place a
//! backend is chosen.

use std::sync::Once;

/// Level used when neither `--verbose` nor `RUST_LOG` says otherwise.
/// Diagnostics share stderr with error reports, so stay at warnings.
const QUIET: &str = "warn";

/// `--verbose` opens up the two crates of this tool and nothing else.
const VERBOSE: &str = "warn,wil_markup=debug,wil_studio=debug";

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Set by `-v`; wins over `RUST_LOG`.
    pub verbose: bool,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { verbose: false, write_style: env_logger::WriteStyle::Auto }
    }
}

impl LoggingConfig {
    /// The `env_logger` filter string for this run.
    pub fn filter(&self, rust_log: Option<String>) -> String {
        if self.verbose {
            VERBOSE.to_string()
        } else {
            rust_log.filter(|f| !f.trim().is_empty()).unwrap_or_else(|| QUIET.to_string())
        }
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once; later calls are ignored.
///
/// Records carry no timestamps. Targets are shown only with `--verbose`.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = config.filter(std::env::var("RUST_LOG").ok());

        env_logger::Builder::new()
            .parse_filters(&filter)
            .write_style(config.write_style)
            .format_timestamp(None)
            .format_target(config.verbose)
            .init();

        log::debug!("logging initialized with filter {filter:?}");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(verbose: bool) -> LoggingConfig {
        LoggingConfig { verbose, ..LoggingConfig::default() }
    }

    #[test]
    fn quiet_by_default() {
        assert_eq!(config(false).filter(None), "warn");
        assert_eq!(config(false).filter(Some("  ".into())), "warn");
    }

    #[test]
    fn rust_log_is_honored_without_verbose() {
        assert_eq!(config(false).filter(Some("wil_markup=trace".into())), "wil_markup=trace");
    }

    #[test]
    fn verbose_overrides_rust_log() {
        let filter = config(true).filter(Some("error".into()));
        assert!(filter.contains("wil_markup=debug"));
        assert!(filter.contains("wil_studio=debug"));
    }
}
