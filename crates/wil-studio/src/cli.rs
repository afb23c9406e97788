//! Command-line arguments, declared with `clap`'s derive API.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use wil_markup::{IndentPolicy, ParseOptions};

use crate::logging::LoggingConfig;

#[derive(Debug, Parser)]
#[command(name = "wil-studio", version, about = "Check, format, and inspect .wil widget documents.")]
pub struct StudioArgs {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// How indentation is turned into nesting.
    #[arg(long, value_enum, default_value_t = IndentArg::Uniform, global = true)]
    pub indent: IndentArg,

    /// Deepest nesting level accepted.
    #[arg(long, default_value_t = ParseOptions::DEFAULT_MAX_DEPTH, global = true)]
    pub max_depth: usize,

    /// Log at debug level (overrides RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// When to color log output.
    #[arg(long, value_enum, default_value_t = ColorArg::Auto, global = true)]
    pub color: ColorArg,
}

impl GlobalArgs {
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions::new().indent(self.indent.into()).max_depth(self.max_depth)
    }

    pub fn logging_config(&self) -> LoggingConfig {
        LoggingConfig { verbose: self.verbose, write_style: self.color.into() }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse a document and report the first error, if any.
    Check {
        file: PathBuf,
        /// Handler names the host provides; every `on_*` attribute must name one.
        #[arg(long = "handler", value_name = "NAME")]
        handlers: Vec<String>,
    },
    /// Print the widget outline of a document.
    Tree { file: PathBuf },
    /// Print the document in canonical form.
    Fmt {
        file: PathBuf,
        /// Rewrite the file in place instead of printing.
        #[arg(long)]
        write: bool,
    },
    /// Look up a widget by its dot-separated id path and print it.
    Get {
        file: PathBuf,
        /// e.g. `c_box.c_input`
        path: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum IndentArg {
    Uniform,
    Nested,
}

impl From<IndentArg> for IndentPolicy {
    fn from(arg: IndentArg) -> Self {
        match arg {
            IndentArg::Uniform => IndentPolicy::Uniform,
            IndentArg::Nested => IndentPolicy::Nested,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorArg {
    Auto,
    Always,
    Never,
}

impl From<ColorArg> for env_logger::WriteStyle {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => env_logger::WriteStyle::Auto,
            ColorArg::Always => env_logger::WriteStyle::Always,
            ColorArg::Never => env_logger::WriteStyle::Never,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn definition_is_consistent() {
        StudioArgs::command().debug_assert();
    }

    #[test]
    fn global_flags_after_subcommand() {
        let args = StudioArgs::try_parse_from([
            "wil-studio", "check", "ui.wil", "--handler", "calculate", "--handler", "reset",
            "--indent", "nested", "-v",
        ])
        .unwrap();
        assert!(args.global.verbose);
        assert_eq!(args.global.parse_options().indent, IndentPolicy::Nested);
        match args.command {
            Command::Check { handlers, .. } => assert_eq!(handlers, vec!["calculate", "reset"]),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn defaults() {
        let args = StudioArgs::try_parse_from(["wil-studio", "tree", "ui.wil"]).unwrap();
        assert_eq!(args.global.parse_options(), ParseOptions::default());
        assert!(!args.global.logging_config().verbose);
    }
}
