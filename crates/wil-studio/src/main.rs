use std::io::Write;

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod logging;

use cli::StudioArgs;

fn main() -> Result<()> {
    let args = StudioArgs::parse();
    logging::init_logging(args.global.logging_config());

    let output = commands::run(&args.command, args.global.parse_options())?;
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
