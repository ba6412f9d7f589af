mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;
use log::LevelFilter;
use std::process::ExitCode;

use crate::cli::Cli;
use crate::error::{CliError, FETCH_FAILED_EXIT_CODE};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match run(&cli).await {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

async fn run(cli: &Cli) -> Result<ExitCode, CliError> {
    let result = commands::run(cli).await?;
    output::render(&result.report, cli.format, cli.pretty)?;

    if result.fetch_failed {
        return Ok(ExitCode::from(FETCH_FAILED_EXIT_CODE));
    }

    Ok(ExitCode::SUCCESS)
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}
