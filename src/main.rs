mod cli;
mod config;
mod errors;

use clap::Parser;
use std::process::ExitCode;

use cli::Cli;
use config::AppConfig;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(2);
        }
    };
    if let Err(e) = config.init_logger() {
        eprintln!("{e}");
        return ExitCode::from(2);
    }

    match cli::run(cli.command, &config) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "validation did not complete");
            eprintln!("error: {e}");
            ExitCode::from(2)
        }
    }
}
