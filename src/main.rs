use std::io::{self, Write};
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use rand::rngs::OsRng;
use tracing_subscriber::EnvFilter;

use rsakit::cli::{self, Cli, USAGE_ERROR};

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // stdout carries keys and results, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        // Argument errors are reported on stdout and are not a failed exit
        Err(_) => {
            println!("{}", USAGE_ERROR);
            return ExitCode::SUCCESS;
        }
    };

    init_logging(cli.verbose);
    let config = cli.config();

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut output = stdout.lock();

    match cli::run(cli.command, &config, &mut OsRng, &mut input, &mut output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if cli::is_fatal(&e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
        Err(e) => {
            let _ = writeln!(output, "error: {:#}", e);
            ExitCode::SUCCESS
        }
    }
}
