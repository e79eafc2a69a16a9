mod app;
mod output;

use std::{io::stdout, process::ExitCode};

use clap::{CommandFactory, Parser};
use clap_complete::aot::generate;
use folio_lookup::{
    UreqClient,
    logger::{Logger, error},
};

use self::app::{Cli, Command, run_cli};

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Command::Completions { shell } = cli.command {
        let mut clap_command = Cli::command();
        generate(shell, &mut clap_command, env!("CARGO_PKG_NAME"), &mut stdout());
        return ExitCode::SUCCESS;
    }

    if let Err(err) = Logger::init(cli.verbose.log_level_filter()) {
        eprintln!("Failed to initialize logger: {err}");
        return ExitCode::FAILURE;
    }

    if let Err(err) = run_cli(cli, UreqClient::new()) {
        error!("{err}");
    }

    if Logger::has_error() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
