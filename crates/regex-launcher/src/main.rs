use std::process::ExitCode;

use clap::Parser;

fn main() -> anyhow::Result<ExitCode> {
    let cli = regex_launcher::cli::Cli::parse();
    regex_launcher::init(cli.verbose);

    regex_launcher::cli::run(cli)
}
