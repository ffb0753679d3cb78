use clap::Parser;
use stockscan::cli::{run, Cli};
use stockscan::logging::init_logging;

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    init_logging(cli.json_logs);
    run(cli)
}
