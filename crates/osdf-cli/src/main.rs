use clap::Parser;
use osdf_core::logging;

mod cli;

use crate::cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging before any director traffic.
    let target = logging::init(cli.verbose);
    if cli.verbose {
        eprintln!("osdf: logging to {}", target);
    }

    if let Err(err) = cli.run().await {
        eprintln!("osdf error: {:#}", err);
        std::process::exit(1);
    }
}
