//! CLI entry point for drawing images with every 24-bit color

use allrgb::io::cli::{Cli, Runner};
use clap::Parser;

fn main() -> allrgb::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(if cli.quiet {
        "warn"
    } else {
        "info"
    }))
    .init();

    Runner::new(cli).run()
}
