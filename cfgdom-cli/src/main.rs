mod app;
mod commands;
mod input;
mod output;

use clap::Parser;

use crate::app::{Cli, Command};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Show cfgdom info+ on stderr; --verbose enables debug; RUST_LOG overrides
    let level = if cli.global.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_module("cfgdom", level)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();

    match &cli.command {
        Command::Tree { path, format } => commands::tree::run(path, format, &cli.global),
        Command::Postorder { path, format } => commands::postorder::run(path, format),
    }
}
