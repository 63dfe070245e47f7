//! wixtree CLI Binary

use clap::Parser;
use owo_colors::OwoColorize;
use std::process;
use wixtree::logging::init_logging;
use wixtree::tooling::cli::{Cli, CliContext};

fn main() {
    let cli = Cli::parse();

    let project_root = std::env::current_dir().unwrap_or_else(|_| ".".into());
    let context = match CliContext::new(project_root, cli.config.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("{} {}", "Error loading configuration:".red().bold(), e);
            process::exit(1);
        }
    };

    if let Err(e) = init_logging(&context.config().logging, &cli.logging_overrides()) {
        eprintln!("{} {}", "Error initializing logging:".red().bold(), e);
        process::exit(1);
    }

    match context.execute(&cli.command) {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            process::exit(1);
        }
    }
}
