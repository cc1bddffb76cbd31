mod amount;
mod balance;
mod cli;
mod converter;
mod error;
mod extractor;
mod fmt;
mod locator;
mod models;
mod qif;
mod reconciler;
mod record;
mod settings;
mod sheet;
mod template;

use clap::Parser;

use cli::{Cli, Commands};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert {
            input,
            output,
            account_type,
            template,
            yes,
        } => cli::convert::run(
            &input,
            output.as_deref(),
            account_type.as_deref(),
            template.as_deref(),
            yes,
        ),
        Commands::Check { input, template } => cli::check::run(&input, template.as_deref()),
        Commands::Template => cli::template::run(),
        Commands::Completions { shell } => cli::completions::run(shell),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
