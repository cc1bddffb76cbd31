pub mod check;
pub mod completions;
pub mod convert;
pub mod template;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;

use crate::error::Result;
use crate::fmt::money;
use crate::models::Statement;
use crate::settings::Settings;
use crate::template::StatementTemplate;

#[derive(Parser)]
#[command(
    name = "frontacc-conv",
    version,
    about = "Convert FrontAccounting GL bank-account statements to QIF."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a GL statement (XLS/XLSX/ODS/CSV) to a QIF file.
    #[command(alias = "gl2qif")]
    Convert {
        /// GL account transactions export
        input: PathBuf,
        /// Output QIF file (default: input with a .qif extension)
        output: Option<PathBuf>,
        /// QIF account type, e.g. Bank, Cash, CCard (default from settings: Bank)
        #[arg(long = "account-type", short = 't')]
        account_type: Option<String>,
        /// JSON statement template overriding the configured layout
        #[arg(long)]
        template: Option<PathBuf>,
        /// Overwrite an existing output file without asking
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Read and reconcile a GL statement without writing anything.
    Check {
        /// GL account transactions export
        input: PathBuf,
        /// JSON statement template overriding the configured layout
        #[arg(long)]
        template: Option<PathBuf>,
    },
    /// Print the statement template in effect, as JSON.
    Template,
    /// Generate shell completions.
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// `--template` wins over the template in settings.
pub(crate) fn resolve_template(settings: &Settings, path: Option<&Path>) -> Result<StatementTemplate> {
    match path {
        Some(p) => StatementTemplate::load(p),
        None => Ok(settings.template.clone()),
    }
}

pub(crate) fn print_summary(statement: &Statement) {
    let period = if statement.header.period.is_empty() {
        "(not stated)".dimmed().to_string()
    } else {
        statement.header.period.clone()
    };
    println!("Period:          {period}");
    println!("Opening balance: {}", money(statement.opening_balance));
    println!("Closing balance: {}", money(statement.closing_balance));
    println!("Transactions:    {}", statement.records.len());
}
