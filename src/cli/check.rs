use std::path::Path;

use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::{print_summary, resolve_template};
use crate::converter::read_statement;
use crate::error::Result;
use crate::fmt::money;
use crate::reconciler::Reconciler;
use crate::settings::load_settings;

pub fn run(input: &Path, template: Option<&Path>) -> Result<()> {
    let settings = load_settings()?;
    let template = resolve_template(&settings, template)?;
    let statement = read_statement(input, &template)?;

    let mut table = Table::new();
    table.set_header(vec!["Date", "Ref", "Payee", "Amount", "Balance"]);
    let mut running = Reconciler::new(statement.opening_balance);
    for record in &statement.records {
        let balance = running.add(record.amount);
        let amount = if record.amount.is_sign_negative() {
            money(record.amount).red().to_string()
        } else {
            money(record.amount).green().to_string()
        };
        table.add_row(vec![
            Cell::new(record.date.format("%Y-%m-%d")),
            Cell::new(&record.reference),
            Cell::new(record.payee.as_deref().unwrap_or("")),
            Cell::new(amount),
            Cell::new(money(balance)),
        ]);
    }
    println!("{table}");
    print_summary(&statement);
    println!("{}", "Reconciled".green().bold());
    Ok(())
}
