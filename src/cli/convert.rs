use std::path::Path;

use colored::Colorize;
use dialoguer::Confirm;

use crate::cli::{print_summary, resolve_template};
use crate::converter::{convert, default_output_path, ConvertOptions};
use crate::error::{AppError, Result};
use crate::settings::load_settings;

fn same_file(a: &Path, b: &Path) -> bool {
    a == b
        || matches!(
            (a.canonicalize(), b.canonicalize()),
            (Ok(a), Ok(b)) if a == b
        )
}

fn confirm_overwrite(output: &Path) -> Result<bool> {
    Confirm::new()
        .with_prompt(format!("{} exists. Overwrite?", output.display()))
        .default(false)
        .interact()
        .map_err(|e| {
            AppError::Other(format!(
                "cannot confirm overwrite of {} ({e}); pass --yes to overwrite",
                output.display()
            ))
        })
}

pub fn run(
    input: &Path,
    output: Option<&Path>,
    account_type: Option<&str>,
    template: Option<&Path>,
    yes: bool,
) -> Result<()> {
    let settings = load_settings()?;
    let template = resolve_template(&settings, template)?;
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_path(input));
    if same_file(input, &output) {
        return Err(AppError::Other(format!(
            "output {} would overwrite the input; choose another output path",
            output.display()
        )));
    }

    if output.exists() && !yes && !confirm_overwrite(&output)? {
        println!("Aborted; {} left unchanged.", output.display());
        return Ok(());
    }

    let options = ConvertOptions {
        account_type: account_type.unwrap_or(&settings.default_account_type),
        template: &template,
        date_format: &settings.date_format,
    };
    let statement = convert(input, &output, &options)?;

    println!(
        "{} {} to {}",
        "Converted".green().bold(),
        input.display(),
        output.display()
    );
    print_summary(&statement);
    Ok(())
}
