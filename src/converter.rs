use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::balance::{read_balance, read_header};
use crate::error::{ConversionError, ConvertError};
use crate::extractor::extract_transactions;
use crate::locator::find_header_row;
use crate::models::Statement;
use crate::qif::write_qif;
use crate::reconciler::Reconciler;
use crate::record::to_record;
use crate::sheet::{open_sheet, Sheet};
use crate::template::StatementTemplate;

pub struct ConvertOptions<'a> {
    pub account_type: &'a str,
    pub template: &'a StatementTemplate,
    pub date_format: &'a str,
}

/// `statement.xls` -> `statement.qif`
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension("qif")
}

/// Read, transform and reconcile a statement held in memory.
pub fn statement_from_sheet(sheet: &Sheet, template: &StatementTemplate) -> Result<Statement, ConvertError> {
    let header_row = find_header_row(sheet, template)?;
    log::debug!("header row found at {}", header_row + 1);

    let header = read_header(sheet, template);
    let opening_balance = read_balance(sheet, template, template.opening_row(header_row), "opening")?;

    let extraction = extract_transactions(sheet, template, template.block_start(header_row))?;
    let closing_row = template.closing_row(header_row, extraction.stop_offset);

    let mut reconciler = Reconciler::new(opening_balance);
    let records: Vec<_> = extraction
        .rows
        .into_iter()
        .map(|row| {
            let record = to_record(row);
            let running = reconciler.add(record.amount);
            log::debug!("{} {} {} -> {running}", record.date, record.reference, record.amount);
            record
        })
        .collect();

    let closing_balance = read_balance(sheet, template, closing_row, "closing")?;
    reconciler.finish(closing_balance).into_result()?;

    Ok(Statement {
        header,
        opening_balance,
        closing_balance,
        records,
    })
}

pub fn read_statement(input: &Path, template: &StatementTemplate) -> Result<Statement, ConversionError> {
    let sheet = open_sheet(input).map_err(|e| ConversionError::new(input, e))?;
    statement_from_sheet(&sheet, template).map_err(|e| ConversionError::new(input, e))
}

/// Convert `input` to a QIF file at `output`.
///
/// The output is only created once the statement reconciles; it is written to a
/// temporary file beside `output` and renamed into place.
pub fn convert(input: &Path, output: &Path, options: &ConvertOptions) -> Result<Statement, ConversionError> {
    let statement = read_statement(input, options.template)?;
    publish(output, &statement, options).map_err(|e| ConversionError::new(input, e))?;
    log::info!(
        "wrote {} transactions from {} to {}",
        statement.records.len(),
        input.display(),
        output.display()
    );
    Ok(statement)
}

fn publish(output: &Path, statement: &Statement, options: &ConvertOptions) -> Result<(), ConvertError> {
    let dir = match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let tmp = temp_file_in(dir)?;
    write_qif(
        BufWriter::new(tmp.as_file()),
        options.account_type,
        &statement.records,
        options.date_format,
    )?;
    // Replacing a file keeps its mode rather than the temp file's owner-only one.
    if let Ok(existing) = std::fs::metadata(output) {
        tmp.as_file().set_permissions(existing.permissions())?;
    }
    tmp.persist(output).map_err(|e| e.error)?;
    Ok(())
}

/// A temporary file that, once renamed, looks like any other newly created file.
#[cfg(unix)]
fn temp_file_in(dir: &Path) -> std::io::Result<tempfile::NamedTempFile> {
    use std::os::unix::fs::PermissionsExt;

    // the umask still applies, as for a plain `File::create`
    tempfile::Builder::new()
        .permissions(std::fs::Permissions::from_mode(0o666))
        .tempfile_in(dir)
}

#[cfg(not(unix))]
fn temp_file_in(dir: &Path) -> std::io::Result<tempfile::NamedTempFile> {
    tempfile::NamedTempFile::new_in(dir)
}
