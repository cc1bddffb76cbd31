use chrono::NaiveDate;

use crate::amount::cell_decimal;
use crate::error::ConvertError;
use crate::models::{Extraction, TransactionRow};
use crate::sheet::{excel_serial_to_date, Cell, Sheet};
use crate::template::StatementTemplate;

const TEXT_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y-%m-%d %H:%M:%S", "%d.%m.%Y"];

/// Interpret a cell as a calendar date. Anything that isn't one reads as absent.
pub fn cell_date(cell: &Cell) -> Option<NaiveDate> {
    match cell {
        Cell::Date(d) => Some(*d),
        Cell::Number(n) => excel_serial_to_date(*n),
        Cell::Text(s) => {
            let s = s.trim();
            TEXT_DATE_FORMATS.iter().find_map(|fmt| {
                NaiveDate::parse_from_str(s, fmt)
                    .ok()
                    .or_else(|| {
                        chrono::NaiveDateTime::parse_from_str(s, fmt)
                            .ok()
                            .map(|dt| dt.date())
                    })
            })
        }
        Cell::Empty => None,
    }
}

/// Read transaction rows from `block_start` until the first row without a date.
pub fn extract_transactions(
    sheet: &Sheet,
    template: &StatementTemplate,
    block_start: usize,
) -> Result<Extraction, ConvertError> {
    let width = template.required_width();
    if sheet.width() < width {
        return Err(ConvertError::SheetRead(format!(
            "expected {width} columns for the transaction block, sheet has {}",
            sheet.width()
        )));
    }

    let cols = &template.columns;
    let text = |col, row| sheet.cell(col, row).as_text().trim().to_string();
    let mut rows = Vec::new();
    let mut offset = 0usize;
    loop {
        let row = block_start + offset;
        let Some(date) = cell_date(sheet.cell(cols.date, row)) else {
            break;
        };
        rows.push(TransactionRow {
            kind: text(cols.kind, row),
            reference: text(cols.reference, row),
            sequence: text(cols.sequence, row),
            date,
            dimension: text(cols.dimension, row),
            person_item: sheet.cell(cols.person_item, row).as_text(),
            memo: sheet.cell(cols.memo, row).as_text(),
            debit: cell_decimal(sheet.cell(cols.debit, row), cols.debit, row)?,
            credit: cell_decimal(sheet.cell(cols.credit, row), cols.credit, row)?,
            statement_balance: cell_decimal(sheet.cell(cols.balance, row), cols.balance, row)?,
        });
        offset += 1;
    }

    log::debug!(
        "extracted {} transactions from row {}, block ends at offset {offset}",
        rows.len(),
        block_start + 1
    );
    Ok(Extraction {
        rows,
        stop_offset: offset,
    })
}
