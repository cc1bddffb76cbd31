use rust_decimal::Decimal;

use crate::amount::{cell_decimal, signed_amount};
use crate::error::ConvertError;
use crate::models::StatementHeader;
use crate::sheet::Sheet;
use crate::template::StatementTemplate;

/// Read the debit/credit pair of a balance row as one signed amount.
///
/// `which` names the balance ("opening", "closing") in error messages.
pub fn read_balance(
    sheet: &Sheet,
    template: &StatementTemplate,
    row: usize,
    which: &'static str,
) -> Result<Decimal, ConvertError> {
    let (debit_col, credit_col) = (template.balance_debit, template.balance_credit);
    let debit = cell_decimal(sheet.cell(debit_col, row), debit_col, row)?;
    let credit = cell_decimal(sheet.cell(credit_col, row), credit_col, row)?;
    let balance = signed_amount(debit, credit).ok_or_else(|| ConvertError::MissingBalance {
        which,
        debit: debit_col.to_string(),
        credit: credit_col.to_string(),
        row: row + 1,
    })?;
    log::debug!("{which} balance at row {}: {balance}", row + 1);
    Ok(balance)
}

pub fn read_header(sheet: &Sheet, template: &StatementTemplate) -> StatementHeader {
    let pos = template.period;
    let period = sheet.cell(pos.column, pos.row).as_text().trim().to_string();
    if period.is_empty() {
        log::warn!("no reporting period in {}", pos.column.cell_ref(pos.row));
    }
    StatementHeader { period }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use crate::sheet::Cell;

    /// A sheet with a single balance row at index 2, debit in I and credit in J.
    fn balance_sheet(debit: Cell, credit: Cell) -> Sheet {
        let mut row = vec![Cell::Empty; 8];
        row.push(debit);
        row.push(credit);
        Sheet::from_rows(vec![vec![], vec![], row])
    }

    #[test]
    fn test_credit_balance_is_negative() {
        let sheet = balance_sheet(Cell::Empty, Cell::Number(250.0));
        let b = read_balance(&sheet, &StatementTemplate::default(), 2, "opening").unwrap();
        assert_eq!(b, Decimal::from_str("-250.00").unwrap());
    }

    #[test]
    fn test_debit_balance_is_positive() {
        let sheet = balance_sheet(Cell::text("1,000.00"), Cell::Empty);
        let b = read_balance(&sheet, &StatementTemplate::default(), 2, "opening").unwrap();
        assert_eq!(b.to_string(), "1000.00");
    }

    #[test]
    fn test_empty_pair_is_missing_balance() {
        let sheet = balance_sheet(Cell::Empty, Cell::text(" "));
        let err = read_balance(&sheet, &StatementTemplate::default(), 2, "closing").unwrap_err();
        assert!(matches!(err, ConvertError::MissingBalance { row: 3, .. }));
        assert_eq!(err.to_string(), "no usable closing balance in I3/J3");
    }

    #[test]
    fn test_garbage_balance_is_parse_error() {
        let sheet = balance_sheet(Cell::text("n/a"), Cell::Empty);
        let err = read_balance(&sheet, &StatementTemplate::default(), 2, "opening").unwrap_err();
        assert!(matches!(err, ConvertError::NumericParse { .. }));
    }

    #[test]
    fn test_read_header_period() {
        let mut rows = vec![vec![]; 3];
        rows.push(vec![Cell::Empty, Cell::text(" 01/01/2024 - 03/31/2024 ")]);
        let sheet = Sheet::from_rows(rows);
        let header = read_header(&sheet, &StatementTemplate::default());
        assert_eq!(header.period, "01/01/2024 - 03/31/2024");
        let empty = read_header(&Sheet::default(), &StatementTemplate::default());
        assert!(empty.period.is_empty());
    }
}
