use std::io::{self, Write};

use chrono::format::{Item, StrftimeItems};

use crate::models::TransactionRecord;

pub const DEFAULT_DATE_FORMAT: &str = "%m/%d/%Y";

/// Whether chrono can render `format`; an unknown specifier would fail mid-write.
pub fn is_valid_date_format(format: &str) -> bool {
    StrftimeItems::new(format).all(|item| !matches!(item, Item::Error))
}

/// Write a QIF ledger: the `!Type:` header, then one record per transaction in order.
pub fn write_qif<W: Write>(
    mut w: W,
    account_type: &str,
    records: &[TransactionRecord],
    date_format: &str,
) -> io::Result<()> {
    if !is_valid_date_format(date_format) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("invalid date format {date_format:?}"),
        ));
    }
    writeln!(w, "!Type:{account_type}")?;
    for record in records {
        write_record(&mut w, record, date_format)?;
    }
    w.flush()
}

fn write_record<W: Write>(w: &mut W, record: &TransactionRecord, date_format: &str) -> io::Result<()> {
    writeln!(w, "D{}", record.date.format(date_format))?;
    writeln!(w, "T{:.2}", record.amount)?;
    writeln!(w, "N{}", record.reference)?;
    writeln!(w, "M{}", record.description)?;
    if let Some(payee) = &record.payee {
        writeln!(w, "P{payee}")?;
    }
    writeln!(w, "^")
}
