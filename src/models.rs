use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Informational header of the GL report; never validated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatementHeader {
    pub period: String,
}

/// One row of the transaction block as read from the sheet.
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRow {
    pub kind: String,
    pub reference: String,
    pub sequence: String,
    pub date: NaiveDate,
    pub dimension: String,
    pub person_item: String,
    pub memo: String,
    /// `None` when the cell is empty; the sign convention needs to tell the two apart.
    pub debit: Option<Decimal>,
    pub credit: Option<Decimal>,
    pub statement_balance: Option<Decimal>,
}

/// Output of the extractor: the rows before the first dateless row, and that row's
/// offset from the start of the block.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub rows: Vec<TransactionRow>,
    pub stop_offset: usize,
}

/// A transaction ready to be written as one QIF record.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    pub date: NaiveDate,
    pub amount: Decimal,
    pub reference: String,
    pub description: String,
    pub payee: Option<String>,
}

/// A fully read and reconciled statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub header: StatementHeader,
    pub opening_balance: Decimal,
    pub closing_balance: Decimal,
    pub records: Vec<TransactionRecord>,
}
