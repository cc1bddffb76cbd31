use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

use crate::amount::{signed_amount, to_cents};
use crate::models::{TransactionRecord, TransactionRow};

// "[0042] Acme Corp/Invoice 17" -> "Acme Corp"
static PAYEE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\] ([^/|\r\n]+)").unwrap());

/// Name following the first `"] "` marker, up to `/`, `|` or a line break.
pub fn extract_payee(person_item: &str) -> Option<String> {
    let payee = PAYEE.captures(person_item)?.get(1)?.as_str().trim();
    if payee.is_empty() {
        None
    } else {
        Some(payee.to_string())
    }
}

pub fn strip_newlines(s: &str) -> String {
    s.chars().filter(|c| *c != '\n' && *c != '\r').collect()
}

pub fn to_record(row: TransactionRow) -> TransactionRecord {
    let amount = signed_amount(row.debit, row.credit).unwrap_or_else(|| to_cents(Decimal::ZERO));
    TransactionRecord {
        date: row.date,
        amount,
        description: format!("{}: {}", row.kind, strip_newlines(&row.memo)),
        payee: extract_payee(&row.person_item),
        reference: row.reference,
    }
}
