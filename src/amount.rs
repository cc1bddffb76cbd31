use std::str::FromStr;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::ConvertError;
use crate::sheet::{Cell, Column};

/// Round half away from zero to cents and pin the scale, so `200` renders as `200.00`.
pub fn to_cents(value: Decimal) -> Decimal {
    let mut cents = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    cents.rescale(2);
    if cents.is_zero() {
        cents.set_sign_positive(true);
    }
    cents
}

/// Parse a text amount: grouping commas, `$` and inner spaces are dropped,
/// `(x)` means `-x`. More than one decimal point is rejected.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let s: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, ',' | '$' | '"') && !c.is_whitespace())
        .collect();
    let (negative, s) = match s.strip_prefix('(').and_then(|v| v.strip_suffix(')')) {
        Some(inner) => (true, inner.to_string()),
        None => (false, s),
    };
    if s.is_empty() || s.matches('.').count() > 1 {
        return None;
    }
    let value = Decimal::from_str(&s).ok()?;
    Some(to_cents(if negative { -value } else { value }))
}

/// Coerce one cell to a cent-precision decimal. Empty cells are `None`.
pub fn cell_decimal(cell: &Cell, column: Column, row: usize) -> Result<Option<Decimal>, ConvertError> {
    let parse_error = || ConvertError::NumericParse {
        cell: column.cell_ref(row),
        raw: cell.as_text(),
    };
    match cell {
        _ if cell.is_empty() => Ok(None),
        Cell::Number(n) => Decimal::from_f64(*n)
            .map(|d| Some(to_cents(d)))
            .ok_or_else(parse_error),
        Cell::Text(s) => parse_amount(s).map(Some).ok_or_else(parse_error),
        _ => Err(parse_error()),
    }
}

/// The GL report sign convention: a credit makes the amount negative, otherwise
/// the debit is taken as is. A zero credit next to a debit does not count.
pub fn signed_amount(debit: Option<Decimal>, credit: Option<Decimal>) -> Option<Decimal> {
    match (debit, credit) {
        (_, Some(c)) if !c.is_zero() => Some(-c),
        (Some(d), _) => Some(d),
        (None, c) => c,
    }
}
