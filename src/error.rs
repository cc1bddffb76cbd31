use std::path::PathBuf;

use rust_decimal::Decimal;
use thiserror::Error;

/// Why a statement could not be turned into a ledger.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("no row with '{label}' in column {column} (statement layout not recognized)")]
    Layout { label: String, column: String },

    #[error("no usable {which} balance in {debit}{row}/{credit}{row}")]
    MissingBalance {
        which: &'static str,
        debit: String,
        credit: String,
        row: usize,
    },

    #[error("cell {cell} is not a number: {raw:?}")]
    NumericParse { cell: String, raw: String },

    #[error("cannot read sheet: {0}")]
    SheetRead(String),

    #[error("final calculated balance {calculated} does not match closing balance {closing}")]
    BalanceMismatch { calculated: Decimal, closing: Decimal },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A failed conversion, carrying the input that caused it.
#[derive(Error, Debug)]
#[error("Failed to convert {} to QIF: {source}", .path.display())]
pub struct ConversionError {
    pub path: PathBuf,
    #[source]
    pub source: ConvertError,
}

impl ConversionError {
    pub fn new(path: impl Into<PathBuf>, source: ConvertError) -> Self {
        Self {
            path: path.into(),
            source,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
