use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::sheet::Column;

/// Columns of one transaction row in the GL report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionColumns {
    #[serde(rename = "type")]
    pub kind: Column,
    pub reference: Column,
    pub sequence: Column,
    pub date: Column,
    pub dimension: Column,
    pub person_item: Column,
    pub memo: Column,
    pub debit: Column,
    pub credit: Column,
    pub balance: Column,
}

impl Default for TransactionColumns {
    fn default() -> Self {
        // Column F is unused in the FrontAccounting export.
        Self {
            kind: Column(0),
            reference: Column(1),
            sequence: Column(2),
            date: Column(3),
            dimension: Column(4),
            person_item: Column(6),
            memo: Column(7),
            debit: Column(8),
            credit: Column(9),
            balance: Column(10),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellPosition {
    pub column: Column,
    /// Zero-based sheet row.
    pub row: usize,
}

/// Where everything lives in a GL statement export, relative to the header row.
///
/// All row arithmetic goes through the methods below so that a different
/// export layout only needs a different template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatementTemplate {
    pub header_column: Column,
    pub header_label: String,
    pub period: CellPosition,
    pub opening_offset: usize,
    pub transactions_offset: usize,
    /// Rows between the block terminator and the closing balance.
    pub closing_offset: usize,
    pub balance_debit: Column,
    pub balance_credit: Column,
    pub columns: TransactionColumns,
}

impl Default for StatementTemplate {
    fn default() -> Self {
        Self {
            header_column: Column(0),
            header_label: "TYPE".to_string(),
            period: CellPosition {
                column: Column(1),
                row: 3,
            },
            opening_offset: 1,
            transactions_offset: 3,
            closing_offset: 1,
            balance_debit: Column(8),
            balance_credit: Column(9),
            columns: TransactionColumns::default(),
        }
    }
}

impl StatementTemplate {
    pub fn opening_row(&self, header_row: usize) -> usize {
        header_row + self.opening_offset
    }

    pub fn block_start(&self, header_row: usize) -> usize {
        header_row + self.transactions_offset
    }

    pub fn closing_row(&self, header_row: usize, stop_offset: usize) -> usize {
        self.block_start(header_row) + stop_offset + self.closing_offset
    }

    /// Number of columns a sheet must span to hold a transaction row.
    pub fn required_width(&self) -> usize {
        let c = &self.columns;
        [
            c.kind, c.reference, c.sequence, c.date, c.dimension, c.person_item, c.memo, c.debit,
            c.credit, c.balance,
        ]
        .iter()
        .map(|col| col.0)
        .max()
        .unwrap_or(0)
            + 1
    }

    pub fn load(path: &Path) -> Result<StatementTemplate> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| AppError::Template(format!("{}: {e}", path.display())))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| AppError::Template(e.to_string()))
    }
}
