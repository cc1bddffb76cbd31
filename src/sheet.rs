use std::fmt;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ConvertError;

/// A single spreadsheet value, reduced to what the statement parser cares about.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Date(NaiveDate),
}

static EMPTY: Cell = Cell::Empty;

impl Cell {
    pub fn text(s: &str) -> Self {
        if s.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(s.to_string())
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Text rendering of the cell; whole numbers drop their decimals (`1.0` → `"1"`).
    pub fn as_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", *n as i64),
            Cell::Number(n) => n.to_string(),
            Cell::Date(d) => d.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Zero-based column index, written as spreadsheet letters in config and messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Column(pub usize);

impl Column {
    pub fn parse(letters: &str) -> Option<Column> {
        let letters = letters.trim();
        if letters.is_empty() {
            return None;
        }
        let mut index = 0usize;
        for c in letters.chars() {
            if !c.is_ascii_alphabetic() {
                return None;
            }
            let digit = (c.to_ascii_uppercase() as u8 - b'A') as usize + 1;
            index = index.checked_mul(26)?.checked_add(digit)?;
        }
        Some(Column(index - 1))
    }

    /// `A1`-style reference for a zero-based row.
    pub fn cell_ref(&self, row: usize) -> String {
        format!("{self}{}", row + 1)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut n = self.0 + 1;
        let mut letters = Vec::new();
        while n > 0 {
            let rem = (n - 1) % 26;
            letters.push((b'A' + rem as u8) as char);
            n = (n - 1) / 26;
        }
        let s: String = letters.into_iter().rev().collect();
        f.write_str(&s)
    }
}

impl TryFrom<String> for Column {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        Column::parse(&value).ok_or_else(|| format!("invalid column letters: {value:?}"))
    }
}

impl From<Column> for String {
    fn from(col: Column) -> String {
        col.to_string()
    }
}

/// Rectangular grid of cells from the first worksheet of a statement export.
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    rows: Vec<Vec<Cell>>,
}

impl Sheet {
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Out-of-range coordinates read as `Cell::Empty`.
    pub fn cell(&self, column: Column, row: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|r| r.get(column.0))
            .unwrap_or(&EMPTY)
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

pub fn open_sheet(path: &Path) -> Result<Sheet, ConvertError> {
    let is_csv = path
        .extension()
        .map_or(false, |e| e.eq_ignore_ascii_case("csv"));
    if is_csv {
        read_csv(path)
    } else {
        read_workbook(path)
    }
}

fn read_csv(path: &Path) -> Result<Sheet, ConvertError> {
    let file = std::fs::File::open(path)
        .map_err(|e| ConvertError::SheetRead(format!("{}: {e}", path.display())))?;
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(std::io::BufReader::new(file));
    // The csv reader drops completely blank lines; exports keep spacer rows as ",,,".
    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(|e| ConvertError::SheetRead(e.to_string()))?;
        rows.push(record.iter().map(Cell::text).collect());
    }
    log::debug!("read {} csv rows from {}", rows.len(), path.display());
    Ok(Sheet::from_rows(rows))
}

fn read_workbook(path: &Path) -> Result<Sheet, ConvertError> {
    use calamine::Reader;

    let mut workbook = calamine::open_workbook_auto(path)
        .map_err(|e| ConvertError::SheetRead(format!("{}: {e}", path.display())))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ConvertError::SheetRead("workbook has no worksheets".to_string()))?
        .map_err(|e| ConvertError::SheetRead(e.to_string()))?;

    // Ranges start at the first used cell; pad so row/column indices stay absolute.
    let (row_start, col_start) = range
        .start()
        .map(|(r, c)| (r as usize, c as usize))
        .unwrap_or((0, 0));
    let mut rows: Vec<Vec<Cell>> = vec![Vec::new(); row_start];
    for row in range.rows() {
        let mut cells = vec![Cell::Empty; col_start];
        cells.extend(row.iter().map(from_calamine));
        rows.push(cells);
    }
    log::debug!("read {} worksheet rows from {}", rows.len(), path.display());
    Ok(Sheet::from_rows(rows))
}

fn from_calamine(data: &calamine::Data) -> Cell {
    use calamine::Data;
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::String(s) => Cell::text(s),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Text(if *b { "TRUE" } else { "FALSE" }.to_string()),
        Data::DateTime(dt) => match excel_serial_to_date(dt.as_f64()) {
            Some(d) => Cell::Date(d),
            None => Cell::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) => match s.get(..10).and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok()) {
            Some(d) => Cell::Date(d),
            None => Cell::text(s),
        },
        Data::DurationIso(s) => Cell::text(s),
    }
}

pub fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 {
        return None;
    }
    // Excel epoch is 1899-12-30 (accounting for the 1900 leap year bug)
    let base = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    base.checked_add_signed(chrono::Duration::days(serial.trunc() as i64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_letters() {
        assert_eq!(Column::parse("A"), Some(Column(0)));
        assert_eq!(Column::parse("k"), Some(Column(10)));
        assert_eq!(Column::parse("AA"), Some(Column(26)));
        assert_eq!(Column::parse("A1"), None);
        assert_eq!(Column::parse(""), None);
        assert_eq!(Column(9).to_string(), "J");
        assert_eq!(Column(27).to_string(), "AB");
        assert_eq!(Column(8).cell_ref(6), "I7");
    }

    #[test]
    fn test_column_serde_as_letters() {
        let json = serde_json::to_string(&Column(3)).unwrap();
        assert_eq!(json, "\"D\"");
        let col: Column = serde_json::from_str("\"H\"").unwrap();
        assert_eq!(col, Column(7));
        assert!(serde_json::from_str::<Column>("\"7\"").is_err());
    }

    #[test]
    fn test_out_of_range_cells_are_empty() {
        let sheet = Sheet::from_rows(vec![vec![Cell::text("x")]]);
        assert_eq!(sheet.cell(Column(0), 0), &Cell::Text("x".into()));
        assert_eq!(sheet.cell(Column(5), 0), &Cell::Empty);
        assert_eq!(sheet.cell(Column(0), 9), &Cell::Empty);
        assert_eq!(sheet.height(), 1);
        assert_eq!(sheet.width(), 1);
    }

    #[test]
    fn test_cell_as_text() {
        assert_eq!(Cell::Number(1.0).as_text(), "1");
        assert_eq!(Cell::Number(2.5).as_text(), "2.5");
        assert!(Cell::text("   ").is_empty());
        assert_eq!(Cell::text(""), Cell::Empty);
    }

    #[test]
    fn test_excel_serial_to_date() {
        assert_eq!(
            excel_serial_to_date(45667.0),
            NaiveDate::from_ymd_opt(2025, 1, 10)
        );
        assert_eq!(excel_serial_to_date(0.0), None);
        assert_eq!(excel_serial_to_date(f64::NAN), None);
    }

    #[test]
    fn test_open_csv_sheet() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gl.csv");
        std::fs::write(&path, "a,,c\n,,\nTYPE,Ref\n").unwrap();
        let sheet = open_sheet(&path).unwrap();
        assert_eq!(sheet.cell(Column(0), 0), &Cell::Text("a".into()));
        assert_eq!(sheet.cell(Column(1), 0), &Cell::Empty);
        assert_eq!(sheet.cell(Column(0), 1), &Cell::Empty);
        assert_eq!(sheet.cell(Column(1), 2), &Cell::Text("Ref".into()));
    }

    #[test]
    fn test_open_missing_workbook_is_sheet_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = open_sheet(&dir.path().join("missing.xls")).unwrap_err();
        assert!(matches!(err, ConvertError::SheetRead(_)));
    }
}
