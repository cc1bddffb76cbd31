use crate::error::ConvertError;
use crate::sheet::Sheet;
use crate::template::StatementTemplate;

/// Row index of the first cell in the header column reading as the header label,
/// ignoring case and surrounding whitespace.
pub fn find_header_row(sheet: &Sheet, template: &StatementTemplate) -> Result<usize, ConvertError> {
    let label = template.header_label.trim().to_uppercase();
    (0..sheet.height())
        .find(|&row| {
            sheet
                .cell(template.header_column, row)
                .as_text()
                .trim()
                .to_uppercase()
                == label
        })
        .ok_or_else(|| ConvertError::Layout {
            label: template.header_label.clone(),
            column: template.header_column.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::Cell;

    fn column_a(values: &[&str]) -> Sheet {
        Sheet::from_rows(values.iter().map(|v| vec![Cell::text(v)]).collect())
    }

    #[test]
    fn test_finds_header_case_insensitive() {
        let sheet = column_a(&["GL Account Transactions", "", "  type ", "Opening"]);
        assert_eq!(find_header_row(&sheet, &StatementTemplate::default()).unwrap(), 2);
    }

    #[test]
    fn test_first_match_wins() {
        let sheet = column_a(&["TYPE", "TYPE"]);
        assert_eq!(find_header_row(&sheet, &StatementTemplate::default()).unwrap(), 0);
    }

    #[test]
    fn test_blank_rows_shift_header() {
        let template = StatementTemplate::default();
        for extra in 0..4 {
            let mut values = vec![""; 5 + extra];
            values.push("TYPE");
            let sheet = column_a(&values);
            let header = find_header_row(&sheet, &template).unwrap();
            assert_eq!(header, 5 + extra);
            assert_eq!(template.opening_row(header), 6 + extra);
        }
    }

    #[test]
    fn test_missing_header_is_layout_error() {
        let sheet = column_a(&["Typ", "Types"]);
        let err = find_header_row(&sheet, &StatementTemplate::default()).unwrap_err();
        assert!(matches!(err, ConvertError::Layout { .. }));
        assert!(err.to_string().contains("'TYPE' in column A"));
    }
}
