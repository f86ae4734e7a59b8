//! Spreadsheet rendering of a [`Table`].

use crate::error::{ReportError, ReportErrorExt};
use crate::table::{COLUMNS, Line, Table};
use rust_xlsxwriter::{Format, Workbook};

pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const DEFAULT_SHEET: &str = "Registrations";
const MAX_SHEET_NAME: usize = 31;
const MAX_COLUMN_WIDTH: usize = 255;

/// Renders `table` as a single-sheet workbook.
///
/// The sheet is named after the filter, header and label rows are bold, and column
/// widths come from [`Table::column_widths`].
///
/// # Errors
/// [`ReportError::Export`] if the workbook cannot be assembled.
pub fn render_xlsx(table: &Table) -> Result<Vec<u8>, ReportError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let label = Format::new().set_bold().set_italic();

    {
        let sheet = workbook.add_worksheet();
        sheet.set_name(sheet_name(table.filter.as_deref())).context("Naming worksheet")?;

        for (row, line) in (0u32..).zip(table.lines()) {
            match line {
                Line::Blank => {},
                Line::Label(text) => {
                    sheet.write_string_with_format(row, 0, text, &label)?;
                },
                Line::Header => {
                    for (col, title) in (0u16..).zip(COLUMNS) {
                        sheet.write_string_with_format(row, col, title, &header)?;
                    }
                },
                Line::Data(cells) => {
                    for (col, cell) in (0u16..).zip(cells) {
                        sheet.write_string(row, col, cell)?;
                    }
                },
            }
        }

        for (col, width) in (0u16..).zip(table.column_widths()) {
            let width = u16::try_from(width.min(MAX_COLUMN_WIDTH)).unwrap_or(u16::MAX);
            sheet.set_column_width(col, width)?;
        }
    }

    workbook.save_to_buffer().context("Serializing workbook")
}

/// Sheet title for `filter`, within Excel's naming rules.
#[must_use]
pub fn sheet_name(filter: Option<&str>) -> String {
    let cleaned: String = filter
        .unwrap_or_default()
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\'))
        .take(MAX_SHEET_NAME)
        .collect();
    let cleaned = cleaned.trim_matches(|c: char| c == '\'' || c.is_whitespace());

    if cleaned.is_empty() { DEFAULT_SHEET.to_owned() } else { cleaned.to_owned() }
}

/// Download name: `{event}_registrations.xlsx`, or `registrations.xlsx` without a filter.
#[must_use]
pub fn download_filename(filter: Option<&str>) -> String {
    match filter {
        Some(event) => {
            let safe: String = event
                .chars()
                .map(|c| if c.is_control() || matches!(c, '"' | '\\' | '/') { '_' } else { c })
                .collect();
            format!("{safe}_registrations.xlsx")
        },
        None => "registrations.xlsx".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::build_report;
    use evreg_kernel::domain::models::Registration;

    #[test]
    fn sheet_names_follow_excel_rules() {
        assert_eq!(sheet_name(None), "Registrations");
        assert_eq!(sheet_name(Some("Chess")), "Chess");
        assert_eq!(sheet_name(Some("Q&A: [Live]?")), "Q&A Live");
        assert_eq!(sheet_name(Some("///")), "Registrations");
        assert_eq!(sheet_name(Some(&"x".repeat(40))).chars().count(), 31);
    }

    #[test]
    fn filenames() {
        assert_eq!(download_filename(None), "registrations.xlsx");
        assert_eq!(download_filename(Some("Chess")), "Chess_registrations.xlsx");
        assert_eq!(download_filename(Some("a/\"b\"")), "a__b__registrations.xlsx");
    }

    #[test]
    fn renders_a_zip_container() {
        let regs = vec![Registration {
            student_id: "202300000001".to_owned(),
            gender: Some("female".to_owned()),
            events: vec!["Sports".to_owned()],
            ..Registration::default()
        }];

        for filter in [None, Some("sports")] {
            let bytes = render_xlsx(&build_report(&regs, filter)).unwrap();
            assert!(bytes.starts_with(b"PK"), "xlsx files are zip archives");
        }
    }
}
