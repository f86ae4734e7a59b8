use evreg_storage::StorageError;
use rust_xlsxwriter::XlsxError;
use std::borrow::Cow;

/// A specialized [`ReportError`] enum of this crate.
#[evreg_derive::evreg_error]
pub enum ReportError {
    #[error("Spreadsheet export failed{}: {source}", format_context(.context))]
    Export { source: XlsxError, context: Option<Cow<'static, str>> },

    #[error("Report storage failure{}: {source}", format_context(.context))]
    Storage { source: StorageError, context: Option<Cow<'static, str>> },
}
