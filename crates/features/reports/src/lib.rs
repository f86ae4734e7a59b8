//! Report feature slice.
//!
//! Reads registrations without locking and turns them into a [`Table`], flat or
//! grouped by gender for the sports event, then into an xlsx download.

#[cfg(feature = "server")]
pub mod api;
mod error;
pub mod table;
pub mod xlsx;

pub use crate::error::{ReportError, ReportErrorExt};
pub use crate::table::{Layout, Line, Section, Table, build_report};
pub use crate::xlsx::{XLSX_MIME, download_filename, render_xlsx, sheet_name};

use evreg_kernel::Stores;
use evreg_kernel::domain::registry::InitializedSlice;
use tracing::info;

/// A rendered spreadsheet ready to be served.
#[derive(Debug, Clone)]
pub struct Export {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub rows: usize,
}

/// Reports feature state
#[evreg_derive::evreg_slice]
pub struct Reports {
    stores: Stores,
}

impl Reports {
    #[must_use]
    pub fn from_stores(stores: Stores) -> Self {
        Self::new(ReportsInner { stores })
    }

    /// Builds the table for `filter` from the current registrations.
    ///
    /// # Errors
    /// [`ReportError::Storage`] when registrations cannot be read.
    pub async fn table(&self, filter: Option<&str>) -> Result<Table, ReportError> {
        let registrations = self.stores.registrations.load().await.context("Loading registrations")?;
        Ok(build_report(&registrations, filter))
    }

    /// Builds and renders the spreadsheet for `filter`.
    ///
    /// # Errors
    /// [`ReportError::Storage`] or [`ReportError::Export`].
    pub async fn export(&self, filter: Option<&str>) -> Result<Export, ReportError> {
        let table = self.table(filter).await?;
        let bytes = render_xlsx(&table)?;
        let filename = download_filename(table.filter.as_deref());

        info!(filter = ?table.filter, rows = table.row_count(), bytes = bytes.len(), "Report exported");
        Ok(Export { filename, bytes, rows: table.row_count() })
    }
}

/// Initialize the reports feature.
///
/// # Errors
/// Infallible today; kept fallible like every slice initializer.
pub fn init(stores: &Stores) -> Result<InitializedSlice, ReportError> {
    tracing::info!("Reports slice initialized");
    Ok(InitializedSlice::new(Reports::from_stores(stores.clone())))
}
