//! CSV rendering of a [`Table`].
//!
//! Semicolon-separated by default, the usual choice for spreadsheets in
//! a comma-decimal locale. Values are written verbatim.

use std::io::Write;

use super::{CsvConfig, Table};
use crate::core::ExtractError;

fn export_err(e: impl std::fmt::Display) -> ExtractError {
    ExtractError::Export(format!("CSV write error: {e}"))
}

impl Table {
    /// Write the table as CSV to `writer`.
    pub fn write_csv<W: Write>(&self, writer: W, config: &CsvConfig) -> Result<(), ExtractError> {
        let mut out = csv::WriterBuilder::new()
            .delimiter(config.delimiter)
            .has_headers(false)
            .from_writer(writer);

        if config.include_header {
            out.write_record(self.column_names()).map_err(export_err)?;
        }
        for row in &self.rows {
            out.write_record(row).map_err(export_err)?;
        }
        out.flush().map_err(export_err)?;
        Ok(())
    }

    /// Render the table as a CSV string.
    pub fn to_csv_string(&self, config: &CsvConfig) -> Result<String, ExtractError> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf, config)?;
        String::from_utf8(buf).map_err(export_err)
    }
}
