//! Tabular views over flat records.
//!
//! - [`Table`] picks and orders columns (caller-preferred order, unknown
//!   names dropped) and writes CSV.
//! - [`summarize`] groups records by one field and sums others.
//!
//! Values are passed through as extracted. Nothing here rounds or
//! reformats a field; summary sums are plain [`rust_decimal::Decimal`]s.
//!
//! # Example
//!
//! ```no_run
//! use nfextract::{Field, nfe, table::*};
//!
//! let xml = std::fs::read("nfe.xml")?;
//! let records = nfe::extract(&xml)?;
//! let table = Table::from_records(&records, &["Numero_NF", "CFOP", "Valor_Produto"]);
//! let csv = table.to_csv_string(&CsvConfig::default())?;
//!
//! let by_cfop = summarize(&records, Field::Cfop, &[Field::ProductAmount, Field::IcmsAmount]);
//! print!("{csv}");
//! println!("{} CFOP groups", by_cfop.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod csv_export;
mod summary;

use serde::{Deserialize, Serialize};

use crate::core::{Field, FlatRecord};

pub use summary::{SummaryRow, summarize};

/// CSV output options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvConfig {
    /// Field separator byte.
    pub delimiter: u8,
    /// Write the column names as the first row.
    pub include_header: bool,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: b';',
            include_header: true,
        }
    }
}

/// Records laid out as rows under a fixed column list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    columns: Vec<Field>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Lay out `records` under the `preferred` column names.
    ///
    /// Columns appear in `preferred` order. Names that are not a known
    /// field or that repeat are omitted; with no records no column is
    /// observed, so the table has none.
    pub fn from_records(records: &[FlatRecord], preferred: &[&str]) -> Self {
        let mut columns: Vec<Field> = Vec::with_capacity(preferred.len());
        if !records.is_empty() {
            for field in preferred.iter().filter_map(|name| Field::from_name(name)) {
                if !columns.contains(&field) {
                    columns.push(field);
                }
            }
        }
        Self::with_columns(records, columns)
    }

    /// Lay out `records` in canonical column order.
    pub fn canonical(records: &[FlatRecord]) -> Self {
        let names: Vec<&str> = Field::ALL.iter().map(|f| f.name()).collect();
        Self::from_records(records, &names)
    }

    fn with_columns(records: &[FlatRecord], columns: Vec<Field>) -> Self {
        let rows = records
            .iter()
            .map(|r| columns.iter().map(|c| r.get(*c).to_string()).collect())
            .collect();
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[Field] {
        &self.columns
    }

    /// Column names, in order.
    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.name()).collect()
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
