//! # nfextract
//!
//! Flattens Brazilian NF-e fiscal invoice XML into tabular records: one
//! row per line item, with the invoice header and totals repeated on
//! every row, ready for spreadsheet export.
//!
//! Tax blocks are resolved across their schema variants: the ICMS regime
//! shapes (CST and Simples Nacional CSOSN), PIS and COFINS (aliquot,
//! quantity, not taxed, other) and the IBS/CBS group.
//!
//! All values stay strings exactly as written in the XML. Nothing is
//! rounded or converted; absent elements become empty strings.
//!
//! ## Quick Start
//!
//! ```rust
//! use nfextract::{Field, nfe};
//!
//! let xml = r#"<NFe xmlns="http://www.portalfiscal.inf.br/nfe">
//!   <infNFe versao="4.00">
//!     <ide><nNF>42</nNF><serie>1</serie><dhEmi>2024-01-19T10:30:00-03:00</dhEmi></ide>
//!     <det nItem="1">
//!       <prod><cProd>P-01</cProd><CFOP>5405</CFOP></prod>
//!       <imposto><ICMS><ICMS60><orig>0</orig><CST>60</CST></ICMS60></ICMS></imposto>
//!     </det>
//!     <total><ICMSTot><vNF>10.00</vNF></ICMSTot></total>
//!   </infNFe>
//! </NFe>"#;
//!
//! let records = nfe::extract(xml.as_bytes()).unwrap();
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].get(Field::IssueDate), "19/01/2024");
//! assert_eq!(records[0].get(Field::IcmsCst), "60");
//! assert_eq!(records[0].get(Field::IcmsAliquot), "");
//! assert_eq!(records[0].get(Field::TotalInvoiceAmount), "10.00");
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Types, flat records, NF-e extraction |
//! | `batch` | Multi-source extraction with per-source failure isolation |
//! | `archive` | Zip archive intake for `batch` |
//! | `table` | Column selection, CSV export, group-by summaries |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "core")]
pub mod nfe;

#[cfg(feature = "batch")]
pub mod batch;

#[cfg(feature = "table")]
pub mod table;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
