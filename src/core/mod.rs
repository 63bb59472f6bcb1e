//! Core NF-e types, the flat record model, and error handling.
//!
//! [`Document`] is the typed view of one `infNFe` node, with every scalar
//! kept as `Option<String>`. [`FlatRecord`] is the tabular view: one row per
//! line item, every [`Field`] present, absent values rendered as `""`.

mod config;
mod date;
mod error;
mod record;
mod types;

pub use config::*;
pub use date::*;
pub use error::*;
pub use record::*;
pub use types::*;
