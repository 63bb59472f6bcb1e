//! NF-e XML extraction.
//!
//! Reads NF-e documents (layout 4.00, namespace [`NFE_NAMESPACE`]) and
//! flattens them into one [`FlatRecord`] per line item (`det`), with the
//! document's identification, emitter and totals copied into every row.
//!
//! The input may be a bare `NFe`, an authorised `nfeProc` wrapper, or any
//! envelope containing several `NFe` nodes; each one found is flattened in
//! document order.
//!
//! # Example
//!
//! ```no_run
//! let xml = std::fs::read("35240112345678000195550010000000421000000421-procNFe.xml")?;
//! for record in nfextract::nfe::extract(&xml)? {
//!     println!("{} {}", record.get(nfextract::Field::InvoiceNumber), record.get(nfextract::Field::Cfop));
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod document;
mod taxes;
pub(crate) mod tree;

use std::io::Read;

use tracing::debug;

use crate::core::{Document, ExtractConfig, ExtractError, FlatRecord};

pub use taxes::{COFINS, ICMS, PIS, TaxGroup};

/// The NF-e namespace every looked-up element must belong to.
pub const NFE_NAMESPACE: &str = "http://www.portalfiscal.inf.br/nfe";

/// Parse every NF-e in `source` into the typed model.
///
/// `NFe` nodes without an `infNFe` child are skipped. A source with no
/// `NFe` node yields an empty vector.
pub fn parse_documents(source: &[u8]) -> Result<Vec<Document>, ExtractError> {
    let root = tree::parse_tree(source)?;
    let documents: Vec<Document> = root
        .find_all("NFe")
        .into_iter()
        .filter_map(|nfe| nfe.child("infNFe"))
        .map(document::read_document)
        .collect();
    debug!(documents = documents.len(), "parsed NF-e source");
    Ok(documents)
}

/// Flatten one document: one record per line item, in order.
///
/// Header and totals are merged into each row in a single pass after all
/// items are known, so no emitted record is mutated afterwards.
pub fn flatten(document: &Document, config: &ExtractConfig) -> Vec<FlatRecord> {
    document
        .items
        .iter()
        .map(|item| {
            FlatRecord::from_parts(&document.header, item, document.totals.as_ref(), config)
        })
        .collect()
}

/// Extract flat records from one XML source with the default config.
pub fn extract(source: &[u8]) -> Result<Vec<FlatRecord>, ExtractError> {
    extract_with(source, &ExtractConfig::default())
}

/// Extract flat records from one XML source.
///
/// Malformed XML is an error; anything missing inside a well-formed
/// document becomes an empty field.
pub fn extract_with(
    source: &[u8],
    config: &ExtractConfig,
) -> Result<Vec<FlatRecord>, ExtractError> {
    let records: Vec<FlatRecord> = parse_documents(source)?
        .iter()
        .flat_map(|doc| flatten(doc, config))
        .collect();
    debug!(records = records.len(), "flattened NF-e source");
    Ok(records)
}

/// Read `reader` to the end and extract it.
pub fn extract_reader<R: Read>(
    mut reader: R,
    config: &ExtractConfig,
) -> Result<Vec<FlatRecord>, ExtractError> {
    let mut source = Vec::new();
    reader.read_to_end(&mut source)?;
    extract_with(&source, config)
}
