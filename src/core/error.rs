use thiserror::Error;

/// Errors that can occur while reading or flattening NF-e documents.
///
/// Missing structure inside a well-formed document is never an error:
/// absent nodes, unrecognised tax variants and malformed dates all
/// degrade to empty (or raw) field values instead.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExtractError {
    /// The input is not well-formed XML.
    #[error("XML error: {0}")]
    Xml(String),

    /// A zip archive or one of its entries could not be read.
    #[error("archive error: {0}")]
    Archive(String),

    /// Reading a source failed.
    #[error("I/O error: {0}")]
    Io(String),

    /// Writing tabular output failed.
    #[error("export error: {0}")]
    Export(String),
}

impl From<std::io::Error> for ExtractError {
    fn from(e: std::io::Error) -> Self {
        ExtractError::Io(e.to_string())
    }
}
