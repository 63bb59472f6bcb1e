//! Multi-document intake.
//!
//! Sources are processed one after another. A source that fails to parse
//! is recorded in [`BatchReport::failures`] and logged; records already
//! produced from other sources are kept.
//!
//! # Example
//!
//! ```no_run
//! use nfextract::batch::*;
//!
//! let report = extract_batch([
//!     ("a.xml".to_string(), std::fs::read("a.xml")?),
//!     ("b.xml".to_string(), std::fs::read("b.xml")?),
//! ]);
//! for failure in &report.failures {
//!     eprintln!("{}: {}", failure.source, failure.error);
//! }
//! # Ok::<(), std::io::Error>(())
//! ```

#[cfg(feature = "archive")]
mod archive;

#[cfg(feature = "archive")]
pub use archive::{extract_archive, extract_archive_with};

use tracing::{debug, warn};

use crate::core::{ExtractConfig, ExtractError, FlatRecord};
use crate::nfe;

/// A source that could not be extracted.
#[derive(Debug)]
pub struct BatchFailure {
    /// Source name (file or archive entry).
    pub source: String,
    pub error: ExtractError,
}

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Records of every successful source, in input order.
    pub records: Vec<FlatRecord>,
    /// Sources that failed, in input order.
    pub failures: Vec<BatchFailure>,
    /// Number of sources that were extracted successfully.
    pub extracted: usize,
    /// Number of sources skipped for not being `.xml`.
    pub skipped: usize,
}

impl BatchReport {
    /// `true` when no source failed.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Extract one named source into this report.
    pub fn push_source(&mut self, name: &str, bytes: &[u8], config: &ExtractConfig) {
        if !is_xml_name(name) {
            debug!(source = name, "skipping non-XML source");
            self.skipped += 1;
            return;
        }
        match nfe::extract_with(bytes, config) {
            Ok(records) => {
                debug!(source = name, records = records.len(), "extracted source");
                self.records.extend(records);
                self.extracted += 1;
            }
            Err(error) => self.push_failure(name, error),
        }
    }

    /// Record a failure for `name`.
    pub fn push_failure(&mut self, name: &str, error: ExtractError) {
        warn!(source = name, %error, "failed to extract source, skipping");
        self.failures.push(BatchFailure {
            source: name.to_string(),
            error,
        });
    }
}

/// Whether `name` carries the `.xml` suffix (case-insensitive).
pub fn is_xml_name(name: &str) -> bool {
    name.len() >= 4
        && name
            .get(name.len() - 4..)
            .is_some_and(|ext| ext.eq_ignore_ascii_case(".xml"))
}

/// Extract every `(name, bytes)` source with the default config.
pub fn extract_batch<N, B, I>(sources: I) -> BatchReport
where
    I: IntoIterator<Item = (N, B)>,
    N: AsRef<str>,
    B: AsRef<[u8]>,
{
    extract_batch_with(sources, &ExtractConfig::default())
}

/// Extract every `(name, bytes)` source, isolating per-source failures.
pub fn extract_batch_with<N, B, I>(sources: I, config: &ExtractConfig) -> BatchReport
where
    I: IntoIterator<Item = (N, B)>,
    N: AsRef<str>,
    B: AsRef<[u8]>,
{
    let mut report = BatchReport::default();
    for (name, bytes) in sources {
        report.push_source(name.as_ref(), bytes.as_ref(), config);
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xml_suffix_is_case_insensitive() {
        assert!(is_xml_name("nota.xml"));
        assert!(is_xml_name("dir/NOTA.XML"));
        assert!(!is_xml_name("nota.pdf"));
        assert!(!is_xml_name("xml"));
        assert!(!is_xml_name("notaxml"));
        assert!(!is_xml_name("ação"));
    }

    #[test]
    fn empty_batch_is_clean() {
        let report = extract_batch(Vec::<(String, Vec<u8>)>::new());
        assert!(report.is_clean());
        assert!(report.records.is_empty());
        assert_eq!(report.extracted, 0);
    }

    #[test]
    fn failure_is_recorded_not_fatal() {
        let report = extract_batch([("bad.xml", b"<oops".as_slice()), ("readme.txt", b"hi".as_slice())]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].source, "bad.xml");
        assert_eq!(report.skipped, 1);
        assert_eq!(report.extracted, 0);
    }
}
