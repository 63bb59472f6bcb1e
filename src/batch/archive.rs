use std::io::{Cursor, Read};

use tracing::debug;
use zip::ZipArchive;

use super::{BatchReport, is_xml_name};
use crate::core::{ExtractConfig, ExtractError};

/// Upper bound on the buffer reserved from an entry's declared size.
const MAX_PREALLOC: usize = 16 * 1024 * 1024;

/// Extract every `.xml` entry of a zip archive with the default config.
pub fn extract_archive(bytes: &[u8]) -> Result<BatchReport, ExtractError> {
    extract_archive_with(bytes, &ExtractConfig::default())
}

/// Extract every `.xml` entry of a zip archive.
///
/// An archive that cannot be opened is an error. Entries are processed in
/// archive order; an entry that cannot be read or parsed becomes a
/// [`BatchFailure`](super::BatchFailure) and the rest continue. Directories
/// and entries without the `.xml` suffix are ignored.
pub fn extract_archive_with(
    bytes: &[u8],
    config: &ExtractConfig,
) -> Result<BatchReport, ExtractError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ExtractError::Archive(format!("failed to open zip archive: {e}")))?;
    debug!(entries = archive.len(), "opened zip archive");

    let mut report = BatchReport::default();
    for index in 0..archive.len() {
        let mut entry = match archive.by_index(index) {
            Ok(entry) => entry,
            Err(e) => {
                report.push_failure(
                    &format!("#{index}"),
                    ExtractError::Archive(format!("failed to open entry: {e}")),
                );
                continue;
            }
        };
        if entry.is_dir() {
            continue;
        }
        let name = entry.name().to_string();
        if !is_xml_name(&name) {
            debug!(entry = %name, "skipping non-XML archive entry");
            report.skipped += 1;
            continue;
        }

        let mut content = Vec::with_capacity((entry.size() as usize).min(MAX_PREALLOC));
        if let Err(e) = entry.read_to_end(&mut content) {
            report.push_failure(
                &name,
                ExtractError::Archive(format!("failed to read entry: {e}")),
            );
            continue;
        }
        report.push_source(&name, &content, config);
    }
    Ok(report)
}
