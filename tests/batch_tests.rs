#![cfg(feature = "batch")]

mod common;

use common::*;
use nfextract::Field;
use nfextract::batch::*;

fn valid(number: &str, items: usize) -> Vec<u8> {
    let dets: Vec<String> = (1..=items).map(|i| det(i, &format!("P{i}"), "")).collect();
    nfe_doc(number, &dets, Some(&icms_tot("10.00"))).into_bytes()
}

#[test]
fn failures_do_not_discard_other_sources() {
    let report = extract_batch([
        ("001.xml", valid("1", 2)),
        ("002.xml", b"<NFe><infNFe>".to_vec()),
        ("003.xml", valid("3", 1)),
    ]);
    assert_eq!(report.records.len(), 3);
    assert_eq!(report.extracted, 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].source, "002.xml");
    assert!(!report.is_clean());

    let numbers: Vec<_> = report
        .records
        .iter()
        .map(|r| r.get(Field::InvoiceNumber))
        .collect();
    assert_eq!(numbers, ["1", "1", "3"]);
}

#[test]
fn non_xml_sources_are_skipped() {
    let report = extract_batch([("danfe.pdf", b"%PDF-1.7".to_vec()), ("a.XML", valid("9", 1))]);
    assert!(report.is_clean());
    assert_eq!(report.skipped, 1);
    assert_eq!(report.records.len(), 1);
}

#[cfg(feature = "archive")]
mod archive {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    fn zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content) in entries {
            if name.ends_with('/') {
                writer
                    .add_directory(name.trim_end_matches('/'), SimpleFileOptions::default())
                    .unwrap();
                continue;
            }
            writer.start_file(*name, SimpleFileOptions::default()).unwrap();
            writer.write_all(content).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn archive_with_one_malformed_document() {
        let a = valid("100", 2);
        let b = valid("200", 1);
        let archive = zip(&[
            ("notas/", b""),
            ("notas/100.xml", &a),
            ("notas/quebrada.xml", b"<NFe xmlns=\"http://www.portalfiscal.inf.br/nfe\"><infNFe>"),
            ("notas/200.xml", &b),
            ("notas/leia-me.txt", b"ignore me"),
        ]);

        let report = extract_archive(&archive).unwrap();
        assert_eq!(report.records.len(), 3);
        assert_eq!(report.extracted, 2);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].source, "notas/quebrada.xml");
        assert!(matches!(report.failures[0].error, nfextract::ExtractError::Xml(_)));
    }

    #[test]
    fn empty_archive_is_clean() {
        let report = extract_archive(&zip(&[])).unwrap();
        assert!(report.is_clean());
        assert!(report.records.is_empty());
    }

    #[test]
    fn corrupt_archive_is_an_error() {
        assert!(extract_archive(b"PK\x03\x04 truncated").is_err());
    }
}
