use std::io::{Cursor, Write};

use nfextract::Field;
use nfextract::batch::extract_archive;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

const PROC_NFE: &str = include_str!("../tests/fixtures/nfe_proc_two_items.xml");

fn main() {
    // Build an upload-style archive in memory: one good invoice, one
    // broken one and a stray PDF.
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in [
        ("2024-01/nfe-421.xml", PROC_NFE),
        ("2024-01/nfe-422.xml", "<NFe><infNFe>"),
        ("2024-01/danfe-421.pdf", "%PDF-1.4"),
    ] {
        writer
            .start_file(name, SimpleFileOptions::default())
            .expect("zip entry");
        writer.write_all(content.as_bytes()).expect("zip write");
    }
    let archive = writer.finish().expect("zip finish").into_inner();

    let report = extract_archive(&archive).expect("archive unreadable");

    println!("=== Archive Extraction ===\n");
    println!("Extracted sources: {}", report.extracted);
    println!("Skipped entries:   {}", report.skipped);
    println!("Records:           {}", report.records.len());

    for record in &report.records {
        println!(
            "  NF {} item {}: {} ({})",
            record.get(Field::InvoiceNumber),
            record.get(Field::ItemNumber),
            record.get(Field::ProductDescription),
            record.get(Field::ProductAmount),
        );
    }

    if !report.is_clean() {
        println!("\nFailures:");
        for failure in &report.failures {
            println!("  {}: {}", failure.source, failure.error);
        }
    }
}
