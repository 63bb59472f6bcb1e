use nfextract::table::*;
use nfextract::{Field, nfe};

const PROC_NFE: &str = include_str!("../tests/fixtures/nfe_proc_two_items.xml");

fn main() {
    let records = nfe::extract(PROC_NFE.as_bytes()).expect("NF-e extraction failed");
    println!("=== {} line items ===\n", records.len());

    let table = Table::from_records(
        &records,
        &[
            "Numero_NF",
            "Data_Emissao",
            "Item",
            "Codigo_Produto",
            "CFOP",
            "Valor_Produto",
            "ICMS_CST",
            "Valor_ICMS",
            "Total_vNF",
        ],
    );
    let csv = table
        .to_csv_string(&CsvConfig::default())
        .expect("CSV export failed");
    println!("--- CSV ---");
    print!("{csv}");

    println!("\n--- By CFOP ---");
    for row in summarize(&records, Field::Cfop, &[Field::ProductAmount, Field::IcmsAmount]) {
        println!(
            "{}: {} item(s), vProd {}, vICMS {}",
            row.key,
            row.count,
            row.sum(Field::ProductAmount).unwrap_or_default(),
            row.sum(Field::IcmsAmount).unwrap_or_default(),
        );
    }
}
