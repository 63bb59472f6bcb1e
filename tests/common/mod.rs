#![allow(dead_code)]

pub const NS: &str = "http://www.portalfiscal.inf.br/nfe";

pub const TWO_ITEMS: &str = include_str!("../fixtures/nfe_proc_two_items.xml");

/// A `det` element with product code `code` and the given `imposto` body.
pub fn det(n: usize, code: &str, imposto: &str) -> String {
    format!(
        r#"<det nItem="{n}"><prod><cProd>{code}</cProd><xProd>ITEM {n}</xProd><CFOP>5102</CFOP><qCom>1.0000</qCom><vUnCom>10.00</vUnCom><vProd>10.00</vProd></prod><imposto>{imposto}</imposto></det>"#
    )
}

/// A `det` without any `imposto`.
pub fn det_untaxed(n: usize, code: &str) -> String {
    format!(r#"<det nItem="{n}"><prod><cProd>{code}</cProd></prod></det>"#)
}

/// A bare `NFe` document with header number `number` and the given items.
pub fn nfe_doc(number: &str, items: &[String], totals: Option<&str>) -> String {
    let totals = totals.map(|t| format!("<total>{t}</total>")).unwrap_or_default();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><NFe xmlns="{NS}"><infNFe versao="4.00"><ide><cUF>35</cUF><natOp>VENDA</natOp><mod>55</mod><serie>1</serie><nNF>{number}</nNF><dhEmi>2024-01-19T10:30:00-03:00</dhEmi></ide><emit><CNPJ>12345678000195</CNPJ><xNome>EMITENTE</xNome><IE>123</IE></emit>{}{totals}</infNFe></NFe>"#,
        items.concat()
    )
}

pub fn icms_tot(v_nf: &str) -> String {
    format!("<ICMSTot><vBC>0.00</vBC><vICMS>0.00</vICMS><vProd>{v_nf}</vProd><vNF>{v_nf}</vNF></ICMSTot>")
}
