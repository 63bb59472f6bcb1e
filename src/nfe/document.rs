use super::taxes::read_tax_block;
use super::tree::Element;
use crate::core::{Document, Header, LineItem, Totals};

/// Read one `infNFe` node.
pub(crate) fn read_document(inf: &Element) -> Document {
    Document {
        header: read_header(inf),
        items: inf.children_named("det").map(read_item).collect(),
        totals: inf.child("total").map(read_totals),
    }
}

fn read_header(inf: &Element) -> Header {
    let mut header = Header::default();
    if let Some(ide) = inf.child("ide") {
        header.state_code = ide.child_text("cUF");
        header.number = ide.child_text("nNF");
        header.operation_nature = ide.child_text("natOp");
        header.model = ide.child_text("mod");
        header.series = ide.child_text("serie");
        header.issued_at = ide.child_text("dhEmi");
    }
    if let Some(emit) = inf.child("emit") {
        header.emitter_cnpj = emit.child_text("CNPJ");
        header.emitter_name = emit.child_text("xNome");
        header.emitter_ie = emit.child_text("IE");
    }
    header
}

fn read_item(det: &Element) -> LineItem {
    let mut item = LineItem {
        item_number: det.attribute("nItem").map(str::to_string),
        taxes: read_tax_block(det.child("imposto")),
        ..Default::default()
    };
    if let Some(prod) = det.child("prod") {
        item.product_code = prod.child_text("cProd");
        item.description = prod.child_text("xProd");
        item.ncm = prod.child_text("NCM");
        item.cfop = prod.child_text("CFOP");
        item.quantity = prod.child_text("qCom");
        item.unit_price = prod.child_text("vUnCom");
        item.amount = prod.child_text("vProd");
        item.discount = prod.child_text("vDesc");
    }
    item
}

fn read_totals(total: &Element) -> Totals {
    let mut totals = Totals::default();
    if let Some(icms) = total.child("ICMSTot") {
        totals.icms_base = icms.child_text("vBC");
        totals.icms_amount = icms.child_text("vICMS");
        totals.products_amount = icms.child_text("vProd");
        totals.invoice_amount = icms.child_text("vNF");
    }
    if let Some(ibs) = total.child("IBSCBSTot") {
        totals.ibs_cbs_base = ibs.child_text("vBCIBSCBS");
        totals.ibs_amount = ibs.grouped_text("gIBS", "vIBS");
        totals.cbs_amount = ibs.grouped_text("gCBS", "vCBS");
    }
    totals
}
