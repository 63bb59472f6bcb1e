use serde::{Deserialize, Serialize};

/// One NF-e invoice (`infNFe`) as read from the XML tree.
///
/// Every scalar is kept as it appeared in the document: `None` when the
/// element is absent, `Some("")` when it is present but empty. Values are
/// never converted or rounded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// `ide` + `emit`: identification and emitter data.
    pub header: Header,
    /// `det`: line items in document order.
    pub items: Vec<LineItem>,
    /// `total`: aggregate amounts. `None` when the `total` node is absent.
    pub totals: Option<Totals>,
}

/// Identification (`ide`) and emitter (`emit`) scalars.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// `ide/cUF`: IBGE code of the emitter's state.
    pub state_code: Option<String>,
    /// `ide/nNF`: invoice number.
    pub number: Option<String>,
    /// `ide/natOp`: nature of the operation.
    pub operation_nature: Option<String>,
    /// `ide/mod`: fiscal document model (55 = NF-e, 65 = NFC-e).
    pub model: Option<String>,
    /// `ide/serie`: series.
    pub series: Option<String>,
    /// `ide/dhEmi`: issue timestamp, raw RFC 3339 text.
    pub issued_at: Option<String>,
    /// `emit/CNPJ`: emitter tax ID.
    pub emitter_cnpj: Option<String>,
    /// `emit/xNome`: emitter legal name.
    pub emitter_name: Option<String>,
    /// `emit/IE`: emitter state registration.
    pub emitter_ie: Option<String>,
}

/// One `det` entry: product data plus its tax block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// `det/@nItem`: item sequence number.
    pub item_number: Option<String>,
    /// `prod/cProd`
    pub product_code: Option<String>,
    /// `prod/xProd`
    pub description: Option<String>,
    /// `prod/NCM`: Mercosur tariff classification.
    pub ncm: Option<String>,
    /// `prod/CFOP`: fiscal operation code.
    pub cfop: Option<String>,
    /// `prod/qCom`
    pub quantity: Option<String>,
    /// `prod/vUnCom`
    pub unit_price: Option<String>,
    /// `prod/vProd`
    pub amount: Option<String>,
    /// `prod/vDesc`
    pub discount: Option<String>,
    /// `imposto`
    pub taxes: TaxBlock,
}

/// The taxes attached to one line item (`imposto`).
///
/// Each field is `None` when no recognised variant of that tax exists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBlock {
    pub icms: Option<TaxComputation>,
    pub pis: Option<TaxComputation>,
    pub cofins: Option<TaxComputation>,
    pub ibs_cbs: Option<IbsCbs>,
}

/// Uniform shape every ICMS / PIS / COFINS regime variant resolves to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxComputation {
    /// Element tag of the matched variant, e.g. `ICMS60` or `PISNT`.
    pub variant: String,
    /// `CST`, or `CSOSN` on Simples Nacional ICMS variants.
    pub situation_code: Option<String>,
    /// `vBC`
    pub base: Option<String>,
    /// `pICMS` / `pPIS` / `pCOFINS`
    pub aliquot: Option<String>,
    /// `vICMS` / `vPIS` / `vCOFINS`
    pub amount: Option<String>,
}

/// The IBS/CBS group introduced by the consumption tax reform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IbsCbs {
    /// `CST`
    pub situation_code: Option<String>,
    /// `cClassTrib`: tax classification code.
    pub classification: Option<String>,
    /// `gIBSCBS/vBC`
    pub base: Option<String>,
    /// `gIBSUF/pIBSUF`: state IBS aliquot.
    pub state_aliquot: Option<String>,
    /// `gIBSUF/vIBSUF`: state IBS amount.
    pub state_amount: Option<String>,
    /// `gIBSMun/pIBSMun`: municipal IBS aliquot.
    pub municipal_aliquot: Option<String>,
    /// `gIBSMun/vIBSMun`: municipal IBS amount.
    pub municipal_amount: Option<String>,
    /// `vIBS`: total IBS.
    pub ibs_amount: Option<String>,
    /// `gCBS/pCBS`
    pub cbs_aliquot: Option<String>,
    /// `gCBS/vCBS`
    pub cbs_amount: Option<String>,
}

/// Document-level aggregates (`total`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    /// `ICMSTot/vBC`
    pub icms_base: Option<String>,
    /// `ICMSTot/vICMS`
    pub icms_amount: Option<String>,
    /// `ICMSTot/vProd`
    pub products_amount: Option<String>,
    /// `ICMSTot/vNF`
    pub invoice_amount: Option<String>,
    /// `IBSCBSTot/vBCIBSCBS`
    pub ibs_cbs_base: Option<String>,
    /// `IBSCBSTot/gIBS/vIBS`
    pub ibs_amount: Option<String>,
    /// `IBSCBSTot/gCBS/vCBS`
    pub cbs_amount: Option<String>,
}
