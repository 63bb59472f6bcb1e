use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;

use super::config::ExtractConfig;
use super::date::format_issue_date;
use super::types::{Header, LineItem, Totals};

/// A column of the flat output.
///
/// Declaration order is the canonical column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    // ide / emit
    StateCode,
    InvoiceNumber,
    OperationNature,
    Model,
    Series,
    IssueDate,
    EmitterCnpj,
    EmitterName,
    EmitterIe,
    // prod
    ItemNumber,
    ProductCode,
    ProductDescription,
    Ncm,
    Cfop,
    Quantity,
    UnitPrice,
    ProductAmount,
    Discount,
    // imposto
    IcmsCst,
    IcmsBase,
    IcmsAliquot,
    IcmsAmount,
    PisCst,
    PisBase,
    PisAliquot,
    PisAmount,
    CofinsCst,
    CofinsBase,
    CofinsAliquot,
    CofinsAmount,
    IbsCbsCst,
    IbsCbsClassification,
    IbsCbsBase,
    IbsStateAliquot,
    IbsStateAmount,
    IbsMunicipalAliquot,
    IbsMunicipalAmount,
    IbsAmount,
    CbsAliquot,
    CbsAmount,
    // total
    TotalIcmsBase,
    TotalIcmsAmount,
    TotalProductsAmount,
    TotalInvoiceAmount,
    TotalIbsCbsBase,
    TotalIbsAmount,
    TotalCbsAmount,
}

impl Field {
    /// Every field, in canonical column order.
    pub const ALL: [Field; 47] = [
        Self::StateCode,
        Self::InvoiceNumber,
        Self::OperationNature,
        Self::Model,
        Self::Series,
        Self::IssueDate,
        Self::EmitterCnpj,
        Self::EmitterName,
        Self::EmitterIe,
        Self::ItemNumber,
        Self::ProductCode,
        Self::ProductDescription,
        Self::Ncm,
        Self::Cfop,
        Self::Quantity,
        Self::UnitPrice,
        Self::ProductAmount,
        Self::Discount,
        Self::IcmsCst,
        Self::IcmsBase,
        Self::IcmsAliquot,
        Self::IcmsAmount,
        Self::PisCst,
        Self::PisBase,
        Self::PisAliquot,
        Self::PisAmount,
        Self::CofinsCst,
        Self::CofinsBase,
        Self::CofinsAliquot,
        Self::CofinsAmount,
        Self::IbsCbsCst,
        Self::IbsCbsClassification,
        Self::IbsCbsBase,
        Self::IbsStateAliquot,
        Self::IbsStateAmount,
        Self::IbsMunicipalAliquot,
        Self::IbsMunicipalAmount,
        Self::IbsAmount,
        Self::CbsAliquot,
        Self::CbsAmount,
        Self::TotalIcmsBase,
        Self::TotalIcmsAmount,
        Self::TotalProductsAmount,
        Self::TotalInvoiceAmount,
        Self::TotalIbsCbsBase,
        Self::TotalIbsAmount,
        Self::TotalCbsAmount,
    ];

    /// Column name used in tabular output.
    pub fn name(&self) -> &'static str {
        match self {
            Self::StateCode => "UF",
            Self::InvoiceNumber => "Numero_NF",
            Self::OperationNature => "Natureza_Operacao",
            Self::Model => "Modelo",
            Self::Series => "Serie",
            Self::IssueDate => "Data_Emissao",
            Self::EmitterCnpj => "CNPJ_Emitente",
            Self::EmitterName => "Nome_Emitente",
            Self::EmitterIe => "IE_Emitente",
            Self::ItemNumber => "Item",
            Self::ProductCode => "Codigo_Produto",
            Self::ProductDescription => "Descricao_Produto",
            Self::Ncm => "NCM",
            Self::Cfop => "CFOP",
            Self::Quantity => "Quantidade",
            Self::UnitPrice => "Valor_Unitario",
            Self::ProductAmount => "Valor_Produto",
            Self::Discount => "Desconto",
            Self::IcmsCst => "ICMS_CST",
            Self::IcmsBase => "BC_ICMS",
            Self::IcmsAliquot => "Aliq_ICMS",
            Self::IcmsAmount => "Valor_ICMS",
            Self::PisCst => "PIS_CST",
            Self::PisBase => "BC_PIS",
            Self::PisAliquot => "Aliq_PIS",
            Self::PisAmount => "Valor_PIS",
            Self::CofinsCst => "COFINS_CST",
            Self::CofinsBase => "BC_COFINS",
            Self::CofinsAliquot => "Aliq_COFINS",
            Self::CofinsAmount => "Valor_COFINS",
            Self::IbsCbsCst => "IBSCBS_CST",
            Self::IbsCbsClassification => "IBSCBS_cClassTrib",
            Self::IbsCbsBase => "IBSCBS_vBC",
            Self::IbsStateAliquot => "IBSCBS_pIBSUF",
            Self::IbsStateAmount => "IBSCBS_vIBSUF",
            Self::IbsMunicipalAliquot => "IBSCBS_pIBSMun",
            Self::IbsMunicipalAmount => "IBSCBS_vIBSMun",
            Self::IbsAmount => "IBSCBS_vIBS",
            Self::CbsAliquot => "IBSCBS_pCBS",
            Self::CbsAmount => "IBSCBS_vCBS",
            Self::TotalIcmsBase => "Total_vBC",
            Self::TotalIcmsAmount => "Total_vICMS",
            Self::TotalProductsAmount => "Total_vProd",
            Self::TotalInvoiceAmount => "Total_vNF",
            Self::TotalIbsCbsBase => "Total_vBCIBSCBS",
            Self::TotalIbsAmount => "Total_vIBS",
            Self::TotalCbsAmount => "Total_vCBS",
        }
    }

    /// Look a field up by its column name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.name() == name)
    }

    /// Whether the field is copied from the document header.
    pub fn is_header(&self) -> bool {
        *self <= Self::EmitterIe
    }

    /// Whether the field is copied from the document totals.
    pub fn is_total(&self) -> bool {
        *self >= Self::TotalIcmsBase
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// One output row: a line item with its document's header and totals.
///
/// Every [`Field`] is present. Values that were absent in the document
/// are the empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatRecord {
    values: BTreeMap<Field, String>,
}

impl FlatRecord {
    /// Merge header, line item and totals into one record.
    pub fn from_parts(
        header: &Header,
        item: &LineItem,
        totals: Option<&Totals>,
        config: &ExtractConfig,
    ) -> Self {
        let mut values = BTreeMap::new();
        let mut put = |field: Field, value: Option<&String>| {
            values.insert(field, value.cloned().unwrap_or_default());
        };

        put(Field::StateCode, header.state_code.as_ref());
        put(Field::InvoiceNumber, header.number.as_ref());
        put(Field::OperationNature, header.operation_nature.as_ref());
        put(Field::Model, header.model.as_ref());
        put(Field::Series, header.series.as_ref());
        let issue_date = header
            .issued_at
            .as_deref()
            .map(|raw| format_issue_date(raw, &config.date_format));
        put(Field::IssueDate, issue_date.as_ref());
        put(Field::EmitterCnpj, header.emitter_cnpj.as_ref());
        put(Field::EmitterName, header.emitter_name.as_ref());
        put(Field::EmitterIe, header.emitter_ie.as_ref());

        put(Field::ItemNumber, item.item_number.as_ref());
        put(Field::ProductCode, item.product_code.as_ref());
        put(Field::ProductDescription, item.description.as_ref());
        put(Field::Ncm, item.ncm.as_ref());
        put(Field::Cfop, item.cfop.as_ref());
        put(Field::Quantity, item.quantity.as_ref());
        put(Field::UnitPrice, item.unit_price.as_ref());
        put(Field::ProductAmount, item.amount.as_ref());
        put(Field::Discount, item.discount.as_ref());

        let taxes = &item.taxes;
        for (comp, [cst, base, aliquot, amount]) in [
            (
                taxes.icms.as_ref(),
                [Field::IcmsCst, Field::IcmsBase, Field::IcmsAliquot, Field::IcmsAmount],
            ),
            (
                taxes.pis.as_ref(),
                [Field::PisCst, Field::PisBase, Field::PisAliquot, Field::PisAmount],
            ),
            (
                taxes.cofins.as_ref(),
                [
                    Field::CofinsCst,
                    Field::CofinsBase,
                    Field::CofinsAliquot,
                    Field::CofinsAmount,
                ],
            ),
        ] {
            let comp = comp.cloned().unwrap_or_default();
            put(cst, comp.situation_code.as_ref());
            put(base, comp.base.as_ref());
            put(aliquot, comp.aliquot.as_ref());
            put(amount, comp.amount.as_ref());
        }

        let ibs = taxes.ibs_cbs.clone().unwrap_or_default();
        put(Field::IbsCbsCst, ibs.situation_code.as_ref());
        put(Field::IbsCbsClassification, ibs.classification.as_ref());
        put(Field::IbsCbsBase, ibs.base.as_ref());
        put(Field::IbsStateAliquot, ibs.state_aliquot.as_ref());
        put(Field::IbsStateAmount, ibs.state_amount.as_ref());
        put(Field::IbsMunicipalAliquot, ibs.municipal_aliquot.as_ref());
        put(Field::IbsMunicipalAmount, ibs.municipal_amount.as_ref());
        put(Field::IbsAmount, ibs.ibs_amount.as_ref());
        put(Field::CbsAliquot, ibs.cbs_aliquot.as_ref());
        put(Field::CbsAmount, ibs.cbs_amount.as_ref());

        let totals = totals.cloned().unwrap_or_default();
        put(Field::TotalIcmsBase, totals.icms_base.as_ref());
        put(Field::TotalIcmsAmount, totals.icms_amount.as_ref());
        put(Field::TotalProductsAmount, totals.products_amount.as_ref());
        put(Field::TotalInvoiceAmount, totals.invoice_amount.as_ref());
        put(Field::TotalIbsCbsBase, totals.ibs_cbs_base.as_ref());
        put(Field::TotalIbsAmount, totals.ibs_amount.as_ref());
        put(Field::TotalCbsAmount, totals.cbs_amount.as_ref());

        Self { values }
    }

    /// Value of `field`; empty when the source element was absent.
    pub fn get(&self, field: Field) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    /// Value by column name. `None` only for names that are not a [`Field`].
    pub fn get_by_name(&self, name: &str) -> Option<&str> {
        Field::from_name(name).map(|f| self.get(f))
    }

    /// Fields and values in canonical column order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.values.iter().map(|(f, v)| (*f, v.as_str()))
    }

    /// Number of fields (always [`Field::ALL`]`.len()`).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Serialize for FlatRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (field, value) in &self.values {
            map.serialize_entry(field.name(), value)?;
        }
        map.end()
    }
}
