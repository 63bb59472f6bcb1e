//! Tax block (`imposto`) resolution.
//!
//! ICMS, PIS and COFINS each come in mutually exclusive variants that can
//! only be told apart by element tag. Each tax is described by a
//! [`TaxGroup`]: an ordered tag list plus the names of its rate and amount
//! leaves. Resolution probes the tags in order and reads the first match
//! into a [`TaxComputation`].
//!
//! The probe order is the enumeration order of the regime codes, not a
//! discriminant from the NF-e layout. Well-formed documents carry at most
//! one variant per tax, so order only matters for malformed input, where
//! the earliest tag in the list wins.

use super::tree::Element;
use crate::core::{IbsCbs, TaxBlock, TaxComputation};

/// Probe table for one tax.
#[derive(Debug, Clone, Copy)]
pub struct TaxGroup {
    /// Variant element tags in probe order.
    pub variants: &'static [&'static str],
    /// Rate leaf, e.g. `pICMS`.
    pub aliquot: &'static str,
    /// Amount leaf, e.g. `vICMS`.
    pub amount: &'static str,
}

/// ICMS regimes: CST variants, interstate partition and ST repasse, then
/// the Simples Nacional (CSOSN) variants.
pub const ICMS: TaxGroup = TaxGroup {
    variants: &[
        "ICMS00",
        "ICMS02",
        "ICMS10",
        "ICMS15",
        "ICMS20",
        "ICMS30",
        "ICMS40",
        "ICMS51",
        "ICMS53",
        "ICMS60",
        "ICMS61",
        "ICMS70",
        "ICMS90",
        "ICMSPart",
        "ICMSST",
        "ICMSSN101",
        "ICMSSN102",
        "ICMSSN201",
        "ICMSSN202",
        "ICMSSN500",
        "ICMSSN900",
    ],
    aliquot: "pICMS",
    amount: "vICMS",
};

/// PIS: aliquot-based, quantity-based, not taxed, other.
pub const PIS: TaxGroup = TaxGroup {
    variants: &["PISAliq", "PISQtde", "PISNT", "PISOutr"],
    aliquot: "pPIS",
    amount: "vPIS",
};

/// COFINS: aliquot-based, quantity-based, not taxed, other.
pub const COFINS: TaxGroup = TaxGroup {
    variants: &["COFINSAliq", "COFINSQtde", "COFINSNT", "COFINSOutr"],
    aliquot: "pCOFINS",
    amount: "vCOFINS",
};

impl TaxGroup {
    /// First variant of this group present under `imposto`.
    pub(crate) fn find<'a>(&self, imposto: &'a Element) -> Option<&'a Element> {
        self.variants.iter().find_map(|tag| imposto.descendant(tag))
    }

    /// Resolve the variant under `imposto` into the uniform shape.
    pub(crate) fn resolve(&self, imposto: &Element) -> Option<TaxComputation> {
        let node = self.find(imposto)?;
        Some(TaxComputation {
            variant: node.name.clone(),
            situation_code: node.child_text("CST").or_else(|| node.child_text("CSOSN")),
            base: node.child_text("vBC"),
            aliquot: node.child_text(self.aliquot),
            amount: node.child_text(self.amount),
        })
    }
}

/// Read the IBS/CBS group. Its shape is fixed; the values sit one or two
/// grouping levels below `IBSCBS`, so they are looked up by descent.
pub(crate) fn read_ibs_cbs(imposto: &Element) -> Option<IbsCbs> {
    let node = imposto.descendant("IBSCBS")?;
    Some(IbsCbs {
        situation_code: node.child_text("CST"),
        classification: node.child_text("cClassTrib"),
        base: node.descendant_text("vBC"),
        state_aliquot: node.descendant_text("pIBSUF"),
        state_amount: node.descendant_text("vIBSUF"),
        municipal_aliquot: node.descendant_text("pIBSMun"),
        municipal_amount: node.descendant_text("vIBSMun"),
        ibs_amount: node.descendant_text("vIBS"),
        cbs_aliquot: node.descendant_text("pCBS"),
        cbs_amount: node.descendant_text("vCBS"),
    })
}

/// Resolve every tax of one line item. A missing `imposto` yields an
/// empty block.
pub(crate) fn read_tax_block(imposto: Option<&Element>) -> TaxBlock {
    let Some(imposto) = imposto else {
        return TaxBlock::default();
    };
    TaxBlock {
        icms: ICMS.resolve(imposto),
        pis: PIS.resolve(imposto),
        cofins: COFINS.resolve(imposto),
        ibs_cbs: read_ibs_cbs(imposto),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nfe::NFE_NAMESPACE;
    use crate::nfe::tree::parse_tree;

    fn imposto(body: &str) -> Element {
        let xml = format!(r#"<imposto xmlns="{NFE_NAMESPACE}">{body}</imposto>"#);
        parse_tree(xml.as_bytes()).unwrap()
    }

    #[test]
    fn icms_table_has_every_regime() {
        assert_eq!(ICMS.variants.len(), 21);
        assert!(ICMS.variants.contains(&"ICMS60"));
        assert!(ICMS.variants.contains(&"ICMSSN102"));
    }

    #[test]
    fn tags_are_unique_within_groups() {
        for group in [ICMS, PIS, COFINS] {
            for (i, a) in group.variants.iter().enumerate() {
                assert!(!group.variants[i + 1..].contains(a), "duplicate {a}");
            }
        }
    }

    #[test]
    fn icms00_reads_all_values() {
        let node = imposto(
            "<ICMS><ICMS00><orig>0</orig><CST>00</CST><modBC>3</modBC>\
             <vBC>100.00</vBC><pICMS>18.00</pICMS><vICMS>18.00</vICMS></ICMS00></ICMS>",
        );
        let icms = ICMS.resolve(&node).unwrap();
        assert_eq!(icms.variant, "ICMS00");
        assert_eq!(icms.situation_code.as_deref(), Some("00"));
        assert_eq!(icms.base.as_deref(), Some("100.00"));
        assert_eq!(icms.aliquot.as_deref(), Some("18.00"));
        assert_eq!(icms.amount.as_deref(), Some("18.00"));
    }

    #[test]
    fn icms60_has_no_rate_or_amount() {
        let node = imposto("<ICMS><ICMS60><orig>0</orig><CST>60</CST></ICMS60></ICMS>");
        let icms = ICMS.resolve(&node).unwrap();
        assert_eq!(icms.situation_code.as_deref(), Some("60"));
        assert_eq!(icms.aliquot, None);
        assert_eq!(icms.amount, None);
    }

    #[test]
    fn simples_nacional_uses_csosn() {
        let node = imposto("<ICMS><ICMSSN102><orig>0</orig><CSOSN>102</CSOSN></ICMSSN102></ICMS>");
        let icms = ICMS.resolve(&node).unwrap();
        assert_eq!(icms.variant, "ICMSSN102");
        assert_eq!(icms.situation_code.as_deref(), Some("102"));
    }

    #[test]
    fn first_variant_in_probe_order_wins() {
        // Malformed: two regimes present, the later tag written first.
        let node = imposto(
            "<ICMS><ICMS90><CST>90</CST></ICMS90><ICMS20><CST>20</CST></ICMS20></ICMS>",
        );
        assert_eq!(ICMS.resolve(&node).unwrap().situation_code.as_deref(), Some("20"));
    }

    #[test]
    fn unknown_variant_yields_none() {
        let node = imposto("<ICMS><ICMS99><CST>99</CST></ICMS99></ICMS>");
        assert_eq!(ICMS.resolve(&node), None);
    }

    #[test]
    fn pis_variants() {
        let aliq = imposto(
            "<PIS><PISAliq><CST>01</CST><vBC>100.00</vBC><pPIS>1.65</pPIS>\
             <vPIS>1.65</vPIS></PISAliq></PIS>",
        );
        let pis = PIS.resolve(&aliq).unwrap();
        assert_eq!(pis.aliquot.as_deref(), Some("1.65"));
        assert_eq!(pis.amount.as_deref(), Some("1.65"));

        let nt = imposto("<PIS><PISNT><CST>07</CST></PISNT></PIS>");
        let pis = PIS.resolve(&nt).unwrap();
        assert_eq!(pis.variant, "PISNT");
        assert_eq!(pis.situation_code.as_deref(), Some("07"));
        assert_eq!(pis.aliquot, None);
    }

    #[test]
    fn quantity_variant_leaves_percentage_empty() {
        let node = imposto(
            "<COFINS><COFINSQtde><CST>03</CST><qBCProd>10.0000</qBCProd>\
             <vAliqProd>0.5000</vAliqProd><vCOFINS>5.00</vCOFINS></COFINSQtde></COFINS>",
        );
        let cofins = COFINS.resolve(&node).unwrap();
        assert_eq!(cofins.aliquot, None);
        assert_eq!(cofins.amount.as_deref(), Some("5.00"));
    }

    #[test]
    fn pis_st_is_not_a_pis_variant() {
        let node = imposto("<PISST><vBC>1</vBC><pPIS>1</pPIS><vPIS>1</vPIS></PISST>");
        assert_eq!(PIS.resolve(&node), None);
    }

    #[test]
    fn ibs_cbs_reads_nested_groups() {
        let node = imposto(
            "<IBSCBS><CST>000</CST><cClassTrib>000001</cClassTrib><gIBSCBS>\
             <vBC>100.00</vBC>\
             <gIBSUF><pIBSUF>0.1000</pIBSUF><vIBSUF>0.10</vIBSUF></gIBSUF>\
             <gIBSMun><pIBSMun>0.0000</pIBSMun><vIBSMun>0.00</vIBSMun></gIBSMun>\
             <vIBS>0.10</vIBS>\
             <gCBS><pCBS>0.9000</pCBS><vCBS>0.90</vCBS></gCBS>\
             </gIBSCBS></IBSCBS>",
        );
        let ibs = read_ibs_cbs(&node).unwrap();
        assert_eq!(ibs.situation_code.as_deref(), Some("000"));
        assert_eq!(ibs.classification.as_deref(), Some("000001"));
        assert_eq!(ibs.base.as_deref(), Some("100.00"));
        assert_eq!(ibs.state_aliquot.as_deref(), Some("0.1000"));
        assert_eq!(ibs.state_amount.as_deref(), Some("0.10"));
        assert_eq!(ibs.municipal_amount.as_deref(), Some("0.00"));
        assert_eq!(ibs.ibs_amount.as_deref(), Some("0.10"));
        assert_eq!(ibs.cbs_aliquot.as_deref(), Some("0.9000"));
        assert_eq!(ibs.cbs_amount.as_deref(), Some("0.90"));
    }

    #[test]
    fn missing_imposto_is_empty_block() {
        assert_eq!(read_tax_block(None), TaxBlock::default());
    }

    #[test]
    fn taxes_resolve_independently() {
        let node = imposto(
            "<ICMS><ICMS40><CST>41</CST></ICMS40></ICMS>\
             <COFINS><COFINSOutr><CST>99</CST></COFINSOutr></COFINS>",
        );
        let block = read_tax_block(Some(&node));
        assert_eq!(block.icms.unwrap().situation_code.as_deref(), Some("41"));
        assert!(block.pis.is_none());
        assert_eq!(block.cofins.unwrap().variant, "COFINSOutr");
        assert!(block.ibs_cbs.is_none());
    }
}
