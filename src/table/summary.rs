use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::core::{Field, FlatRecord};

/// One group of a [`summarize`] run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    /// Value of the grouping field (may be empty).
    pub key: String,
    /// Number of records in the group.
    pub count: usize,
    /// Sum per requested field, in request order.
    pub sums: Vec<(Field, Decimal)>,
    /// Non-empty values left out: not a number, or the sum would overflow.
    pub skipped: usize,
}

impl SummaryRow {
    /// Sum for `field`, if it was requested.
    pub fn sum(&self, field: Field) -> Option<Decimal> {
        self.sums.iter().find(|(f, _)| *f == field).map(|(_, d)| *d)
    }
}

/// Group `records` by `group_by` and sum each of `sum_fields`.
///
/// Groups are ordered by key. Empty values add nothing; values that do
/// not parse as a decimal (NF-e amounts use `.` as separator), or that
/// would overflow the running sum, are counted in [`SummaryRow::skipped`].
pub fn summarize(records: &[FlatRecord], group_by: Field, sum_fields: &[Field]) -> Vec<SummaryRow> {
    let mut groups: BTreeMap<String, SummaryRow> = BTreeMap::new();
    for record in records {
        let key = record.get(group_by);
        let row = groups.entry(key.to_string()).or_insert_with(|| SummaryRow {
            key: key.to_string(),
            count: 0,
            sums: sum_fields.iter().map(|f| (*f, Decimal::ZERO)).collect(),
            skipped: 0,
        });
        row.count += 1;
        for (field, total) in row.sums.iter_mut() {
            let value = record.get(*field).trim();
            if value.is_empty() {
                continue;
            }
            match Decimal::from_str(value).ok().and_then(|d| total.checked_add(d)) {
                Some(sum) => *total = sum,
                None => row.skipped += 1,
            }
        }
    }
    groups.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ExtractConfig, Header, LineItem};
    use rust_decimal_macros::dec;

    fn record(cfop: &str, amount: &str) -> FlatRecord {
        let item = LineItem {
            cfop: Some(cfop.into()),
            amount: Some(amount.into()),
            ..Default::default()
        };
        FlatRecord::from_parts(&Header::default(), &item, None, &ExtractConfig::default())
    }

    #[test]
    fn groups_and_sums() {
        let records = [
            record("5102", "10.50"),
            record("6102", "1.00"),
            record("5102", "4.50"),
        ];
        let rows = summarize(&records, Field::Cfop, &[Field::ProductAmount]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].key, "5102");
        assert_eq!(rows[0].count, 2);
        assert_eq!(rows[0].sum(Field::ProductAmount), Some(dec!(15.00)));
        assert_eq!(rows[1].key, "6102");
        assert_eq!(rows[1].sum(Field::ProductAmount), Some(dec!(1.00)));
    }

    #[test]
    fn empty_and_invalid_values() {
        let records = [record("5102", ""), record("5102", "abc"), record("5102", "2")];
        let rows = summarize(&records, Field::Cfop, &[Field::ProductAmount]);
        assert_eq!(rows[0].count, 3);
        assert_eq!(rows[0].skipped, 1);
        assert_eq!(rows[0].sum(Field::ProductAmount), Some(dec!(2)));
    }

    #[test]
    fn overflowing_values_are_skipped() {
        let max = Decimal::MAX.to_string();
        let records = [record("5102", &max), record("5102", &max), record("5102", "-1")];
        let rows = summarize(&records, Field::Cfop, &[Field::ProductAmount]);
        assert_eq!(rows[0].count, 3);
        assert_eq!(rows[0].skipped, 1);
        assert_eq!(rows[0].sum(Field::ProductAmount), Some(Decimal::MAX - dec!(1)));
    }

    #[test]
    fn unrequested_field_has_no_sum() {
        let rows = summarize(&[record("5102", "1")], Field::Cfop, &[]);
        assert_eq!(rows[0].sum(Field::ProductAmount), None);
    }
}
