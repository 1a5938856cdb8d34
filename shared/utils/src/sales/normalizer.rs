//! Record Normalizer
//!
//! Converts raw string rows into typed sale records, applying the default
//! and fallback rules. This is a deliberately permissive stage: malformed
//! numeric fields default silently so that downstream aggregation tolerates
//! partially-missing data instead of rejecting whole files.

use gstflow_models::SaleRecord;

use crate::sales::parser::SalesRow;

/// Ordered product-label rules for inferring a missing tax rate.
/// Checked top to bottom; the first rule with a matching keyword wins.
const RATE_RULES: &[(&[&str], f64)] = &[
    (&["essential", "food"], 0.0),
    (&["common", "basic"], 5.0),
    (&["standard", "processed"], 12.0),
    (&["luxury", "premium"], 28.0),
];

const DEFAULT_RATE: f64 = 18.0;
const DEFAULT_STATE: &str = "Unknown";
const DEFAULT_PRODUCT: &str = "General";

/// Normalizes parsed rows into `SaleRecord`s.
#[derive(Default)]
pub struct RecordNormalizer;

impl RecordNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn normalize(&self, rows: &[SalesRow]) -> Vec<SaleRecord> {
        rows.iter().map(|row| self.normalize_row(row)).collect()
    }

    fn normalize_row(&self, row: &SalesRow) -> SaleRecord {
        let product = row
            .product
            .clone()
            .unwrap_or_else(|| DEFAULT_PRODUCT.to_string());
        let state = row
            .state
            .clone()
            .unwrap_or_else(|| DEFAULT_STATE.to_string());

        let amount = parse_decimal(row.amount.as_deref()).unwrap_or(0.0);
        let tax_rate =
            parse_decimal(row.tax_rate.as_deref()).unwrap_or_else(|| infer_rate(&product));

        SaleRecord::new(amount, tax_rate, state, product)
    }
}

/// Parses a decimal field. Non-finite and negative values count as
/// unparseable, keeping the aggregate liability fields non-negative.
fn parse_decimal(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|n| n.is_finite() && *n >= 0.0)
}

/// Infers a tax rate from the product label via the ordered rule list.
fn infer_rate(product: &str) -> f64 {
    let label = product.to_lowercase();
    for (keywords, rate) in RATE_RULES {
        if keywords.iter().any(|k| label.contains(k)) {
            return *rate;
        }
    }
    DEFAULT_RATE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(
        amount: Option<&str>,
        tax_rate: Option<&str>,
        state: Option<&str>,
        product: Option<&str>,
    ) -> SalesRow {
        SalesRow {
            row_number: 2,
            amount: amount.map(str::to_string),
            tax_rate: tax_rate.map(str::to_string),
            state: state.map(str::to_string),
            product: product.map(str::to_string),
        }
    }

    #[test]
    fn test_explicit_rate_wins_over_product() {
        let normalizer = RecordNormalizer::new();
        let records = normalizer.normalize(&[row(
            Some("1000"),
            Some("12"),
            Some("Home State"),
            Some("Luxury watch"),
        )]);

        assert_eq!(records[0].tax_rate, 12.0);
    }

    #[test]
    fn test_explicit_zero_rate_is_kept() {
        let normalizer = RecordNormalizer::new();
        let records = normalizer.normalize(&[row(
            Some("1000"),
            Some("0"),
            Some("Home State"),
            Some("Luxury watch"),
        )]);

        assert_eq!(records[0].tax_rate, 0.0);
    }

    #[test]
    fn test_rate_inferred_from_product() {
        let normalizer = RecordNormalizer::new();
        let cases = [
            ("Essential medicine", 0.0),
            ("Food grains", 0.0),
            ("Common salt", 5.0),
            ("Basic stationery", 5.0),
            ("Standard furniture", 12.0),
            ("Processed cheese", 12.0),
            ("Luxury watch", 28.0),
            ("Premium perfume", 28.0),
            ("Electronics", 18.0),
        ];

        for (product, expected) in cases {
            let records = normalizer.normalize(&[row(Some("100"), None, None, Some(product))]);
            assert_eq!(records[0].tax_rate, expected, "product: {}", product);
        }
    }

    #[test]
    fn test_first_matching_rule_wins() {
        // "Processed food" matches both the 0% food rule and the 12%
        // processed rule; the rule list order decides.
        let normalizer = RecordNormalizer::new();
        let records = normalizer.normalize(&[row(Some("100"), None, None, Some("Processed food"))]);

        assert_eq!(records[0].tax_rate, 0.0);
    }

    #[test]
    fn test_malformed_fields_default_silently() {
        let normalizer = RecordNormalizer::new();
        let records = normalizer.normalize(&[row(
            Some("not-a-number"),
            Some("also-bad"),
            None,
            None,
        )]);

        assert_eq!(records[0].amount, 0.0);
        assert_eq!(records[0].tax_rate, 18.0);
        assert_eq!(records[0].state, "Unknown");
        assert_eq!(records[0].product, "General");
    }

    #[test]
    fn test_negative_amount_treated_as_unparseable() {
        let normalizer = RecordNormalizer::new();
        let records = normalizer.normalize(&[row(Some("-500"), Some("18"), None, None)]);

        assert_eq!(records[0].amount, 0.0);
    }
}
