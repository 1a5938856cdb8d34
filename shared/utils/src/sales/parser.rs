//! Sales CSV Parser
//!
//! Header-flexible parser for uploaded sales transaction files. Column
//! names vary wildly between accounting exports, so each field is matched
//! against an ordered list of candidate headers. Rows that fail to parse
//! become warnings, never file-level errors.

use std::collections::HashMap;

use crate::error::GstResult;

/// One raw parsed row. All fields are still strings at this stage; the
/// normalizer applies typing and fallback rules.
#[derive(Debug, Clone)]
pub struct SalesRow {
    pub row_number: usize,
    pub amount: Option<String>,
    pub tax_rate: Option<String>,
    pub state: Option<String>,
    pub product: Option<String>,
}

/// Complete parsed upload with metadata.
#[derive(Debug, Clone)]
pub struct ParsedSales {
    pub filename: String,
    pub rows: Vec<SalesRow>,
    pub column_headers: Vec<String>,
    pub total_rows: usize,
    pub parse_warnings: Vec<String>,
}

/// Main sales CSV parser.
pub struct SalesCsvParser {
    /// Column name mappings for different accounting export formats
    amount_columns: Vec<String>,
    tax_rate_columns: Vec<String>,
    state_columns: Vec<String>,
    product_columns: Vec<String>,
}

impl Default for SalesCsvParser {
    fn default() -> Self {
        Self {
            amount_columns: vec![
                "amount".to_string(),
                "value".to_string(),
                "total".to_string(),
                "sale_amount".to_string(),
                "invoice_value".to_string(),
            ],
            tax_rate_columns: vec![
                "tax_rate".to_string(),
                "taxrate".to_string(),
                "gst_rate".to_string(),
                "rate".to_string(),
            ],
            state_columns: vec![
                "state".to_string(),
                "place_of_supply".to_string(),
                "customer_state".to_string(),
                "buyer_state".to_string(),
            ],
            product_columns: vec![
                "product".to_string(),
                "item".to_string(),
                "description".to_string(),
                "product_name".to_string(),
            ],
        }
    }
}

impl SalesCsvParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an uploaded sales file from bytes.
    pub fn parse_bytes(&self, filename: &str, data: &[u8]) -> GstResult<ParsedSales> {
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(data);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.to_lowercase().trim().to_string())
            .collect();

        let mut rows = Vec::new();
        let mut warnings = Vec::new();

        for (idx, result) in reader.records().enumerate() {
            match result {
                Ok(record) => {
                    let raw_data: HashMap<String, String> = headers
                        .iter()
                        .enumerate()
                        .filter_map(|(i, h)| record.get(i).map(|v| (h.clone(), v.to_string())))
                        .collect();

                    rows.push(self.map_row(idx + 2, &raw_data));
                }
                Err(e) => {
                    warnings.push(format!("Row {}: Parse error - {}", idx + 2, e));
                }
            }
        }

        Ok(ParsedSales {
            filename: filename.to_string(),
            total_rows: rows.len(),
            rows,
            column_headers: headers,
            parse_warnings: warnings,
        })
    }

    /// Map raw data to a structured SalesRow
    fn map_row(&self, row_number: usize, raw_data: &HashMap<String, String>) -> SalesRow {
        SalesRow {
            row_number,
            amount: self.find_value(&self.amount_columns, raw_data),
            tax_rate: self.find_value(&self.tax_rate_columns, raw_data),
            state: self.find_value(&self.state_columns, raw_data),
            product: self.find_value(&self.product_columns, raw_data),
        }
    }

    /// Find value by checking multiple possible column names
    fn find_value(&self, candidates: &[String], data: &HashMap<String, String>) -> Option<String> {
        for candidate in candidates {
            if let Some(value) = data.get(candidate) {
                let trimmed = value.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_csv_parsing() {
        let csv_data =
            b"amount,tax_rate,state,product\n1000,18,Home State,Soap\n2000,28,Karnataka,Perfume";

        let parser = SalesCsvParser::new();
        let result = parser.parse_bytes("sales.csv", csv_data).unwrap();

        assert_eq!(result.total_rows, 2);
        assert_eq!(
            result.column_headers,
            vec!["amount", "tax_rate", "state", "product"]
        );
        assert_eq!(result.rows[0].amount, Some("1000".to_string()));
        assert_eq!(result.rows[0].state, Some("Home State".to_string()));
        assert_eq!(result.rows[1].product, Some("Perfume".to_string()));
        assert!(result.parse_warnings.is_empty());
    }

    #[test]
    fn test_alternative_column_names() {
        let csv_data = b"invoice_value,gst_rate,place_of_supply,item\n500,5,Kerala,Rice";

        let parser = SalesCsvParser::new();
        let result = parser.parse_bytes("export.csv", csv_data).unwrap();

        assert_eq!(result.rows[0].amount, Some("500".to_string()));
        assert_eq!(result.rows[0].tax_rate, Some("5".to_string()));
        assert_eq!(result.rows[0].state, Some("Kerala".to_string()));
        assert_eq!(result.rows[0].product, Some("Rice".to_string()));
    }

    #[test]
    fn test_missing_columns_become_none() {
        let csv_data = b"amount\n1000";

        let parser = SalesCsvParser::new();
        let result = parser.parse_bytes("partial.csv", csv_data).unwrap();

        assert_eq!(result.rows[0].tax_rate, None);
        assert_eq!(result.rows[0].state, None);
        assert_eq!(result.rows[0].product, None);
    }

    proptest! {
        /// Every well-formed input row comes back out as a parsed row.
        #[test]
        fn prop_parsing_completeness(
            amount in 0u32..1_000_000,
            state in "[A-Za-z ]{3,20}",
        ) {
            let csv = format!("amount,state\n{},{}", amount, state.trim());
            let parser = SalesCsvParser::new();
            let result = parser.parse_bytes("sales.csv", csv.as_bytes()).unwrap();

            prop_assert_eq!(result.total_rows, 1);
            prop_assert!(result.rows[0].amount.is_some());
        }
    }
}
