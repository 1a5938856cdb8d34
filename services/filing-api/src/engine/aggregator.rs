//! Tax Aggregator
//!
//! Folds a sequence of sale records into a single GST liability summary.

use gstflow_models::{slab_key, SaleRecord, TaxCalculation};

/// Aggregates records in a single O(n) pass without mutating the input.
///
/// Intra-state sales split their tax evenly between CGST and SGST;
/// inter-state sales put the full tax into IGST. `total_tax` is computed
/// once at the end from the three liability fields, never accumulated
/// independently. Empty input yields the all-zero calculation with empty
/// breakdown maps.
pub fn aggregate(records: &[SaleRecord]) -> TaxCalculation {
    let mut calc = TaxCalculation::default();

    for record in records {
        calc.total_sales += record.amount;
        *calc
            .sales_by_state
            .entry(record.state.clone())
            .or_insert(0.0) += record.amount;
        *calc
            .sales_by_slab
            .entry(slab_key(record.tax_rate))
            .or_insert(0.0) += record.amount;

        let tax = record.tax_amount();
        if record.is_interstate() {
            calc.igst += tax;
        } else {
            calc.cgst += tax / 2.0;
            calc.sgst += tax / 2.0;
        }
    }

    calc.total_tax = calc.cgst + calc.sgst + calc.igst;
    calc
}
