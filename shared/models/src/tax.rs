//! Tax calculation aggregate for one upload.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Formats a tax rate as a slab-breakdown map key. Whole-number rates
/// render without a fractional part ("18", not "18.0").
pub fn slab_key(rate: f64) -> String {
    if rate.fract() == 0.0 {
        format!("{}", rate as i64)
    } else {
        format!("{}", rate)
    }
}

/// Aggregate GST liability computed from a sequence of sale records.
///
/// `total_tax` is always exactly `cgst + sgst + igst`; it is computed once
/// from the three liability fields, never accumulated independently. The
/// breakdown maps are keyed by state label and formatted slab rate, and
/// iterate in ascending key order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TaxCalculation {
    pub total_sales: f64,
    pub cgst: f64,
    pub sgst: f64,
    pub igst: f64,
    pub total_tax: f64,
    pub sales_by_state: BTreeMap<String, f64>,
    pub sales_by_slab: BTreeMap<String, f64>,
}

impl TaxCalculation {
    /// Number of distinct tax slabs seen in the upload.
    pub fn distinct_slab_count(&self) -> usize {
        self.sales_by_slab.len()
    }

    /// Effective tax ratio; 0.0 when there were no sales.
    pub fn effective_tax_ratio(&self) -> f64 {
        if self.total_sales > 0.0 {
            self.total_tax / self.total_sales
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slab_key_formatting() {
        assert_eq!(slab_key(18.0), "18");
        assert_eq!(slab_key(0.0), "0");
        assert_eq!(slab_key(0.25), "0.25");
    }

    #[test]
    fn test_effective_tax_ratio_guards_empty() {
        let calc = TaxCalculation::default();
        assert_eq!(calc.effective_tax_ratio(), 0.0);
    }
}
