//! Sale transaction models.
//!
//! A `SaleRecord` is one normalized row of uploaded sales data. Raw rows
//! arrive as free-text strings; the normalizer in `gstflow-utils` applies
//! the default and fallback rules before anything downstream sees them.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Sentinel state label marking an intra-state sale. Every other label,
/// including "Unknown", is treated as inter-state.
pub const HOME_STATE: &str = "Home State";

/// One normalized sale transaction. Immutable once built; retained inside
/// the owning `Filing` for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct SaleRecord {
    #[validate(range(min = 0.0, message = "Amount must be non-negative"))]
    pub amount: f64,
    #[validate(range(min = 0.0, max = 100.0, message = "Tax rate must be a percentage"))]
    pub tax_rate: f64,
    pub state: String,
    pub product: String,
}

impl SaleRecord {
    pub fn new(
        amount: f64,
        tax_rate: f64,
        state: impl Into<String>,
        product: impl Into<String>,
    ) -> Self {
        Self {
            amount,
            tax_rate,
            state: state.into(),
            product: product.into(),
        }
    }

    /// Tax liability of this record, before the CGST/SGST vs IGST split.
    pub fn tax_amount(&self) -> f64 {
        self.amount * self.tax_rate / 100.0
    }

    /// Whether this sale crosses state lines for GST purposes.
    pub fn is_interstate(&self) -> bool {
        self.state != HOME_STATE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interstate_detection() {
        let home = SaleRecord::new(1000.0, 18.0, HOME_STATE, "Widget");
        let other = SaleRecord::new(1000.0, 18.0, "Karnataka", "Widget");
        let unknown = SaleRecord::new(1000.0, 18.0, "Unknown", "Widget");

        assert!(!home.is_interstate());
        assert!(other.is_interstate());
        assert!(unknown.is_interstate());
    }

    #[test]
    fn test_tax_amount() {
        let record = SaleRecord::new(1000.0, 18.0, HOME_STATE, "Widget");
        assert_eq!(record.tax_amount(), 180.0);

        let zero_rated = SaleRecord::new(1000.0, 0.0, HOME_STATE, "Food grains");
        assert_eq!(zero_rated.tax_amount(), 0.0);
    }
}
