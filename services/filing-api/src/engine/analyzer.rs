//! Business Pattern Analyzer
//!
//! Derives secondary business metrics from an upload's records and its
//! aggregated tax calculation.

use std::collections::BTreeMap;

use gstflow_models::{BusinessAnalysis, BusinessSize, ComplianceRisk, SaleRecord, TaxCalculation};
use gstflow_utils::{GstError, GstResult};

/// Effective tax ratio above which the risk score takes a point.
const HIGH_TAX_RATIO: f64 = 0.15;

/// Distinct slab count above which the risk score takes a point.
const MANY_SLABS: usize = 3;

/// Analyzes an upload. Fails with the empty-dataset error when no records
/// are present, since the average transaction would be undefined.
pub fn analyze(records: &[SaleRecord], calc: &TaxCalculation) -> GstResult<BusinessAnalysis> {
    if records.is_empty() {
        return Err(GstError::empty_dataset(
            "average transaction is undefined for zero records",
        ));
    }

    let primary_slab = max_key(&calc.sales_by_slab).unwrap_or_default();
    let primary_state = max_key(&calc.sales_by_state).unwrap_or_default();
    let average_transaction = calc.total_sales / records.len() as f64;

    let mut score: u8 = 0;
    if calc.igst > 0.0 {
        score += 1;
    }
    if calc.distinct_slab_count() > MANY_SLABS {
        score += 1;
    }
    if calc.effective_tax_ratio() > HIGH_TAX_RATIO {
        score += 1;
    }

    Ok(BusinessAnalysis {
        primary_slab,
        primary_state,
        average_transaction,
        business_size: BusinessSize::from_total_sales(calc.total_sales),
        compliance_risk: ComplianceRisk::from_score(score),
        risk_score: score,
    })
}

/// Key with the maximal value. Strict `>` during the ascending scan keeps
/// the smallest key on ties, which is the documented tie-break.
fn max_key(map: &BTreeMap<String, f64>) -> Option<String> {
    let mut best: Option<(&String, f64)> = None;
    for (key, value) in map {
        match best {
            Some((_, best_value)) if *value <= best_value => {}
            _ => best = Some((key, *value)),
        }
    }
    best.map(|(key, _)| key.clone())
}
