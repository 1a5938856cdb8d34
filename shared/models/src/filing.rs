//! Filing records owned by the in-memory store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::{BusinessAnalysis, BusinessSize, ComplianceRisk};
use crate::plan::{CompliancePlan, GeneratedDocument};
use crate::sale::SaleRecord;
use crate::tax::TaxCalculation;

/// One upload's complete record. Created by the upload pipeline, owned
/// exclusively by the filing store, and discarded on process restart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filing {
    /// Process-unique, monotonically increasing id derived from the
    /// ingestion clock in milliseconds.
    pub id: i64,
    pub filename: String,
    pub records: Vec<SaleRecord>,
    pub calculation: TaxCalculation,
    pub analysis: BusinessAnalysis,
    pub plan: CompliancePlan,
    pub documents: Vec<GeneratedDocument>,
    pub created_at: DateTime<Utc>,
}

impl Filing {
    pub fn summary(&self) -> FilingSummary {
        FilingSummary {
            id: self.id,
            filename: self.filename.clone(),
            record_count: self.records.len(),
            total_sales: self.calculation.total_sales,
            total_tax: self.calculation.total_tax,
            business_size: self.analysis.business_size,
            compliance_risk: self.analysis.compliance_risk,
            created_at: self.created_at,
        }
    }
}

/// Listing view of a filing, without the row-level detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilingSummary {
    pub id: i64,
    pub filename: String,
    pub record_count: usize,
    pub total_sales: f64,
    pub total_tax: f64,
    pub business_size: BusinessSize,
    pub compliance_risk: ComplianceRisk,
    pub created_at: DateTime<Utc>,
}
