//! # GSTFlow Core Domain Models
//!
//! This module contains the core domain models for the GSTFlow filing and
//! advisory backend. All models implement serialization/deserialization with
//! serde; request-facing models carry validation rules from the validator crate.
//!
//! ## Key Models
//!
//! - **SaleRecord**: One normalized sales transaction (amount, tax rate, state, product)
//! - **TaxCalculation**: Aggregate GST liability for one upload, with per-state and per-slab breakdowns
//! - **BusinessAnalysis**: Secondary business metrics (dominant slab/state, size, compliance risk)
//! - **CompliancePlan**: Deadlines, applicable returns, scheme eligibility, and advisory text
//! - **KnowledgeDocument**: Static GST policy corpus entry for the assistant
//! - **Filing**: One upload's complete record, owned by the in-memory filing store
//!
//! ## Invariants
//!
//! - `TaxCalculation::total_tax` always equals `cgst + sgst + igst`
//! - Each sale contributes to exactly one of (cgst, sgst) or igst, never both
//! - Breakdown maps are BTreeMaps, so iteration order is deterministic

pub mod analysis;
pub mod filing;
pub mod knowledge;
pub mod plan;
pub mod sale;
pub mod tax;

#[cfg(test)]
pub mod property_tests;

pub use analysis::{BusinessAnalysis, BusinessSize, ComplianceRisk};
pub use filing::{Filing, FilingSummary};
pub use knowledge::{KnowledgeDocument, RankedDocument};
pub use plan::{AdvisorySource, CompliancePlan, FilingDeadline, GeneratedDocument};
pub use sale::{SaleRecord, HOME_STATE};
pub use tax::{slab_key, TaxCalculation};
