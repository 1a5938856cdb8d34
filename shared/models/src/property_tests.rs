//! Property-based tests for GSTFlow core domain models
//!
//! This module contains property-based tests that validate universal
//! properties across the domain models, focusing on serialization
//! round-trip consistency and classification invariants.

use proptest::prelude::*;

use crate::{slab_key, BusinessSize, ComplianceRisk, KnowledgeDocument, SaleRecord, HOME_STATE};

prop_compose! {
    fn arb_state()(choice in 0usize..5) -> String {
        match choice {
            0 => HOME_STATE.to_string(),
            1 => "Maharashtra".to_string(),
            2 => "Karnataka".to_string(),
            3 => "Tamil Nadu".to_string(),
            _ => "Unknown".to_string(),
        }
    }
}

prop_compose! {
    fn arb_slab_rate()(choice in 0usize..5) -> f64 {
        [0.0, 5.0, 12.0, 18.0, 28.0][choice]
    }
}

prop_compose! {
    fn arb_sale_record()(
        amount in 0.0f64..1_000_000.0,
        tax_rate in arb_slab_rate(),
        state in arb_state(),
        product in "[A-Za-z ]{3,30}",
    ) -> SaleRecord {
        SaleRecord::new(amount, tax_rate, state, product)
    }
}

proptest! {
    /// Sale records survive a serde round trip unchanged.
    #[test]
    fn prop_sale_record_serde_roundtrip(record in arb_sale_record()) {
        let json = serde_json::to_string(&record).unwrap();
        let back: SaleRecord = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(record, back);
    }

    /// Tax liability of a record is never negative for non-negative inputs.
    #[test]
    fn prop_tax_amount_non_negative(record in arb_sale_record()) {
        prop_assert!(record.tax_amount() >= 0.0);
    }

    /// Size classification never shrinks as total sales grow.
    #[test]
    fn prop_business_size_monotonic(
        lower in 0.0f64..10_000_000.0,
        delta in 0.0f64..10_000_000.0,
    ) {
        let small = BusinessSize::from_total_sales(lower);
        let large = BusinessSize::from_total_sales(lower + delta);
        prop_assert!(small <= large);
    }

    /// Risk classification never shrinks as the score grows.
    #[test]
    fn prop_risk_monotonic(score in 0u8..3) {
        prop_assert!(ComplianceRisk::from_score(score) <= ComplianceRisk::from_score(score + 1));
    }

    /// Whole-number slab rates format without a fractional part.
    #[test]
    fn prop_slab_key_whole_rates(rate in 0u32..100) {
        let key = slab_key(rate as f64);
        prop_assert_eq!(key, rate.to_string());
    }

    /// Knowledge documents survive a serde round trip unchanged.
    #[test]
    fn prop_knowledge_document_serde_roundtrip(
        id in "[a-z-]{3,20}",
        content in "[A-Za-z0-9 .,]{10,200}",
    ) {
        let doc = KnowledgeDocument::new(id, content, &["rates", "filing"]);
        let json = serde_json::to_string(&doc).unwrap();
        let back: KnowledgeDocument = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(doc, back);
    }
}
