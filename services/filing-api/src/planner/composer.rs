//! Compliance Plan Composer
//!
//! Combines the business analysis with fixed statutory deadline rules
//! into a structured compliance plan. The advisory free text is attached
//! afterwards by the caller through the advisor capability.

use chrono::{Datelike, NaiveDate};

use gstflow_models::{
    AdvisorySource, BusinessAnalysis, BusinessSize, CompliancePlan, ComplianceRisk, FilingDeadline,
};

/// Composes the structured plan for the period containing `today`.
///
/// Deadline rules are fixed by the calendar, not configurable per
/// filing: GSTR-1 falls due on the 10th of the following month, GSTR-3B
/// and the tax payment on the 20th.
pub fn compose(analysis: &BusinessAnalysis, today: NaiveDate) -> CompliancePlan {
    let deadlines = vec![
        FilingDeadline {
            form: "GSTR-1".to_string(),
            due_date: next_month_day(today, 10),
            description: "Statement of outward supplies for the current period".to_string(),
        },
        FilingDeadline {
            form: "GSTR-3B".to_string(),
            due_date: next_month_day(today, 20),
            description: "Summary return for the current period".to_string(),
        },
        FilingDeadline {
            form: "Tax Payment".to_string(),
            due_date: next_month_day(today, 20),
            description: "Net tax liability, paid along with GSTR-3B".to_string(),
        },
    ];

    let special_schemes = if analysis.business_size == BusinessSize::Micro {
        vec!["Composition Scheme".to_string()]
    } else {
        Vec::new()
    };

    let risk_areas = if analysis.compliance_risk != ComplianceRisk::Low {
        vec![
            "Interstate Sales".to_string(),
            "Multiple Tax Rates".to_string(),
        ]
    } else {
        Vec::new()
    };

    CompliancePlan {
        deadlines,
        applicable_returns: vec!["GSTR-1".to_string(), "GSTR-3B".to_string()],
        special_schemes,
        risk_areas,
        advisory: String::new(),
        advisory_source: AdvisorySource::Template,
    }
}

/// Synthesizes the retrieval query used to pull supporting knowledge
/// into the plan's advisory text.
pub fn knowledge_query(analysis: &BusinessAnalysis) -> String {
    let mut query = String::from("gstr return filing deadlines");
    if analysis.business_size == BusinessSize::Micro {
        query.push_str(" composition scheme");
    }
    if analysis.compliance_risk != ComplianceRisk::Low {
        query.push_str(" interstate igst");
    }
    query
}

/// The given day in the month after `today`; December rolls into
/// January. Only days 1-28 are passed in, so the date always exists.
fn next_month_day(today: NaiveDate, day: u32) -> NaiveDate {
    let (year, month) = if today.month() == 12 {
        (today.year() + 1, 1)
    } else {
        (today.year(), today.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(today)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analysis(size: BusinessSize, risk: ComplianceRisk) -> BusinessAnalysis {
        BusinessAnalysis {
            primary_slab: "18".to_string(),
            primary_state: "Home State".to_string(),
            average_transaction: 1000.0,
            business_size: size,
            compliance_risk: risk,
            risk_score: match risk {
                ComplianceRisk::Low => 0,
                ComplianceRisk::Medium => 2,
                ComplianceRisk::High => 3,
            },
        }
    }

    #[test]
    fn test_deadlines_fall_in_the_following_month() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 8).unwrap();
        let plan = compose(&analysis(BusinessSize::Small, ComplianceRisk::Low), today);

        assert_eq!(
            plan.due_date_for("GSTR-1"),
            NaiveDate::from_ymd_opt(2026, 9, 10)
        );
        assert_eq!(
            plan.due_date_for("GSTR-3B"),
            NaiveDate::from_ymd_opt(2026, 9, 20)
        );
        assert_eq!(
            plan.due_date_for("Tax Payment"),
            NaiveDate::from_ymd_opt(2026, 9, 20)
        );
    }

    #[test]
    fn test_december_rolls_into_january() {
        let today = NaiveDate::from_ymd_opt(2025, 12, 15).unwrap();
        let plan = compose(&analysis(BusinessSize::Small, ComplianceRisk::Low), today);

        assert_eq!(
            plan.due_date_for("GSTR-1"),
            NaiveDate::from_ymd_opt(2026, 1, 10)
        );
    }

    #[test]
    fn test_applicable_returns_are_fixed() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 8).unwrap();
        let plan = compose(&analysis(BusinessSize::Large, ComplianceRisk::High), today);

        assert_eq!(plan.applicable_returns, vec!["GSTR-1", "GSTR-3B"]);
    }

    #[test]
    fn test_composition_scheme_only_for_micro() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 8).unwrap();

        let micro = compose(&analysis(BusinessSize::Micro, ComplianceRisk::Low), today);
        assert_eq!(micro.special_schemes, vec!["Composition Scheme"]);

        let small = compose(&analysis(BusinessSize::Small, ComplianceRisk::Low), today);
        assert!(small.special_schemes.is_empty());
    }

    #[test]
    fn test_risk_areas_only_above_low_risk() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 8).unwrap();

        let low = compose(&analysis(BusinessSize::Small, ComplianceRisk::Low), today);
        assert!(low.risk_areas.is_empty());

        let medium = compose(&analysis(BusinessSize::Small, ComplianceRisk::Medium), today);
        assert_eq!(
            medium.risk_areas,
            vec!["Interstate Sales", "Multiple Tax Rates"]
        );
    }

    #[test]
    fn test_knowledge_query_reflects_analysis() {
        let query = knowledge_query(&analysis(BusinessSize::Micro, ComplianceRisk::Medium));
        assert!(query.contains("composition scheme"));
        assert!(query.contains("interstate"));

        let plain = knowledge_query(&analysis(BusinessSize::Large, ComplianceRisk::Low));
        assert!(!plain.contains("composition"));
        assert!(!plain.contains("interstate"));
    }
}
