//! Compliance plan and generated filing documents.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A statutory filing deadline relative to the filing period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilingDeadline {
    pub form: String,
    pub due_date: NaiveDate,
    pub description: String,
}

/// Where the advisory free text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdvisorySource {
    /// Produced by the external text-generation collaborator.
    Generated,
    /// Produced by the deterministic fallback template.
    Template,
}

/// Structured compliance plan for one filing, combining fixed deadline
/// rules, scheme eligibility, risk flags, and free-text elaboration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompliancePlan {
    pub deadlines: Vec<FilingDeadline>,
    pub applicable_returns: Vec<String>,
    pub special_schemes: Vec<String>,
    pub risk_areas: Vec<String>,
    pub advisory: String,
    pub advisory_source: AdvisorySource,
}

impl CompliancePlan {
    /// Looks up the due date for a named return form, if planned.
    pub fn due_date_for(&self, form: &str) -> Option<NaiveDate> {
        self.deadlines
            .iter()
            .find(|d| d.form == form)
            .map(|d| d.due_date)
    }
}

/// A rendered return summary attached to a filing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedDocument {
    pub id: Uuid,
    pub name: String,
    pub content: String,
    pub generated_at: DateTime<Utc>,
}

impl GeneratedDocument {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            content: content.into(),
            generated_at: Utc::now(),
        }
    }
}
