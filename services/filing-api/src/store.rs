//! Filing Store
//!
//! Process-wide, append-only store of completed filings. Created at
//! startup, appended to by each completed upload, and discarded at
//! shutdown; nothing is persisted.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use gstflow_models::{
    BusinessAnalysis, CompliancePlan, Filing, FilingSummary, GeneratedDocument, SaleRecord,
    TaxCalculation,
};
use tokio::sync::RwLock;

/// A completed upload, ready to be assigned an id and stored.
#[derive(Debug, Clone)]
pub struct FilingDraft {
    pub filename: String,
    pub records: Vec<SaleRecord>,
    pub calculation: TaxCalculation,
    pub analysis: BusinessAnalysis,
    pub plan: CompliancePlan,
    pub documents: Vec<GeneratedDocument>,
}

/// In-memory filing store keyed by filing id.
#[derive(Clone, Default)]
pub struct FilingStore {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Default)]
struct Inner {
    filings: BTreeMap<i64, Filing>,
    last_id: i64,
}

impl FilingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a completed filing and returns it with its id assigned.
    ///
    /// Ids come from the ingestion clock in milliseconds, bumped past the
    /// previous id under the write lock, so concurrent uploads get unique,
    /// strictly increasing ids.
    pub async fn insert(&self, draft: FilingDraft) -> Filing {
        let created_at = Utc::now();
        let mut inner = self.inner.write().await;

        let id = created_at.timestamp_millis().max(inner.last_id + 1);
        inner.last_id = id;

        let filing = Filing {
            id,
            filename: draft.filename,
            records: draft.records,
            calculation: draft.calculation,
            analysis: draft.analysis,
            plan: draft.plan,
            documents: draft.documents,
            created_at,
        };
        inner.filings.insert(id, filing.clone());
        filing
    }

    pub async fn get(&self, id: i64) -> Option<Filing> {
        self.inner.read().await.filings.get(&id).cloned()
    }

    /// Summaries of all filings in ascending id order.
    pub async fn list(&self) -> Vec<FilingSummary> {
        self.inner
            .read()
            .await
            .filings
            .values()
            .map(Filing::summary)
            .collect()
    }

    pub async fn count(&self) -> usize {
        self.inner.read().await.filings.len()
    }
}
