//! Knowledge base documents for the GST assistant.

use serde::{Deserialize, Serialize};

/// One entry of the static GST policy corpus. The corpus is assembled
/// once at process start and never mutated afterward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeDocument {
    pub id: String,
    pub content: String,
    pub tags: Vec<String>,
}

impl KnowledgeDocument {
    pub fn new(id: impl Into<String>, content: impl Into<String>, tags: &[&str]) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// A corpus document paired with its relevance score for a query.
/// Retrieval results are ordered descending by score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedDocument {
    pub document: KnowledgeDocument,
    pub score: f64,
}
