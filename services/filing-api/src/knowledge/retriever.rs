//! Knowledge Retriever
//!
//! TF-IDF relevance scoring of free-text queries against the fixed
//! corpus. Indexing happens once at construction; retrieval is a pure
//! read and is deterministic for a fixed corpus and query.

use std::collections::HashMap;

use gstflow_models::{KnowledgeDocument, RankedDocument};

/// Inverted term statistics over the corpus.
pub struct KnowledgeRetriever {
    documents: Vec<KnowledgeDocument>,
    /// Term counts per document, indexed in corpus order.
    term_counts: Vec<HashMap<String, usize>>,
    /// Token count per document.
    doc_lengths: Vec<usize>,
    /// Number of documents containing each term.
    doc_frequency: HashMap<String, usize>,
}

impl KnowledgeRetriever {
    pub fn new(documents: Vec<KnowledgeDocument>) -> Self {
        let mut term_counts = Vec::with_capacity(documents.len());
        let mut doc_lengths = Vec::with_capacity(documents.len());
        let mut doc_frequency: HashMap<String, usize> = HashMap::new();

        for document in &documents {
            let mut counts: HashMap<String, usize> = HashMap::new();
            let tokens = tokenize(&document.content)
                .into_iter()
                .chain(document.tags.iter().flat_map(|t| tokenize(t)));

            let mut length = 0;
            for token in tokens {
                *counts.entry(token).or_insert(0) += 1;
                length += 1;
            }

            for term in counts.keys() {
                *doc_frequency.entry(term.clone()).or_insert(0) += 1;
            }

            term_counts.push(counts);
            doc_lengths.push(length);
        }

        Self {
            documents,
            term_counts,
            doc_lengths,
            doc_frequency,
        }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Ranks corpus documents against the query, descending by score.
    /// Documents scoring zero are excluded entirely; at most
    /// `max_results` entries come back. Exact score ties order by
    /// document id so results are stable.
    pub fn retrieve(&self, query: &str, max_results: usize) -> Vec<RankedDocument> {
        let query_terms = tokenize(query);
        if query_terms.is_empty() || self.documents.is_empty() {
            return Vec::new();
        }

        let corpus_size = self.documents.len() as f64;
        let mut scored: Vec<(f64, usize)> = Vec::new();

        for (idx, counts) in self.term_counts.iter().enumerate() {
            let length = self.doc_lengths[idx];
            if length == 0 {
                continue;
            }

            let mut score = 0.0;
            for term in &query_terms {
                let Some(count) = counts.get(term) else {
                    continue;
                };
                let df = self.doc_frequency[term] as f64;
                let tf = *count as f64 / length as f64;
                // Smoothed so a term present in every document still
                // contributes a positive weight.
                let idf = (1.0 + corpus_size / df).ln();
                score += tf * idf;
            }

            if score > 0.0 {
                scored.push((score, idx));
            }
        }

        scored.sort_by(|a, b| {
            b.0.total_cmp(&a.0)
                .then_with(|| self.documents[a.1].id.cmp(&self.documents[b.1].id))
        });
        scored.truncate(max_results);

        scored
            .into_iter()
            .map(|(score, idx)| RankedDocument {
                document: self.documents[idx].clone(),
                score,
            })
            .collect()
    }
}

/// Lowercase alphanumeric tokens; everything else is a separator.
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
