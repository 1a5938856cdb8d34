//! Knowledge Corpus
//!
//! Built-in GST policy documents plus optional text files loaded from a
//! configured directory at startup. Assembly is a one-time bulk load;
//! the corpus is never mutated afterward.

use std::path::Path;

use gstflow_models::KnowledgeDocument;
use gstflow_utils::{GstError, GstResult};

/// Assembles the full corpus: built-in documents first, then any text
/// files from the configured directory. A missing or unreadable
/// directory is logged and skipped, never fatal.
pub fn build_corpus(directory: Option<&str>) -> Vec<KnowledgeDocument> {
    let mut documents = builtin_documents();

    if let Some(dir) = directory {
        match load_directory(Path::new(dir)) {
            Ok(mut extra) => documents.append(&mut extra),
            Err(e) => {
                tracing::warn!(error = %e, directory = dir, "Skipping knowledge directory");
            }
        }
    }

    documents
}

/// The built-in GST policy documents.
pub fn builtin_documents() -> Vec<KnowledgeDocument> {
    vec![
        KnowledgeDocument::new(
            "gst-registration",
            "Businesses with annual turnover above the threshold must register for GST \
             and obtain a GSTIN. Registration is mandatory for all inter-state suppliers \
             regardless of turnover. Voluntary registration allows smaller businesses to \
             claim input tax credit on purchases.",
            &["registration", "gstin"],
        ),
        KnowledgeDocument::new(
            "gst-rate-slabs",
            "GST is levied in five main slabs: 0%, 5%, 12%, 18% and 28%. Essential goods \
             such as unprocessed food grains are zero-rated, while luxury and premium \
             goods attract the 28% slab. Most services fall under the standard 18% slab.",
            &["rates", "slabs"],
        ),
        KnowledgeDocument::new(
            "gstr-1",
            "GSTR-1 is the monthly statement of outward supplies. It is due on the 10th \
             of the following month and lists every sales invoice issued during the \
             period. Late filing attracts a per-day penalty.",
            &["returns", "deadlines"],
        ),
        KnowledgeDocument::new(
            "gstr-3b",
            "GSTR-3B is the monthly summary return combining outward supplies, input tax \
             credit claims and the net tax payment. Both the return and the payment are \
             due on the 20th of the following month.",
            &["returns", "deadlines", "payment"],
        ),
        KnowledgeDocument::new(
            "composition-scheme",
            "The Composition Scheme lets small businesses below the turnover ceiling pay \
             tax at a flat concessional rate and file quarterly instead of monthly. \
             Composition dealers cannot collect tax from customers or claim input tax \
             credit, and cannot make inter-state sales.",
            &["schemes"],
        ),
        KnowledgeDocument::new(
            "input-tax-credit",
            "Input Tax Credit (ITC) lets a registered business offset the GST paid on \
             purchases against its output liability. Credit must be reconciled against \
             supplier filings; mismatched invoices are a common audit trigger.",
            &["itc"],
        ),
        KnowledgeDocument::new(
            "interstate-igst",
            "Inter-state supplies attract Integrated GST (IGST), while intra-state \
             supplies are split equally between Central GST (CGST) and State GST (SGST). \
             The place of supply rules determine which regime applies to each invoice.",
            &["igst", "interstate"],
        ),
        KnowledgeDocument::new(
            "e-invoicing",
            "E-invoicing requires businesses above the notified turnover limit to \
             register each invoice with the Invoice Registration Portal and embed the \
             returned IRN and QR code. It applies to B2B invoices and exports.",
            &["irn"],
        ),
    ]
}

/// Loads every `.txt` and `.md` file in the directory as a document, with
/// the file's base name as its id. Unreadable files are skipped with a
/// warning.
fn load_directory(dir: &Path) -> GstResult<Vec<KnowledgeDocument>> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| GstError::knowledge_base(format!("cannot read {}: {}", dir.display(), e)))?;

    let mut documents = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| GstError::knowledge_base(e.to_string()))?;
        let path = entry.path();

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if !matches!(extension, "txt" | "md") {
            continue;
        }

        let id = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("document")
            .to_string();

        match std::fs::read_to_string(&path) {
            Ok(content) => documents.push(KnowledgeDocument::new(id, content, &["imported"])),
            Err(e) => {
                tracing::warn!(error = %e, file = %path.display(), "Skipping unreadable knowledge file");
            }
        }
    }

    Ok(documents)
}
