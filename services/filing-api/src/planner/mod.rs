//! Compliance planning: fixed statutory deadline rules combined with the
//! business analysis, plus rendering of the return summaries attached to
//! each filing.

pub mod composer;
pub mod documents;

pub use composer::{compose, knowledge_query};
pub use documents::DocumentRenderer;
