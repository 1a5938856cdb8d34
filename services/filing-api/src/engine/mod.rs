//! The tax engine: aggregation of sale records into a liability summary,
//! and pattern analysis on top of it. Both are pure, single-pass
//! computations safe to call from any request-handling context.

pub mod aggregator;
pub mod analyzer;

pub use aggregator::aggregate;
pub use analyzer::analyze;
