//! Sales file ingestion: header-flexible CSV parsing plus row
//! normalization into typed sale records.

pub mod normalizer;
pub mod parser;

pub use normalizer::RecordNormalizer;
pub use parser::{ParsedSales, SalesCsvParser, SalesRow};
