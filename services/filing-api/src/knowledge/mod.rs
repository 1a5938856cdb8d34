//! GST knowledge base: the fixed policy corpus and the TF-IDF retriever
//! that ranks it against free-text questions. The corpus is assembled
//! once before the server starts taking requests and is read-only
//! afterward, so concurrent retrieval needs no locking.

pub mod corpus;
pub mod retriever;

pub use corpus::build_corpus;
pub use retriever::KnowledgeRetriever;
