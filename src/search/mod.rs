//! Retrieval: lexical scoring, field filters, file-backed search, the remote
//! search variant and the candidate reranker.

pub mod filter;
pub mod lexical;
pub mod local;
pub mod remote;
pub mod rerank;
