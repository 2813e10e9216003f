//! # kb-search
//!
//! Tools a chat-assistant host calls to look things up: lexical search over a
//! markdown knowledge document, term-overlap reranking of arbitrary
//! candidates, and allowlist-constrained, read-only SQL generation.
//!
//! ## Architecture
//!
//! The local search path is a straight pipeline, rebuilt on every call:
//!
//! ```text
//!   knowledge.md ──► parse_records ──► field filters ──► tokenize + score
//!                                                              │
//!                      summaries ◄── top_k ◄── stable sort ◄───┘
//! ```
//!
//! The reranker reuses the same tokenizer and scorer on caller-supplied
//! candidates, for example results of the remote search variant.
//!
//! ## Module Overview
//!
//! - [`config`] - Environment-based configuration for the server, corpus and remote API
//! - [`models`] - Shared data types: `KnowledgeRecord`, request/response types
//! - [`knowledge`] - Record parser, key normalization, identity inference, format description
//! - [`search::lexical`] - Tokenizer and term-overlap scorer
//! - [`search::filter`] - Case-insensitive field filters
//! - [`search::local`] - File-backed search orchestration
//! - [`search::rerank`] - Lexical reranking of arbitrary JSON candidates
//! - [`search::remote`] - HTTP-backed search against a remote knowledge API
//! - [`sql`] - Allowlist loader, SELECT/COUNT builders and the read-only guard
//! - [`api`] - Axum HTTP handlers
//! - [`state`] - Shared application state

pub mod api;
pub mod config;
pub mod error;
pub mod knowledge;
pub mod models;
pub mod search;
pub mod sql;
pub mod state;
