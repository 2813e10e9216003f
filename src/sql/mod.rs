//! Allowlist-constrained, read-only SQL generation.
//!
//! Queries are rendered with named parameters and handed back to the caller;
//! executing them is left to whatever database driver the host uses, after
//! [`guard::ensure_read_only`].

pub mod allowlist;
pub mod builder;
pub mod guard;

pub use allowlist::Allowlist;
pub use builder::{build_count, build_select};
pub use guard::ensure_read_only;
