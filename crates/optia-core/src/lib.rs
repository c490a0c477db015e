//! optia-core
//!
//! Pure domain types, storage key conventions, keyword lookup and prompt
//! assembly. No AWS SDK or HTTP dependency; this is the shared vocabulary of
//! the OPT-IA chat relay.

pub mod annotate;
pub mod error;
pub mod keys;
pub mod keywords;
pub mod models;
pub mod prompt;
