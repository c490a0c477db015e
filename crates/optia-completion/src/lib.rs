//! optia-completion
//!
//! Chat completion providers. Both take the assembled transcript messages
//! and return the assistant's reply text.

pub mod azure;
pub mod bedrock;
pub mod client;
pub mod error;
pub mod params;
