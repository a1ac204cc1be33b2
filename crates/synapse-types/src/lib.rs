//! Synapse Types - Pure type definitions
//!
//! This crate contains only plain data types with no async runtime
//! dependencies: workspace nodes, per-file metadata, search filters,
//! chat transcripts and the session context.

pub mod filters;
pub mod message;
pub mod metadata;
pub mod node;
pub mod session;

pub use filters::*;
pub use message::*;
pub use metadata::*;
pub use node::*;
pub use session::*;
