//! Synapse - Core Library
//!
//! Workspace tree, folder expansion, search filtering, query routing and
//! the simulated operations behind the assistant and file dialogs.

pub mod config;
pub mod conversation;
pub mod dialogs;
pub mod error;
pub mod expansion;
pub mod ops;
pub mod preview;
pub mod router;
pub mod sample;
pub mod search;
pub mod session;
pub mod tree;
pub mod workspace;

pub use config::*;
pub use conversation::*;
pub use dialogs::*;
pub use error::*;
pub use expansion::*;
pub use ops::{
    OperationHandle, OperationKind, OperationState, OperationTimings, ProgressReporter, SimulatedOperation,
};
pub use preview::*;
pub use router::*;
pub use sample::*;
pub use search::*;
pub use session::*;
pub use tree::*;
pub use workspace::*;
