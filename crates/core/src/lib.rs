//! # snowshell-core
//!
//! Engine-side building blocks for the snowshell node shell:
//!
//! - [`CommandSpec`]/[`FieldSpec`] — declarative command descriptions
//! - [`Registry`] — static (context, command) table with help rendering and
//!   prefix completion
//! - [`PendingTracker`] — lifecycle store for submitted transactions
//! - [`Error`] — the user-facing failure taxonomy
//!
//! Nothing in here talks to a node or a terminal; the dispatch and cli
//! crates wire these pieces to the outside world.

#![warn(missing_docs)]

pub mod error;
pub mod pending;
pub mod registry;
pub mod spec;

pub use error::{Error, Result};
pub use pending::{PendingTracker, PendingTx, TxState};
pub use registry::{Registry, META_COMMANDS};
pub use spec::{CommandSpec, FieldSpec};
