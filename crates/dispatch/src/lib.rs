//! # snowshell-dispatch
//!
//! The command dispatch engine: a [`Dispatcher`] owning session state and
//! the node client, per-context handler tables, and status polling for
//! pending transactions. The cli crate is a thin rustyline front-end over
//! [`Dispatcher::handle`].

#![warn(missing_docs)]

pub mod dispatcher;
pub mod handler;
pub mod handlers;
pub mod pending;
pub mod session;

pub use dispatcher::{Connector, Dispatcher, Flow, Reply};
pub use handler::{Handler, HandlerCtx};
pub use session::Session;
