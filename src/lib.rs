//! # snowshell
//!
//! Interactive shell for an Avalanche-style blockchain node. This facade
//! re-exports the pieces most embedders need; the `snowshell` binary in
//! `crates/cli` is a thin rustyline front-end over the same API.
//!
//! ```text
//! use snowshell::{ConnectionConfig, Dispatcher};
//!
//! let mut dispatcher = Dispatcher::new(connector, ConnectionConfig::default());
//! let reply = dispatcher.handle("info nodeId").await;
//! println!("{}", reply.output);
//! ```
//!
//! Input grammar:
//!
//! ```text
//! help
//! <context> help
//! <context>                         ; navigation shortcut
//! <context> <command> [args...]     ; top level
//! <command> [args...]               ; when a context is active
//! exit
//! connect [host=127.0.0.1] [port=9650] [protocol=http]
//! ```

#![warn(missing_docs)]

pub use snowshell_core::{
    CommandSpec, Error, FieldSpec, PendingTracker, Registry, Result, TxState, META_COMMANDS,
};

pub use snowshell_client::{
    ClientError, ConnectionConfig, MockNodeClient, NodeClient, RpcNodeClient, TxStatus,
};

pub use snowshell_dispatch::{Connector, Dispatcher, Flow, Handler, HandlerCtx, Reply, Session};
