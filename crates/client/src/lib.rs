//! # snowshell-client
//!
//! The node-side collaborator of the shell: the [`NodeClient`] trait every
//! context's handlers call into, a JSON-RPC implementation for real nodes,
//! and a counting mock for tests and offline use.

#![warn(missing_docs)]

pub mod api;
pub mod error;
pub mod mock;
pub mod rpc;

pub use api::{ConnectionConfig, NodeClient, PeerInfo, TxStatus, ValidatorInfo};
pub use error::{ClientError, Result};
pub use mock::MockNodeClient;
pub use rpc::RpcNodeClient;
