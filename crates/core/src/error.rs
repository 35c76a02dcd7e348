//! Error types for the dispatch engine.
//!
//! Every failure a command line can produce is represented here. All of
//! these are recoverable at the dispatch boundary: they are rendered to the
//! user and the session continues. We use `thiserror` for automatic
//! `Display` and `Error` trait implementations.

use thiserror::Error;

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while resolving and validating a command line.
#[derive(Debug, Error)]
pub enum Error {
    /// Argument count below the command's required minimum.
    #[error("invalid arguments\n{usage}")]
    Usage {
        /// Usage text of the offending command.
        usage: String,
    },

    /// First token is neither a meta command nor a registered context.
    #[error("unknown context or command: {0}")]
    UnknownContext(String),

    /// Command name not registered in the resolved context.
    #[error("unknown method `{method}` in context `{context}`")]
    UnknownCommand {
        /// The unresolved command name.
        method: String,
        /// The context it was looked up in.
        context: String,
    },

    /// Session has no live node connection; the handler was never invoked.
    #[error("not connected to a node\nusage: connect [host=127.0.0.1] [port=9650] [protocol=http]")]
    Disconnected,

    /// A handler body (or the node client beneath it) failed.
    /// Swallowed at the dispatch boundary after logging.
    #[error("{0}")]
    Handler(String),

    /// The `connect` collaborator call failed; connectivity stays down.
    #[error("connection failed: {0}")]
    Connect(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_command_names_method_and_context() {
        let err = Error::UnknownCommand {
            method: "bogus".into(),
            context: "keystore".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("`bogus`"));
        assert!(msg.contains("`keystore`"));
    }

    #[test]
    fn disconnected_carries_connect_hint() {
        let msg = Error::Disconnected.to_string();
        assert!(msg.contains("connect [host=127.0.0.1]"));
    }
}
