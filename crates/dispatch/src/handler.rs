//! Handler plumbing shared by all context modules.
//!
//! A handler is a boxed closure from (shared collaborators, remaining
//! string tokens) to a boxed future. Handlers own all argument coercion;
//! the dispatcher only checks arity before invoking them.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use parking_lot::Mutex;

use snowshell_client::{ClientError, NodeClient};
use snowshell_core::pending::PendingTracker;
use snowshell_core::{Error, Result};

/// Collaborators every handler can reach: the node client and the shared
/// pending-transaction tracker.
#[derive(Clone)]
pub struct HandlerCtx {
    /// Live node client. Swapped out wholesale on reconnect.
    pub client: Arc<dyn NodeClient>,
    /// Tracker for asynchronously-submitted transactions.
    pub tracker: Arc<Mutex<PendingTracker>>,
}

/// What a handler produces: rendered output text, or a recoverable error
/// that the dispatch boundary logs and swallows.
pub type HandlerResult = Result<String>;

/// Boxed handler future.
pub type HandlerFuture = Pin<Box<dyn Future<Output = HandlerResult> + Send>>;

/// One entry in the command table.
pub type Handler = Box<dyn Fn(HandlerCtx, Vec<String>) -> HandlerFuture + Send + Sync>;

/// Map a node client failure into the dispatch error taxonomy.
pub fn client_err(e: ClientError) -> Error {
    Error::Handler(e.to_string())
}

/// Positional argument, or the documented default when absent.
pub fn arg_or<'a>(args: &'a [String], index: usize, default: &'a str) -> &'a str {
    args.get(index).map(String::as_str).unwrap_or(default)
}

/// Coerce one argument to `u64`; failures surface as handler errors.
pub fn parse_u64(value: &str, field: &str) -> Result<u64> {
    value
        .parse::<u64>()
        .map_err(|_| Error::Handler(format!("`{}` is not a valid {}", value, field)))
}

/// Coerce one argument to `u32`.
pub fn parse_u32(value: &str, field: &str) -> Result<u32> {
    value
        .parse::<u32>()
        .map_err(|_| Error::Handler(format!("`{}` is not a valid {}", value, field)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arg_or_falls_back_to_default() {
        let args = vec!["given".to_string()];
        assert_eq!(arg_or(&args, 0, "fallback"), "given");
        assert_eq!(arg_or(&args, 1, "fallback"), "fallback");
    }

    #[test]
    fn parse_u64_names_the_field_on_failure() {
        let err = parse_u64("twelve", "amount").unwrap_err();
        assert!(err.to_string().contains("amount"));
    }
}
