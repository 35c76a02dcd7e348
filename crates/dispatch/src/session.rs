//! Session state: active context and connectivity.
//!
//! At most one context is active at a time; `None` means top level, where
//! commands must be prefixed by their context name. All mutation goes
//! through the transition methods below, the dispatcher never pokes fields
//! directly from handler code.

/// Per-session mutable state.
#[derive(Debug, Default)]
pub struct Session {
    active_context: Option<String>,
    connected: bool,
}

impl Session {
    /// A fresh, disconnected, top-level session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently active context, if any.
    pub fn active_context(&self) -> Option<&str> {
        self.active_context.as_deref()
    }

    /// Whether the node connection is live.
    pub fn connected(&self) -> bool {
        self.connected
    }

    /// Enter a context (top level → in-context).
    pub fn enter(&mut self, context: &str) {
        self.active_context = Some(context.to_string());
    }

    /// Leave the active context (in-context → top level). Returns whether
    /// there was a context to leave.
    pub fn leave(&mut self) -> bool {
        self.active_context.take().is_some()
    }

    /// Record the outcome of a `connect` attempt.
    pub fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
    }

    /// Prompt string for the front-end.
    pub fn prompt(&self) -> String {
        match &self.active_context {
            Some(ctx) => format!("snowshell:{}> ", ctx),
            None => "snowshell> ".to_string(),
        }
    }
}
