//! Context-switching command dispatcher.
//!
//! One [`Dispatcher`] owns the registry, the session state and the live
//! node client, and processes exactly one input line at a time. Every
//! domain failure terminates here: `handle` renders it and the session
//! continues. Only the front-end reacts to [`Flow::Exit`].

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{error, info};

use snowshell_client::{ConnectionConfig, NodeClient};
use snowshell_core::pending::PendingTracker;
use snowshell_core::{Error, Registry};

use crate::handler::{arg_or, Handler, HandlerCtx};
use crate::handlers;
use crate::session::Session;

/// What the front-end should do after rendering a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep reading input.
    Continue,
    /// Terminate the session (typed `exit` at top level).
    Exit,
}

/// Rendered outcome of one input line.
#[derive(Debug)]
pub struct Reply {
    /// Text to show the user; may be empty.
    pub output: String,
    /// Continue or terminate.
    pub flow: Flow,
    error: bool,
}

impl Reply {
    fn text(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            flow: Flow::Continue,
            error: false,
        }
    }

    fn exit() -> Self {
        Self {
            output: String::new(),
            flow: Flow::Exit,
            error: false,
        }
    }

    fn err(e: Error) -> Self {
        Self::error_text(format!("(error) {}", e))
    }

    fn error_text(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            flow: Flow::Continue,
            error: true,
        }
    }

    /// Whether this reply reports a failure (pipe mode exit codes).
    pub fn is_error(&self) -> bool {
        self.error
    }
}

/// Factory for node clients, called on every `connect`. The binary plugs
/// in the JSON-RPC client here, tests plug in the mock.
pub type Connector = Box<dyn Fn(&ConnectionConfig) -> Arc<dyn NodeClient> + Send + Sync>;

/// Owns session state and routes input lines to handlers.
pub struct Dispatcher {
    registry: Registry<Handler>,
    session: Session,
    ctx: HandlerCtx,
    connector: Connector,
    config: ConnectionConfig,
}

impl Dispatcher {
    /// Build a dispatcher around a client factory. The session starts
    /// disconnected; issue a `connect` line to bring it up.
    pub fn new(connector: Connector, config: ConnectionConfig) -> Self {
        let client = connector(&config);
        Self {
            registry: handlers::build_registry(),
            session: Session::new(),
            ctx: HandlerCtx {
                client,
                tracker: Arc::new(Mutex::new(PendingTracker::new())),
            },
            connector,
            config,
        }
    }

    /// Session state, read-only.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Prompt for the front-end.
    pub fn prompt(&self) -> String {
        self.session.prompt()
    }

    /// Completion candidates for a partial line.
    pub fn complete(&self, line: &str) -> Vec<String> {
        let mut tokens: Vec<String> = line.split_whitespace().map(str::to_string).collect();
        if line.ends_with(char::is_whitespace) || tokens.is_empty() {
            tokens.push(String::new());
        }
        self.registry.complete(&tokens, self.session.active_context())
    }

    /// Process one input line to completion.
    pub async fn handle(&mut self, line: &str) -> Reply {
        let tokens = match shlex::split(line) {
            Some(t) => t,
            None => return Reply::error_text("(error) invalid quoting"),
        };
        if tokens.is_empty() {
            return Reply::text(self.basic_usage());
        }

        // help, in both states, never transitions
        if tokens.len() == 1 && tokens[0] == "help" {
            return Reply::text(self.registry.render_help(None));
        }
        if tokens.len() == 2 && tokens[1] == "help" && self.registry.has_context(&tokens[0]) {
            return Reply::text(self.registry.render_help(Some(tokens[0].as_str())));
        }

        // exit pops to top level, or terminates from there
        if tokens.len() == 1 && tokens[0] == "exit" {
            if self.session.leave() {
                return Reply::text("");
            }
            return Reply::exit();
        }

        // connect re-establishes connectivity, never transitions
        if tokens[0] == "connect" {
            return self.connect(&tokens[1..]).await;
        }

        // bare context name at top level doubles as navigation
        if self.session.active_context().is_none()
            && tokens.len() == 1
            && self.registry.has_context(&tokens[0])
        {
            self.session.enter(&tokens[0]);
            return Reply::text("");
        }

        // resolve (context, method, args)
        let (context, method, args) = match self.session.active_context() {
            Some(active) => (
                active.to_string(),
                tokens[0].clone(),
                tokens[1..].to_vec(),
            ),
            None => {
                if tokens.len() < 2 {
                    return Reply::text(self.basic_usage());
                }
                (tokens[0].clone(), tokens[1].clone(), tokens[2..].to_vec())
            }
        };

        if !self.registry.has_context(&context) {
            return Reply::err(Error::UnknownContext(context));
        }

        let future = match self.registry.lookup(&context, &method) {
            None => {
                return Reply::err(Error::UnknownCommand { method, context });
            }
            Some((spec, handler)) => {
                // connectivity gate: the handler is never invoked offline
                if !self.session.connected() {
                    return Reply::err(Error::Disconnected);
                }
                if !spec.validate_input(&args) {
                    return Reply::err(Error::Usage {
                        usage: spec.usage(),
                    });
                }
                handler(self.ctx.clone(), args)
            }
        };

        // the single swallow-all boundary: domain failures are rendered
        // and logged, never re-raised
        match future.await {
            Ok(output) => Reply::text(output),
            Err(e) => {
                error!(context = %context, method = %method, error = %e, "command failed");
                Reply::err(e)
            }
        }
    }

    /// `connect [host] [port] [protocol]` with documented defaults.
    async fn connect(&mut self, args: &[String]) -> Reply {
        let defaults = ConnectionConfig::default();
        let host = arg_or(args, 0, &defaults.host).to_string();
        let port = match arg_or(args, 1, "9650").parse::<u16>() {
            Ok(p) => p,
            Err(_) => {
                self.session.set_connected(false);
                return Reply::err(Error::Connect(format!(
                    "`{}` is not a valid port",
                    arg_or(args, 1, "9650")
                )));
            }
        };
        let protocol = arg_or(args, 2, &defaults.protocol).to_string();

        let config = ConnectionConfig {
            host,
            port,
            protocol,
        };
        let client = (self.connector)(&config);
        match client.ping().await {
            Ok(()) => {
                info!(endpoint = %config.endpoint(), "connected");
                self.ctx.client = client;
                self.config = config.clone();
                self.session.set_connected(true);
                Reply::text(format!("connected to {}", config.endpoint()))
            }
            Err(e) => {
                self.session.set_connected(false);
                Reply::err(Error::Connect(e.to_string()))
            }
        }
    }

    fn basic_usage(&self) -> String {
        "usage: <context> <command> [args...], or <command> [args...] inside a context\n\
         type `help` for available commands"
            .to_string()
    }
}
