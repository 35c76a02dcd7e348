//! End-to-end session tests through the public facade: one dispatcher, a
//! mock node, scripted input lines.

use std::sync::Arc;

use snowshell::{ConnectionConfig, Dispatcher, Flow, MockNodeClient, NodeClient, TxState};

/// Dispatcher wired to a shared mock node, already connected.
fn shell() -> (Dispatcher, Arc<MockNodeClient>) {
    let mock = Arc::new(MockNodeClient::new());
    let client: Arc<dyn NodeClient> = mock.clone();
    let mut dispatcher = Dispatcher::new(
        Box::new(move |_| client.clone()),
        ConnectionConfig::default(),
    );
    let reply = block_on(dispatcher.handle("connect"));
    assert!(reply.output.contains("connected to http://127.0.0.1:9650"));
    (dispatcher, mock)
}

fn block_on<F: std::future::Future>(fut: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
        .block_on(fut)
}

#[test]
fn full_session_script() {
    let (mut shell, mock) = shell();

    // top-level command with explicit context
    let reply = block_on(shell.handle("info nodeId"));
    assert!(reply.output.contains("NodeID-"));

    // navigate into a context and command without the prefix
    block_on(shell.handle("keystore"));
    assert_eq!(shell.session().active_context(), Some("keystore"));
    let reply = block_on(shell.handle("listUsers"));
    assert!(reply.output.contains("alice"));
    assert_eq!(mock.calls("list_users"), 1);

    // exit pops to top level, second exit terminates
    assert_eq!(block_on(shell.handle("exit")).flow, Flow::Continue);
    assert_eq!(shell.session().active_context(), None);
    assert_eq!(block_on(shell.handle("exit")).flow, Flow::Exit);
}

#[test]
fn help_is_read_only_in_both_states() {
    let (mut shell, _mock) = shell();

    let full = block_on(shell.handle("help"));
    assert!(full.output.contains("--- keystore ---"));
    assert!(full.output.contains("--- platform ---"));

    let scoped = block_on(shell.handle("keystore help"));
    assert!(scoped.output.contains("createUser <username> <password>"));
    assert!(!scoped.output.contains("--- platform ---"));
    assert_eq!(shell.session().active_context(), None);

    block_on(shell.handle("platform"));
    let in_context = block_on(shell.handle("help"));
    assert!(in_context.output.contains("--- info ---"));
    assert_eq!(shell.session().active_context(), Some("platform"));
}

#[test]
fn submitted_transactions_are_tracked_and_polled() {
    let (mut shell, mock) = shell();

    let reply = block_on(shell.handle("avm send 500 AVAX X-dest alice secret"));
    assert!(reply.output.starts_with("submitted "));
    let tx_id = reply.output.trim_start_matches("submitted ").to_string();

    // still processing on first listing
    let listing = block_on(shell.handle("avm pendingTxs")).output;
    assert!(listing.contains(&tx_id));
    assert!(listing.contains(TxState::Processing.as_str()));

    // node accepts; the next listing reflects it
    mock.set_tx_status(&tx_id, snowshell::TxStatus::Accepted);
    let listing = block_on(shell.handle("avm pendingTxs")).output;
    assert!(listing.contains(TxState::Accepted.as_str()));
}

#[test]
fn disconnected_shell_refuses_without_invoking() {
    let mock = Arc::new(MockNodeClient::new());
    let client: Arc<dyn NodeClient> = mock.clone();
    let mut shell = Dispatcher::new(
        Box::new(move |_| client.clone()),
        ConnectionConfig::default(),
    );

    let reply = block_on(shell.handle("info nodeId"));
    assert!(reply.output.contains("not connected"));
    assert_eq!(mock.calls("node_id"), 0);

    // help and navigation still work while disconnected
    let reply = block_on(shell.handle("help"));
    assert!(reply.output.contains("--- info ---"));
    block_on(shell.handle("info"));
    assert_eq!(shell.session().active_context(), Some("info"));
}

#[test]
fn errors_never_escape_the_dispatch_boundary() {
    let (mut shell, mock) = shell();
    mock.set_failure("rpc timeout");

    for line in [
        "info peers",
        "keystore listUsers",
        "platform getCurrentValidators",
        "health liveness",
    ] {
        let reply = block_on(shell.handle(line));
        assert_eq!(reply.flow, Flow::Continue);
        assert!(reply.output.contains("rpc timeout"));
    }
}

#[test]
fn completion_covers_contexts_meta_and_commands() {
    let (shell, _mock) = shell();
    assert_eq!(shell.complete("pl"), vec!["platform".to_string()]);
    assert!(shell.complete("").contains(&"help".to_string()));
    assert!(shell.complete("keystore ").contains(&"createUser".to_string()));
}
