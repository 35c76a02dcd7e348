//! snowshell — interactive shell for an Avalanche-style blockchain node.
//!
//! Two modes:
//! - **REPL mode**: `snowshell [flags]` — interactive prompt (if stdin is a TTY)
//! - **Pipe mode**: `echo "info nodeId" | snowshell` — line-by-line from stdin

mod repl;

use std::cell::RefCell;
use std::io::IsTerminal;
use std::process;
use std::rc::Rc;
use std::sync::Arc;

use clap::{Arg, ArgAction, Command};
use tracing_subscriber::EnvFilter;

use snowshell_client::{ConnectionConfig, MockNodeClient, NodeClient, RpcNodeClient};
use snowshell_dispatch::{Connector, Dispatcher};

fn main() {
    let matches = build_cli().get_matches();

    let filter = if matches.get_flag("verbose") {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = ConnectionConfig {
        host: matches
            .get_one::<String>("host")
            .cloned()
            .unwrap_or_else(|| ConnectionConfig::default().host),
        port: *matches.get_one::<u16>("port").unwrap_or(&9650),
        protocol: matches
            .get_one::<String>("protocol")
            .cloned()
            .unwrap_or_else(|| ConnectionConfig::default().protocol),
    };

    let connector: Connector = if matches.get_flag("mock") {
        Box::new(|_| Arc::new(MockNodeClient::new()) as Arc<dyn NodeClient>)
    } else {
        Box::new(|cfg| Arc::new(RpcNodeClient::new(cfg)) as Arc<dyn NodeClient>)
    };

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("(error) failed to start runtime: {}", e);
            process::exit(1);
        }
    };

    let dispatcher = Rc::new(RefCell::new(Dispatcher::new(connector, config.clone())));

    // initial connection attempt; failure leaves the session usable
    let connect_line = format!(
        "connect {} {} {}",
        config.host, config.port, config.protocol
    );
    let reply = rt.block_on(dispatcher.borrow_mut().handle(&connect_line));
    if !reply.output.is_empty() {
        eprintln!("{}", reply.output);
    }

    if std::io::stdin().is_terminal() {
        println!("snowshell — type `help` for available commands, `exit` to quit");
        repl::run_repl(dispatcher, &rt);
    } else {
        let exit_code = repl::run_pipe(dispatcher, &rt);
        process::exit(exit_code);
    }
}

fn build_cli() -> Command {
    Command::new("snowshell")
        .about("Interactive shell for an Avalanche-style blockchain node")
        .arg(
            Arg::new("host")
                .long("host")
                .help("Node host (default: 127.0.0.1)"),
        )
        .arg(
            Arg::new("port")
                .long("port")
                .value_parser(clap::value_parser!(u16))
                .help("Node API port (default: 9650)"),
        )
        .arg(
            Arg::new("protocol")
                .long("protocol")
                .help("http or https (default: http)"),
        )
        .arg(
            Arg::new("mock")
                .long("mock")
                .action(ArgAction::SetTrue)
                .help("Run against an in-process mock node"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::SetTrue)
                .help("Debug-level logging to stderr"),
        )
}
