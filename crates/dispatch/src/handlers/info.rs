//! `info` context: node identity and network details.

use snowshell_core::{CommandSpec, FieldSpec, Registry};

use crate::handler::{client_err, Handler};

/// Add this context's commands to the registry.
pub fn register(registry: &mut Registry<Handler>) {
    registry.register(
        CommandSpec::new("info", "nodeId", vec![], "Show this node's id"),
        Box::new(|ctx, _args| {
            Box::pin(async move { ctx.client.node_id().await.map_err(client_err) })
        }),
    );

    registry.register(
        CommandSpec::new("info", "nodeVersion", vec![], "Show the node software version"),
        Box::new(|ctx, _args| {
            Box::pin(async move { ctx.client.node_version().await.map_err(client_err) })
        }),
    );

    registry.register(
        CommandSpec::new("info", "networkId", vec![], "Show the numeric network id"),
        Box::new(|ctx, _args| {
            Box::pin(async move {
                let id = ctx.client.network_id().await.map_err(client_err)?;
                Ok(id.to_string())
            })
        }),
    );

    registry.register(
        CommandSpec::new("info", "networkName", vec![], "Show the network name"),
        Box::new(|ctx, _args| {
            Box::pin(async move { ctx.client.network_name().await.map_err(client_err) })
        }),
    );

    registry.register(
        CommandSpec::new("info", "nodeIp", vec![], "Show this node's advertised address"),
        Box::new(|ctx, _args| {
            Box::pin(async move { ctx.client.node_ip().await.map_err(client_err) })
        }),
    );

    registry.register(
        CommandSpec::new("info", "peers", vec![], "List connected peers"),
        Box::new(|ctx, _args| {
            Box::pin(async move {
                let peers = ctx.client.peers().await.map_err(client_err)?;
                if peers.is_empty() {
                    return Ok("no peers connected".to_string());
                }
                let lines: Vec<String> = peers
                    .iter()
                    .map(|p| format!("{}  {}  {}", p.node_id, p.ip, p.version))
                    .collect();
                Ok(lines.join("\n"))
            })
        }),
    );

    registry.register(
        CommandSpec::new(
            "info",
            "isBootstrapped",
            vec![FieldSpec::required("chain")],
            "Whether a chain has finished bootstrapping",
        ),
        Box::new(|ctx, args| {
            Box::pin(async move {
                let done = ctx
                    .client
                    .is_bootstrapped(&args[0])
                    .await
                    .map_err(client_err)?;
                Ok(done.to_string())
            })
        }),
    );
}
