//! `health` context: node health probes.

use snowshell_core::{CommandSpec, Registry};

use crate::handler::{client_err, Handler};

/// Add this context's commands to the registry.
pub fn register(registry: &mut Registry<Handler>) {
    registry.register(
        CommandSpec::new("health", "liveness", vec![], "Overall node health"),
        Box::new(|ctx, _args| {
            Box::pin(async move {
                let healthy = ctx.client.liveness().await.map_err(client_err)?;
                Ok(if healthy {
                    "healthy".to_string()
                } else {
                    "unhealthy".to_string()
                })
            })
        }),
    );
}
