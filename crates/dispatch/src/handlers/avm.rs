//! `avm` context: asset-chain balances and transfers.
//!
//! `send` is the canonical asynchronously-submitted operation: the node
//! returns a transaction id immediately and the transfer settles later, so
//! the id goes into the pending tracker. `pendingTxs` polls every
//! still-processing entry before listing.

use snowshell_core::{CommandSpec, FieldSpec, Registry};

use crate::handler::{arg_or, client_err, parse_u64, Handler};
use crate::pending;

/// Add this context's commands to the registry.
pub fn register(registry: &mut Registry<Handler>) {
    registry.register(
        CommandSpec::new(
            "avm",
            "getBalance",
            vec![
                FieldSpec::required("address"),
                FieldSpec::optional("assetId", "AVAX"),
            ],
            "Balance of one asset at an address",
        ),
        Box::new(|ctx, args| {
            Box::pin(async move {
                let asset = arg_or(&args, 1, "AVAX").to_string();
                let balance = ctx
                    .client
                    .avm_balance(&args[0], &asset)
                    .await
                    .map_err(client_err)?;
                Ok(format!("{} {}", balance, asset))
            })
        }),
    );

    registry.register(
        CommandSpec::new(
            "avm",
            "getAllBalances",
            vec![FieldSpec::required("address")],
            "All asset balances at an address",
        ),
        Box::new(|ctx, args| {
            Box::pin(async move {
                let balances = ctx
                    .client
                    .avm_all_balances(&args[0])
                    .await
                    .map_err(client_err)?;
                if balances.is_empty() {
                    return Ok("no balances".to_string());
                }
                let lines: Vec<String> = balances
                    .iter()
                    .map(|(asset, amount)| format!("{}  {}", asset, amount))
                    .collect();
                Ok(lines.join("\n"))
            })
        }),
    );

    registry.register(
        CommandSpec::new(
            "avm",
            "send",
            vec![
                FieldSpec::required("amount"),
                FieldSpec::required("assetId"),
                FieldSpec::required("to"),
                FieldSpec::required("username"),
                FieldSpec::required("password"),
            ],
            "Send an asset; the returned tx id is tracked until settled",
        ),
        Box::new(|ctx, args| {
            Box::pin(async move {
                let amount = parse_u64(&args[0], "amount")?;
                let tx_id = ctx
                    .client
                    .avm_send(amount, &args[1], &args[2], &args[3], &args[4])
                    .await
                    .map_err(client_err)?;
                ctx.tracker.lock().add(&tx_id);
                Ok(format!("submitted {}", tx_id))
            })
        }),
    );

    registry.register(
        CommandSpec::new(
            "avm",
            "getTxStatus",
            vec![FieldSpec::required("txId")],
            "Status of a submitted transaction",
        ),
        Box::new(|ctx, args| {
            Box::pin(async move {
                let status = ctx.client.tx_status(&args[0]).await.map_err(client_err)?;
                Ok(pending::to_tx_state(status).as_str().to_string())
            })
        }),
    );

    registry.register(
        CommandSpec::new(
            "avm",
            "createAddress",
            vec![
                FieldSpec::required("username"),
                FieldSpec::required("password"),
            ],
            "Create a fresh asset-chain address",
        ),
        Box::new(|ctx, args| {
            Box::pin(async move {
                ctx.client
                    .avm_create_address(&args[0], &args[1])
                    .await
                    .map_err(client_err)
            })
        }),
    );

    registry.register(
        CommandSpec::new(
            "avm",
            "listAddresses",
            vec![
                FieldSpec::required("username"),
                FieldSpec::required("password"),
            ],
            "Addresses controlled by a user",
        ),
        Box::new(|ctx, args| {
            Box::pin(async move {
                let addresses = ctx
                    .client
                    .avm_list_addresses(&args[0], &args[1])
                    .await
                    .map_err(client_err)?;
                if addresses.is_empty() {
                    return Ok("no addresses".to_string());
                }
                Ok(addresses.join("\n"))
            })
        }),
    );

    registry.register(
        CommandSpec::new(
            "avm",
            "pendingTxs",
            vec![],
            "Poll and list tracked transactions",
        ),
        Box::new(|ctx, _args| {
            Box::pin(async move {
                pending::poll(&ctx).await?;
                Ok(ctx.tracker.lock().render_list())
            })
        }),
    );
}
