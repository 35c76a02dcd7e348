//! `platform` context: validator and subnet administration.
//!
//! `createSubnet` takes trailing variadic control keys: everything after
//! `threshold` is a key. Arity validation only enforces the minimum, so
//! zero keys is accepted and left to the node to judge.

use snowshell_core::{CommandSpec, FieldSpec, Registry};

use crate::handler::{arg_or, client_err, parse_u32, parse_u64, Handler};

/// `subnetId` default meaning the primary network.
const PRIMARY_SUBNET: &str = "primary";

fn subnet_arg(args: &[String], index: usize) -> Option<String> {
    match arg_or(args, index, PRIMARY_SUBNET) {
        PRIMARY_SUBNET => None,
        id => Some(id.to_string()),
    }
}

/// Add this context's commands to the registry.
pub fn register(registry: &mut Registry<Handler>) {
    registry.register(
        CommandSpec::new(
            "platform",
            "createSubnet",
            vec![
                FieldSpec::required("username"),
                FieldSpec::required("password"),
                FieldSpec::required("threshold"),
                FieldSpec::optional("controlKeys...", ""),
            ],
            "Create a subnet controlled by the trailing keys",
        ),
        Box::new(|ctx, args| {
            Box::pin(async move {
                let threshold = parse_u32(&args[2], "threshold")?;
                let control_keys: Vec<String> = args[3..].to_vec();
                let tx_id = ctx
                    .client
                    .create_subnet(&args[0], &args[1], threshold, control_keys)
                    .await
                    .map_err(client_err)?;
                ctx.tracker.lock().add(&tx_id);
                Ok(format!("submitted {}", tx_id))
            })
        }),
    );

    registry.register(
        CommandSpec::new(
            "platform",
            "addValidator",
            vec![
                FieldSpec::required("nodeId"),
                FieldSpec::required("startTime"),
                FieldSpec::required("endTime"),
                FieldSpec::required("stakeAmount"),
                FieldSpec::optional("delegationFeeRate", "2"),
            ],
            "Register a validator for a staking period",
        ),
        Box::new(|ctx, args| {
            Box::pin(async move {
                let start = parse_u64(&args[1], "startTime")?;
                let end = parse_u64(&args[2], "endTime")?;
                let stake = parse_u64(&args[3], "stakeAmount")?;
                let fee = parse_u32(arg_or(&args, 4, "2"), "delegationFeeRate")?;
                let tx_id = ctx
                    .client
                    .add_validator(&args[0], start, end, stake, fee)
                    .await
                    .map_err(client_err)?;
                ctx.tracker.lock().add(&tx_id);
                Ok(format!("submitted {}", tx_id))
            })
        }),
    );

    registry.register(
        CommandSpec::new(
            "platform",
            "getCurrentValidators",
            vec![FieldSpec::optional("subnetId", PRIMARY_SUBNET)],
            "Validators currently active on a subnet",
        ),
        Box::new(|ctx, args| {
            Box::pin(async move {
                let validators = ctx
                    .client
                    .current_validators(subnet_arg(&args, 0))
                    .await
                    .map_err(client_err)?;
                if validators.is_empty() {
                    return Ok("no validators".to_string());
                }
                let lines: Vec<String> = validators
                    .iter()
                    .map(|v| format!("{}  stake {}  until {}", v.node_id, v.stake_amount, v.end_time))
                    .collect();
                Ok(lines.join("\n"))
            })
        }),
    );

    registry.register(
        CommandSpec::new(
            "platform",
            "sampleValidators",
            vec![
                FieldSpec::required("size"),
                FieldSpec::optional("subnetId", PRIMARY_SUBNET),
            ],
            "Sample validators from a subnet",
        ),
        Box::new(|ctx, args| {
            Box::pin(async move {
                let size = parse_u32(&args[0], "size")?;
                let sample = ctx
                    .client
                    .sample_validators(size, subnet_arg(&args, 1))
                    .await
                    .map_err(client_err)?;
                if sample.is_empty() {
                    return Ok("no validators sampled".to_string());
                }
                Ok(sample.join("\n"))
            })
        }),
    );

    registry.register(
        CommandSpec::new(
            "platform",
            "getBalance",
            vec![FieldSpec::required("address")],
            "Staking-token balance of a platform address",
        ),
        Box::new(|ctx, args| {
            Box::pin(async move {
                let balance = ctx
                    .client
                    .platform_balance(&args[0])
                    .await
                    .map_err(client_err)?;
                Ok(balance.to_string())
            })
        }),
    );

    registry.register(
        CommandSpec::new(
            "platform",
            "createAddress",
            vec![
                FieldSpec::required("username"),
                FieldSpec::required("password"),
            ],
            "Create a fresh platform address",
        ),
        Box::new(|ctx, args| {
            Box::pin(async move {
                ctx.client
                    .platform_create_address(&args[0], &args[1])
                    .await
                    .map_err(client_err)
            })
        }),
    );
}
