//! `keystore` context: user management on the node's keystore.

use snowshell_core::{CommandSpec, FieldSpec, Registry};

use crate::handler::{client_err, Handler};

/// Add this context's commands to the registry.
pub fn register(registry: &mut Registry<Handler>) {
    registry.register(
        CommandSpec::new(
            "keystore",
            "createUser",
            vec![
                FieldSpec::required("username"),
                FieldSpec::required("password"),
            ],
            "Create a new keystore user",
        ),
        Box::new(|ctx, args| {
            Box::pin(async move {
                ctx.client
                    .create_user(&args[0], &args[1])
                    .await
                    .map_err(client_err)?;
                Ok(format!("created user {}", args[0]))
            })
        }),
    );

    registry.register(
        CommandSpec::new("keystore", "listUsers", vec![], "List keystore users"),
        Box::new(|ctx, _args| {
            Box::pin(async move {
                let users = ctx.client.list_users().await.map_err(client_err)?;
                if users.is_empty() {
                    return Ok("no users".to_string());
                }
                Ok(users.join("\n"))
            })
        }),
    );

    registry.register(
        CommandSpec::new(
            "keystore",
            "deleteUser",
            vec![
                FieldSpec::required("username"),
                FieldSpec::required("password"),
            ],
            "Delete a keystore user",
        ),
        Box::new(|ctx, args| {
            Box::pin(async move {
                ctx.client
                    .delete_user(&args[0], &args[1])
                    .await
                    .map_err(client_err)?;
                Ok(format!("deleted user {}", args[0]))
            })
        }),
    );

    registry.register(
        CommandSpec::new(
            "keystore",
            "exportUser",
            vec![
                FieldSpec::required("username"),
                FieldSpec::required("password"),
            ],
            "Export a user as an encoded blob",
        ),
        Box::new(|ctx, args| {
            Box::pin(async move {
                ctx.client
                    .export_user(&args[0], &args[1])
                    .await
                    .map_err(client_err)
            })
        }),
    );

    registry.register(
        CommandSpec::new(
            "keystore",
            "importUser",
            vec![
                FieldSpec::required("username"),
                FieldSpec::required("password"),
                FieldSpec::required("user"),
            ],
            "Import a previously exported user blob",
        ),
        Box::new(|ctx, args| {
            Box::pin(async move {
                ctx.client
                    .import_user(&args[0], &args[1], &args[2])
                    .await
                    .map_err(client_err)?;
                Ok(format!("imported user {}", args[0]))
            })
        }),
    );
}
