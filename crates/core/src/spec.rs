//! Declarative command specifications.
//!
//! A [`CommandSpec`] is an immutable description of one command's parameter
//! shape and help text, built once at startup and owned by the registry.
//! Validation is arity-only: the engine never type-checks or upper-bounds
//! arguments, handlers do their own coercion.

/// One parameter of a command.
///
/// A field without a default value is required; a default makes the field
/// optional and documents the fallback. A trailing variadic field (zero or
/// more tokens) is a naming convention, not a distinct type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Parameter name as shown in usage text.
    pub name: String,
    /// Fallback value; `None` marks the field required.
    pub default: Option<String>,
}

impl FieldSpec {
    /// A required field.
    pub fn required(name: &str) -> Self {
        Self {
            name: name.to_string(),
            default: None,
        }
    }

    /// An optional field with a documented default.
    pub fn optional(name: &str, default: &str) -> Self {
        Self {
            name: name.to_string(),
            default: Some(default.to_string()),
        }
    }
}

/// Immutable description of one command: name, owning context, ordered
/// fields and help text.
#[derive(Debug, Clone)]
pub struct CommandSpec {
    /// Command name as typed by the user.
    pub name: String,
    /// Context label the command belongs to.
    pub context: String,
    /// Ordered parameter list.
    pub fields: Vec<FieldSpec>,
    /// One-line description rendered under the usage line.
    pub description: String,
    /// Count of fields without a default, computed at construction.
    pub required_count: usize,
}

impl CommandSpec {
    /// Build a spec; `required_count` is derived from `fields`.
    pub fn new(context: &str, name: &str, fields: Vec<FieldSpec>, description: &str) -> Self {
        let required_count = fields.iter().filter(|f| f.default.is_none()).count();
        Self {
            name: name.to_string(),
            context: context.to_string(),
            fields,
            description: description.to_string(),
            required_count,
        }
    }

    /// Registry key, unique across all contexts.
    pub fn id(&self) -> String {
        format!("{}_{}", self.context, self.name)
    }

    /// Arity check: true iff at least `required_count` arguments were given.
    /// Extra or variadic trailing arguments always pass.
    pub fn validate_input(&self, args: &[String]) -> bool {
        args.len() >= self.required_count
    }

    /// Usage rendering: required field `f` as `<f>`, optional field with
    /// default `d` as `[f=d]`, description on the following line.
    pub fn usage(&self) -> String {
        let mut line = self.name.clone();
        for field in &self.fields {
            match &field.default {
                None => {
                    line.push_str(&format!(" <{}>", field.name));
                }
                // empty default marks a variadic tail, no `=` to show
                Some(d) if d.is_empty() => {
                    line.push_str(&format!(" [{}]", field.name));
                }
                Some(d) => {
                    line.push_str(&format!(" [{}={}]", field.name, d));
                }
            }
        }
        format!("{}\n    {}", line, self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds_spec() -> CommandSpec {
        CommandSpec::new(
            "keystore",
            "createUser",
            vec![
                FieldSpec::required("username"),
                FieldSpec::required("password"),
            ],
            "Create a new keystore user",
        )
    }

    #[test]
    fn required_count_skips_defaulted_fields() {
        let spec = CommandSpec::new(
            "avm",
            "getBalance",
            vec![
                FieldSpec::required("address"),
                FieldSpec::optional("assetId", "AVAX"),
            ],
            "Query a balance",
        );
        assert_eq!(spec.required_count, 1);
    }

    #[test]
    fn validate_input_checks_minimum_arity_only() {
        let spec = creds_spec();
        assert!(!spec.validate_input(&[]));
        assert!(!spec.validate_input(&["alice".into()]));
        assert!(spec.validate_input(&["alice".into(), "hunter2".into()]));
        // no upper bound: extra tokens always pass
        assert!(spec.validate_input(&["a".into(), "b".into(), "c".into(), "d".into()]));
    }

    #[test]
    fn usage_renders_required_and_optional_fields() {
        let spec = CommandSpec::new(
            "avm",
            "send",
            vec![
                FieldSpec::required("amount"),
                FieldSpec::optional("sourceChain", "X"),
            ],
            "Send an asset",
        );
        let usage = spec.usage();
        assert!(usage.starts_with("send <amount> [sourceChain=X]"));
        assert!(usage.contains("Send an asset"));
    }

    #[test]
    fn id_joins_context_and_name() {
        assert_eq!(creds_spec().id(), "keystore_createUser");
    }

    #[test]
    fn variadic_tail_renders_without_equals() {
        let spec = CommandSpec::new(
            "platform",
            "createSubnet",
            vec![
                FieldSpec::required("threshold"),
                FieldSpec::optional("controlKeys...", ""),
            ],
            "Create a subnet",
        );
        assert!(spec.usage().starts_with("createSubnet <threshold> [controlKeys...]"));
    }
}
