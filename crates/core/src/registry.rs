//! Static command registry.
//!
//! Built once at startup from explicit per-context registration calls and
//! immutable afterwards. The registry is generic over the handler payload
//! `H` so this crate stays free of any async or client machinery: the
//! dispatch layer instantiates it with boxed handler closures, tests with
//! whatever is convenient.

use std::collections::HashMap;

use crate::spec::CommandSpec;

/// Dispatcher-level commands that belong to no context.
pub const META_COMMANDS: &[&str] = &["help", "exit", "connect"];

struct Entry<H> {
    spec: CommandSpec,
    handler: H,
}

/// Table of (context, command) → spec + handler, preserving registration
/// order of contexts and declaration order of commands within a context.
pub struct Registry<H> {
    entries: Vec<Entry<H>>,
    by_id: HashMap<String, usize>,
    contexts: Vec<String>,
}

impl<H> Default for Registry<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> Registry<H> {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            by_id: HashMap::new(),
            contexts: Vec::new(),
        }
    }

    /// Register one command.
    ///
    /// Panics on a duplicate id: that is a programming error in the static
    /// command tables and may only surface at startup, before the session
    /// becomes interactive.
    pub fn register(&mut self, spec: CommandSpec, handler: H) {
        let id = spec.id();
        if self.by_id.contains_key(&id) {
            panic!("duplicate command id registered: {}", id);
        }
        if !self.contexts.iter().any(|c| c == &spec.context) {
            self.contexts.push(spec.context.clone());
        }
        self.by_id.insert(id, self.entries.len());
        self.entries.push(Entry { spec, handler });
    }

    /// Whether `name` is a registered context label.
    pub fn has_context(&self, name: &str) -> bool {
        self.contexts.iter().any(|c| c == name)
    }

    /// Context labels in registration order.
    pub fn contexts(&self) -> &[String] {
        &self.contexts
    }

    /// Resolve one command within a context.
    pub fn lookup(&self, context: &str, name: &str) -> Option<(&CommandSpec, &H)> {
        let id = format!("{}_{}", context, name);
        self.by_id
            .get(&id)
            .map(|&i| (&self.entries[i].spec, &self.entries[i].handler))
    }

    /// Names invocable at top level: meta commands first, then every
    /// context name in registration order.
    pub fn list_top_level(&self) -> Vec<String> {
        let mut names: Vec<String> = META_COMMANDS.iter().map(|s| s.to_string()).collect();
        names.extend(self.contexts.iter().cloned());
        names
    }

    /// Names invocable inside `context`: its commands in declaration order,
    /// then the meta commands.
    pub fn list_context(&self, context: &str) -> Vec<String> {
        let mut names: Vec<String> = self
            .entries
            .iter()
            .filter(|e| e.spec.context == context)
            .map(|e| e.spec.name.clone())
            .collect();
        names.extend(META_COMMANDS.iter().map(|s| s.to_string()));
        names
    }

    /// All ids, in registration order.
    pub fn ids(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.spec.id()).collect()
    }

    /// Render help text for all contexts, or just `target`.
    ///
    /// Contexts come out in sorted-name order, commands sorted within each
    /// context, one usage block per command separated by blank lines.
    pub fn render_help(&self, target: Option<&str>) -> String {
        let mut contexts: Vec<&String> = match target {
            Some(t) => self.contexts.iter().filter(|c| c.as_str() == t).collect(),
            None => self.contexts.iter().collect(),
        };
        contexts.sort();

        let mut out = String::new();
        for context in contexts {
            out.push_str(&format!("--- {} ---\n", context));
            let mut specs: Vec<&CommandSpec> = self
                .entries
                .iter()
                .filter(|e| &e.spec.context == context)
                .map(|e| &e.spec)
                .collect();
            specs.sort_by(|a, b| a.name.cmp(&b.name));
            for spec in specs {
                out.push_str(&spec.usage());
                out.push_str("\n\n");
            }
        }
        out
    }

    /// Prefix-match completion over the partial line's tokens.
    ///
    /// Matching is case-sensitive `starts_with`; candidates keep their
    /// source order. A trailing empty token stands for "new word started".
    pub fn complete(&self, tokens: &[String], active_context: Option<&str>) -> Vec<String> {
        let candidates: Vec<String> = match (active_context, tokens.len()) {
            (None, 1) => self.list_top_level(),
            (None, 2) if self.has_context(&tokens[0]) => self.list_context(&tokens[0]),
            (Some(ctx), 1) => self.list_context(ctx),
            _ => return Vec::new(),
        };
        let prefix = tokens.last().map(String::as_str).unwrap_or("");
        candidates
            .into_iter()
            .filter(|c| c.starts_with(prefix))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::FieldSpec;

    fn spec(context: &str, name: &str) -> CommandSpec {
        CommandSpec::new(context, name, vec![FieldSpec::required("x")], "test command")
    }

    fn sample_registry() -> Registry<u32> {
        let mut reg = Registry::new();
        reg.register(spec("info", "nodeId"), 0);
        reg.register(spec("platform", "createSubnet"), 1);
        reg.register(spec("platform", "addValidator"), 2);
        reg.register(spec("keystore", "createUser"), 3);
        reg
    }

    #[test]
    fn ids_are_pairwise_distinct() {
        let reg = sample_registry();
        let ids = reg.ids();
        for (i, a) in ids.iter().enumerate() {
            for b in ids.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    #[should_panic(expected = "duplicate command id")]
    fn duplicate_id_panics() {
        let mut reg = sample_registry();
        reg.register(spec("info", "nodeId"), 9);
    }

    #[test]
    fn top_level_starts_with_meta_then_contexts_in_registration_order() {
        let reg = sample_registry();
        let names = reg.list_top_level();
        assert_eq!(names[0], "help");
        assert_eq!(names[1], "exit");
        assert_eq!(names[2], "connect");
        assert_eq!(&names[3..], &["info", "platform", "keystore"]);
    }

    #[test]
    fn context_listing_keeps_declaration_order_then_meta() {
        let reg = sample_registry();
        let names = reg.list_context("platform");
        assert_eq!(
            names,
            vec!["createSubnet", "addValidator", "help", "exit", "connect"]
        );
    }

    #[test]
    fn lookup_resolves_only_registered_pairs() {
        let reg = sample_registry();
        assert!(reg.lookup("info", "nodeId").is_some());
        assert!(reg.lookup("info", "createUser").is_none());
        assert!(reg.lookup("avm", "nodeId").is_none());
    }

    #[test]
    fn complete_prefix_matches_top_level() {
        let reg = sample_registry();
        let matches = reg.complete(&["pl".into()], None);
        assert_eq!(matches, vec!["platform".to_string()]);
    }

    #[test]
    fn complete_second_token_against_context_commands() {
        let reg = sample_registry();
        let matches = reg.complete(&["platform".into(), "create".into()], None);
        assert_eq!(matches, vec!["createSubnet".to_string()]);
    }

    #[test]
    fn complete_in_context_single_token() {
        let reg = sample_registry();
        let matches = reg.complete(&["add".into()], Some("platform"));
        assert_eq!(matches, vec!["addValidator".to_string()]);
    }

    #[test]
    fn complete_is_case_sensitive_and_empty_elsewhere() {
        let reg = sample_registry();
        assert!(reg.complete(&["PL".into()], None).is_empty());
        assert!(reg
            .complete(&["a".into(), "b".into(), "c".into()], None)
            .is_empty());
    }

    #[test]
    fn help_orders_contexts_and_commands_alphabetically() {
        let reg = sample_registry();
        let help = reg.render_help(None);
        let info_at = help.find("--- info ---").unwrap();
        let keystore_at = help.find("--- keystore ---").unwrap();
        let platform_at = help.find("--- platform ---").unwrap();
        assert!(info_at < keystore_at && keystore_at < platform_at);
        // within platform, addValidator sorts before createSubnet
        assert!(help.find("addValidator").unwrap() < help.find("createSubnet").unwrap());
    }

    #[test]
    fn help_for_single_context_omits_the_rest() {
        let reg = sample_registry();
        let help = reg.render_help(Some("keystore"));
        assert!(help.contains("--- keystore ---"));
        assert!(!help.contains("--- platform ---"));
    }
}
