//! Per-context command tables.
//!
//! One module per context, each exposing a `register` function that adds
//! its command specs and handler closures to the shared registry. This is
//! the whole command surface: there is no runtime discovery, a command
//! exists iff it is registered here.

pub mod avm;
pub mod health;
pub mod info;
pub mod keystore;
pub mod platform;

use snowshell_core::Registry;

use crate::handler::Handler;

/// Build the full registry. Called once at startup; context registration
/// order here is the order `listTopLevel` reports them in.
pub fn build_registry() -> Registry<Handler> {
    let mut registry = Registry::new();
    info::register(&mut registry);
    keystore::register(&mut registry);
    avm::register(&mut registry);
    platform::register(&mut registry);
    health::register(&mut registry);
    registry
}
