//! Plugin factory example for named-registry.
//!
//! Demonstrates:
//! - Registering plugin constructors in a global factory
//! - Creating plugins with arguments and handling partial failures
//! - Sharing created plugins through a global registry
//! - Watching operations through `tracing` logs and a trace callback
//!
//! Run with: `RUST_LOG=named_registry=debug cargo run --example plugin_factory`

use named_registry::{
    constructor, define_factory, define_registry, Constructor, Object, RegistryError,
};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

define_factory!(plugins);
define_registry!(running);

trait Plugin: Send + Sync {
    fn name(&self) -> &str;
    fn run(&self) -> String;
}

struct Echo {
    prefix: String,
}

impl Plugin for Echo {
    fn name(&self) -> &str {
        "echo"
    }

    fn run(&self) -> String {
        format!("{} hello", self.prefix)
    }
}

struct Counter {
    start: u32,
}

impl Plugin for Counter {
    fn name(&self) -> &str {
        "counter"
    }

    fn run(&self) -> String {
        format!("counting from {}", self.start)
    }
}

/// Plugins are stored as `Arc<dyn Plugin>` inside the type-erased object.
fn plugin_object(plugin: impl Plugin + 'static) -> Object {
    Arc::new(Arc::new(plugin) as Arc<dyn Plugin>)
}

fn echo() -> Constructor<Object> {
    constructor(|args: &[Object]| {
        let prefix = args
            .first()
            .and_then(|arg| arg.downcast_ref::<String>())
            .cloned()
            .unwrap_or_else(|| ">".to_string());
        Ok(Some(plugin_object(Echo { prefix })))
    })
}

fn counter() -> Constructor<Object> {
    constructor(|args: &[Object]| {
        let start = args
            .iter()
            .find_map(|arg| arg.downcast_ref::<u32>())
            .ok_or("counter needs a u32 start value")?;
        Ok(Some(plugin_object(Counter { start: *start })))
    })
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== named-registry: Plugin Factory ===\n");

    // -------------------------------------------------------------------------
    // 1. Register constructors
    // -------------------------------------------------------------------------
    println!("1. Registering plugin constructors...");

    plugins::set_trace_callback(|event| println!("   [trace] {event}"));

    if let Err(err) = plugins::adds([
        ("echo", Some(echo())),
        ("counter", Some(counter())),
        ("broken", None),
    ]) {
        println!("   Some constructors were rejected: {err}");
    }
    println!("   Registered: {} constructors", plugins::size());

    // -------------------------------------------------------------------------
    // 2. Create plugins
    // -------------------------------------------------------------------------
    println!("\n2. Creating plugins...");

    let arguments: Vec<Object> = vec![Arc::new("$".to_string())];
    let (created, result) = plugins::creates(["echo", "counter", "missing"], &arguments);

    if let Err(RegistryError::Aggregate(aggregate)) = &result {
        for err in aggregate {
            println!("   failed: {err}");
        }
    }

    // -------------------------------------------------------------------------
    // 3. Share what was created
    // -------------------------------------------------------------------------
    println!("\n3. Publishing {} running plugins...", created.len());

    for object in created {
        if let Some(plugin) = object.downcast_ref::<Arc<dyn Plugin>>() {
            running::set(plugin.name().to_string(), object.clone());
        }
    }

    for (name, object) in running::get_all() {
        if let Some(plugin) = object.downcast_ref::<Arc<dyn Plugin>>() {
            println!("   {name}: {}", plugin.run());
        }
    }

    plugins::clear_trace_callback();
    println!("\n=== Example completed successfully ===");
}
