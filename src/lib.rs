//! # Named Registry
//!
//! Name-keyed object registries and constructor factories, usable as plain
//! instances or as lazily created, thread-safe process-wide singletons.
//!
//! [`Registry`] and [`Factory`] are ordinary values with no internal locking.
//! The global forms wrap one instance in a [`Guard`] and expose it through free
//! functions: lookups, queries and object creation take the shared lock,
//! registration and removal take the exclusive lock.
//!
//! ## Quick Start
//!
//! ```rust
//! use named_registry::{constructor, global_factory, global_registry, Object};
//! use std::sync::Arc;
//!
//! // Register a value
//! global_registry::add("greeting", Arc::new("Hello, World!".to_string())).unwrap();
//!
//! // Retrieve the value
//! let message: Arc<String> = global_registry::get_as("greeting").unwrap();
//! assert_eq!(&*message, "Hello, World!");
//!
//! // Register a constructor and create an object with it
//! global_factory::add(
//!     "zero",
//!     constructor(|_: &[Object]| Ok(Some(Arc::new(0u64) as Object))),
//! )
//! .unwrap();
//! let zero: Arc<u64> = global_factory::create_as("zero", &[]).unwrap();
//! assert_eq!(*zero, 0);
//! ```
//!
//! ## Features
//!
//! - **No silent overwrite**: `add` fails on taken names, `set` replaces
//! - **Partial success**: bulk operations keep what succeeded and report every
//!   failure in one [`AggregateError`]
//! - **Thread-safe globals**: reader/writer locking through [`Guard`], created once
//!   on first use
//! - **Tracing support**: `tracing` logs plus an optional callback per global
//!   receiving [`RegistryEvent`]s
//!
//! ## Main Items
//!
//! - [`Registry`] - name to value store
//! - [`Factory`] - name to [`Constructor`] store with `create`
//! - [`Guard`] - read/write critical sections
//! - [`define_registry!`] / [`define_factory!`] - declare additional isolated globals
//! - [`global_registry`] / [`global_factory`] - the crate's own globals

#[macro_use]
mod macros;

mod factory;
mod factory_trait;
mod guard;
mod registry;
mod registry_error;
mod registry_event;
mod registry_trait;

use std::any::Any;
use std::sync::Arc;

pub use factory::{constructor, Constructor, Factory};
pub use factory_trait::FactoryApi;
pub use guard::Guard;
pub use registry::Registry;
pub use registry_error::{AggregateError, BoxError, RegistryError};
pub use registry_event::RegistryEvent;
pub use registry_trait::{RegistryApi, TraceApi, TraceCallback, TraceSlot};

/// Type-erased value stored by the global registries and produced by the
/// global factories.
pub type Object = Arc<dyn Any + Send + Sync>;

/// Creates the storage of a global on first access.
#[doc(hidden)]
pub fn new_global_storage<T: Default>(scope: &'static str) -> Guard<T> {
    tracing::debug!(scope, "initializing global storage");
    Guard::default()
}

define_registry!(
    /// The process-wide registry of type-erased objects.
    global_registry
);

define_factory!(
    /// The process-wide factory of type-erased objects.
    global_factory
);
