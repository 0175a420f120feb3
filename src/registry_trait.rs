//! Core traits behind the global registries.
//!
//! [`RegistryApi`] provides every global registry operation as a default method
//! on top of two accessors, `storage` and `trace`. Each operation takes the
//! guard's read lock for lookups and queries and its write lock for mutations.
//! [`TraceApi`] holds the shared event-callback plumbing used by both
//! registries and factories.

use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use parking_lot::Mutex;

use crate::{Guard, Object, Registry, RegistryError, RegistryEvent};

/// User-supplied callback receiving every traced event.
pub type TraceCallback = dyn Fn(&RegistryEvent<'_>) + Send + Sync + 'static;

/// Storage slot for the trace callback of one global.
///
/// Note: the `define_registry!` and `define_factory!` macros declare statics of
/// this type.
pub type TraceSlot = LazyLock<Mutex<Option<Arc<TraceCallback>>>>;

/// Number of individual failures carried by a bulk operation result.
pub(crate) fn failures(result: &Result<(), RegistryError>) -> usize {
    match result {
        Ok(()) => 0,
        Err(RegistryError::Aggregate(aggregate)) => aggregate.len(),
        Err(_) => 1,
    }
}

/// Event-callback plumbing shared by [`RegistryApi`] and
/// [`FactoryApi`](crate::FactoryApi).
pub trait TraceApi {
    /// Access the trace callback static.
    fn trace() -> &'static TraceSlot;

    /// Set a tracing callback for operations on this global.
    ///
    /// The callback runs after the storage lock has been released and without
    /// holding the trace lock, so it may call back into the same global.
    fn set_trace_callback(&self, callback: impl Fn(&RegistryEvent<'_>) + Send + Sync + 'static) {
        *Self::trace().lock() = Some(Arc::new(callback));
    }

    /// Clear the tracing callback.
    fn clear_trace_callback(&self) {
        *Self::trace().lock() = None;
    }

    /// Invoke the current callback, if any, with `event`.
    ///
    /// # Panics
    ///
    /// If the callback itself panics, the panic propagates to the caller.
    fn emit_event(&self, event: &RegistryEvent<'_>) {
        let callback = Self::trace().lock().clone();
        if let Some(callback) = callback {
            callback(event);
        }
    }
}

/// Guarded operations on a process-wide [`Registry`] of type-erased objects.
///
/// Implementors only provide the two static accessors; see the
/// [`define_registry!`](crate::define_registry) macro for the usual way to get
/// one.
pub trait RegistryApi: TraceApi {
    /// Access the lazily created storage.
    ///
    /// Every call returns the same instance.
    fn storage() -> &'static Guard<Registry<Object>>;

    /// Register `object` under `name`.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::AlreadyRegistered`] if `name` is taken.
    fn add(&self, name: impl Into<String>, object: Object) -> Result<(), RegistryError> {
        let name = name.into();
        let result = Self::storage().write(|registry| registry.add(name.clone(), object));

        self.emit_event(&RegistryEvent::Add {
            name: &name,
            added: result.is_ok(),
        });

        result
    }

    /// Register every entry of `objects`, keeping the ones that succeed.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::Aggregate`] with one error per rejected entry.
    fn adds<I, K>(&self, objects: I) -> Result<(), RegistryError>
    where
        I: IntoIterator<Item = (K, Object)>,
        K: Into<String>,
    {
        let objects: Vec<(String, Object)> = objects
            .into_iter()
            .map(|(name, object)| (name.into(), object))
            .collect();
        let count = objects.len();

        let result = Self::storage().write(|registry| registry.adds(objects));

        self.emit_event(&RegistryEvent::Adds {
            count,
            failed: failures(&result),
        });

        result
    }

    /// Register `object` under `name`, replacing any previous entry.
    fn set(&self, name: impl Into<String>, object: Object) {
        let name = name.into();
        Self::storage().write(|registry| {
            registry.set(name.clone(), object);
        });

        self.emit_event(&RegistryEvent::Set { name: &name });
    }

    /// Register every entry of `objects`, replacing previous entries.
    fn sets<I, K>(&self, objects: I)
    where
        I: IntoIterator<Item = (K, Object)>,
        K: Into<String>,
    {
        let objects: Vec<(String, Object)> = objects
            .into_iter()
            .map(|(name, object)| (name.into(), object))
            .collect();
        let count = objects.len();

        Self::storage().write(|registry| {
            registry.sets(objects);
        });

        self.emit_event(&RegistryEvent::Sets { count, failed: 0 });
    }

    /// Retrieve the object registered under `name`.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::NotRegistered`] if nothing is registered under `name`.
    fn get(&self, name: &str) -> Result<Object, RegistryError> {
        let result = Self::storage().read(|registry| registry.get(name).cloned());

        self.emit_event(&RegistryEvent::Get {
            name,
            found: result.is_ok(),
        });

        result
    }

    /// Retrieve the object registered under `name` as a concrete type.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::NotRegistered`] if nothing is registered under `name`.
    /// - [`RegistryError::TypeMismatch`] if the object is not a `U`.
    fn get_as<U: Any + Send + Sync>(&self, name: &str) -> Result<Arc<U>, RegistryError> {
        self.get(name)?
            .downcast::<U>()
            .map_err(|_| RegistryError::TypeMismatch {
                name: name.to_owned(),
                type_name: std::any::type_name::<U>(),
            })
    }

    /// Retrieve the objects registered under `names`.
    ///
    /// The map holds every object found, also when the call fails.
    fn gets<I>(&self, names: I) -> (HashMap<String, Object>, Result<(), RegistryError>)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let (objects, result) = Self::storage().read(|registry| registry.gets(names));

        let missing = failures(&result);
        self.emit_event(&RegistryEvent::Gets {
            count: objects.len() + missing,
            missing,
        });

        (objects, result)
    }

    /// Retrieve a copy of every entry.
    fn get_all(&self) -> HashMap<String, Object> {
        Self::storage().read(Registry::get_all)
    }

    /// Remove the entry registered under `name`, if any.
    fn remove(&self, name: &str) {
        Self::storage().write(|registry| {
            registry.remove(name);
        });

        self.emit_event(&RegistryEvent::Remove { name });
    }

    /// Remove every listed entry.
    fn removes<I>(&self, names: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let names: Vec<I::Item> = names.into_iter().collect();
        let count = names.len();

        Self::storage().write(|registry| {
            registry.removes(names);
        });

        self.emit_event(&RegistryEvent::Removes { count });
    }

    /// Remove every entry. The global itself stays alive.
    fn remove_all(&self) {
        Self::storage().write(|registry| {
            registry.remove_all();
        });

        self.emit_event(&RegistryEvent::Clear);
    }

    fn is_exist(&self, name: &str) -> bool {
        let found = Self::storage().read(|registry| registry.is_exist(name));

        self.emit_event(&RegistryEvent::Contains { name, found });

        found
    }

    fn is_exists<I>(&self, names: I) -> bool
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Self::storage().read(|registry| registry.is_exists(names))
    }

    fn is_empty(&self) -> bool {
        Self::storage().read(Registry::is_empty)
    }

    fn size(&self) -> usize {
        Self::storage().read(Registry::size)
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
