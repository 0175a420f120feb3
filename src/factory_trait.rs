//! Core trait behind the global factories.
//!
//! Lookups, queries and object creation take the read lock: creating an object
//! only reads the constructor table, so many threads may create at once.
//! Registration and removal take the write lock.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use crate::registry_trait::failures;
use crate::{Constructor, Factory, Guard, Object, RegistryError, RegistryEvent, TraceApi};

/// Guarded operations on a process-wide [`Factory`] producing type-erased objects.
///
/// See the [`define_factory!`](crate::define_factory) macro for the usual way
/// to get one.
pub trait FactoryApi: TraceApi {
    /// Access the lazily created storage.
    ///
    /// Every call returns the same instance.
    fn storage() -> &'static Guard<Factory<Object>>;

    /// Create an object with the constructor registered under `name`.
    ///
    /// The constructor runs under the read lock and must not register or remove
    /// constructors on the same global.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::NotRegistered`], [`RegistryError::CreationFailed`] or
    ///   [`RegistryError::ObjectNotCreated`], as [`Factory::create`].
    fn create(&self, name: &str, arguments: &[Object]) -> Result<Object, RegistryError> {
        let result = Self::storage().read(|factory| factory.create(name, arguments));

        self.emit_event(&RegistryEvent::Create {
            name,
            created: result.is_ok(),
        });

        result
    }

    /// Create an object and downcast it to `U`.
    ///
    /// # Errors
    ///
    /// - Everything [`create`](FactoryApi::create) reports.
    /// - [`RegistryError::TypeMismatch`] if the object is not a `U`.
    fn create_as<U: Any + Send + Sync>(
        &self,
        name: &str,
        arguments: &[Object],
    ) -> Result<Arc<U>, RegistryError> {
        self.create(name, arguments)?
            .downcast::<U>()
            .map_err(|_| RegistryError::TypeMismatch {
                name: name.to_owned(),
                type_name: std::any::type_name::<U>(),
            })
    }

    /// Create one object per name; the list holds every object created, also
    /// when the call fails.
    fn creates<I>(&self, names: I, arguments: &[Object]) -> (Vec<Object>, Result<(), RegistryError>)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let (objects, result) = Self::storage().read(|factory| factory.creates(names, arguments));

        let failed = failures(&result);
        self.emit_event(&RegistryEvent::Creates {
            count: objects.len() + failed,
            failed,
        });

        (objects, result)
    }

    /// Register `constructor` under `name`.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::InvalidConstructor`] if `constructor` is `None`.
    /// - [`RegistryError::AlreadyRegistered`] if `name` is taken.
    fn add<C>(&self, name: impl Into<String>, constructor: C) -> Result<(), RegistryError>
    where
        C: Into<Option<Constructor<Object>>>,
    {
        let name = name.into();
        let constructor = constructor.into();
        let result = Self::storage().write(|factory| factory.add(name.clone(), constructor));

        self.emit_event(&RegistryEvent::Add {
            name: &name,
            added: result.is_ok(),
        });

        result
    }

    /// Register every entry of `constructors`, keeping the valid ones.
    fn adds<I, K, C>(&self, constructors: I) -> Result<(), RegistryError>
    where
        I: IntoIterator<Item = (K, C)>,
        K: Into<String>,
        C: Into<Option<Constructor<Object>>>,
    {
        let constructors = collect_constructors(constructors);
        let count = constructors.len();

        let result = Self::storage().write(|factory| factory.adds(constructors));

        self.emit_event(&RegistryEvent::Adds {
            count,
            failed: failures(&result),
        });

        result
    }

    /// Register `constructor` under `name`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::InvalidConstructor`] if `constructor` is `None`.
    fn set<C>(&self, name: impl Into<String>, constructor: C) -> Result<(), RegistryError>
    where
        C: Into<Option<Constructor<Object>>>,
    {
        let name = name.into();
        let constructor = constructor.into();
        let result = Self::storage().write(|factory| factory.set(name.clone(), constructor));

        if result.is_ok() {
            self.emit_event(&RegistryEvent::Set { name: &name });
        }

        result
    }

    /// Register every entry of `constructors`, replacing previous ones.
    fn sets<I, K, C>(&self, constructors: I) -> Result<(), RegistryError>
    where
        I: IntoIterator<Item = (K, C)>,
        K: Into<String>,
        C: Into<Option<Constructor<Object>>>,
    {
        let constructors = collect_constructors(constructors);
        let count = constructors.len();

        let result = Self::storage().write(|factory| factory.sets(constructors));

        self.emit_event(&RegistryEvent::Sets {
            count,
            failed: failures(&result),
        });

        result
    }

    fn get(&self, name: &str) -> Result<Constructor<Object>, RegistryError> {
        let result = Self::storage().read(|factory| factory.get(name).cloned());

        self.emit_event(&RegistryEvent::Get {
            name,
            found: result.is_ok(),
        });

        result
    }

    fn gets<I>(&self, names: I) -> (HashMap<String, Constructor<Object>>, Result<(), RegistryError>)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let (constructors, result) = Self::storage().read(|factory| factory.gets(names));

        let missing = failures(&result);
        self.emit_event(&RegistryEvent::Gets {
            count: constructors.len() + missing,
            missing,
        });

        (constructors, result)
    }

    fn get_all(&self) -> HashMap<String, Constructor<Object>> {
        Self::storage().read(Factory::get_all)
    }

    fn remove(&self, name: &str) {
        Self::storage().write(|factory| {
            factory.remove(name);
        });

        self.emit_event(&RegistryEvent::Remove { name });
    }

    fn removes<I>(&self, names: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let names: Vec<I::Item> = names.into_iter().collect();
        let count = names.len();

        Self::storage().write(|factory| {
            factory.removes(names);
        });

        self.emit_event(&RegistryEvent::Removes { count });
    }

    fn remove_all(&self) {
        Self::storage().write(|factory| {
            factory.remove_all();
        });

        self.emit_event(&RegistryEvent::Clear);
    }

    fn is_exist(&self, name: &str) -> bool {
        let found = Self::storage().read(|factory| factory.is_exist(name));

        self.emit_event(&RegistryEvent::Contains { name, found });

        found
    }

    fn is_exists<I>(&self, names: I) -> bool
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Self::storage().read(|factory| factory.is_exists(names))
    }

    fn is_empty(&self) -> bool {
        Self::storage().read(Factory::is_empty)
    }

    fn size(&self) -> usize {
        Self::storage().read(Factory::size)
    }
}

/// Resolves names and constructors before the write lock is taken.
fn collect_constructors<I, K, C>(constructors: I) -> Vec<(String, Option<Constructor<Object>>)>
where
    I: IntoIterator<Item = (K, C)>,
    K: Into<String>,
    C: Into<Option<Constructor<Object>>>,
{
    constructors
        .into_iter()
        .map(|(name, constructor)| (name.into(), constructor.into()))
        .collect()
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
