//! Name-keyed object store.
//!
//! [`Registry`] maps unique names to values and has no internal locking. Use it
//! from a single thread, behind your own lock, or through a global registry
//! created with [`define_registry!`](crate::define_registry).
//!
//! # Examples
//!
//! ```
//! use named_registry::Registry;
//!
//! let mut registry = Registry::new();
//!
//! registry.add("answer", 42).unwrap();
//! assert!(registry.add("answer", 7).is_err());
//!
//! registry.set("answer", 7).set("other", 1);
//! assert_eq!(registry.get("answer").unwrap(), &7);
//! assert_eq!(registry.size(), 2);
//! ```

use std::collections::HashMap;

use crate::{AggregateError, RegistryError};

/// Name-keyed store of values.
///
/// [`add`](Registry::add) never overwrites an existing entry;
/// [`set`](Registry::set) always does. Bulk operations commit every entry that
/// succeeds and report all the others in a single
/// [`RegistryError::Aggregate`].
#[derive(Debug, Clone)]
pub struct Registry<T> {
    objects: HashMap<String, T>,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Registry<T> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            objects: HashMap::new(),
        }
    }

    /// Creates an empty registry with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            objects: HashMap::with_capacity(capacity),
        }
    }

    /// Registers `object` under `name`.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::AlreadyRegistered`] if `name` is taken; the existing
    ///   entry is left untouched.
    pub fn add(&mut self, name: impl Into<String>, object: T) -> Result<(), RegistryError> {
        let name = name.into();

        if self.objects.contains_key(&name) {
            tracing::debug!(name = %name, "object was already registered");
            return Err(RegistryError::AlreadyRegistered { name });
        }

        self.objects.insert(name, object);
        Ok(())
    }

    /// Registers every entry of `objects`.
    ///
    /// Entries that can be added are committed even if others fail.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::Aggregate`] holding one error per rejected entry.
    pub fn adds<I, K>(&mut self, objects: I) -> Result<(), RegistryError>
    where
        I: IntoIterator<Item = (K, T)>,
        K: Into<String>,
    {
        let errors = objects
            .into_iter()
            .filter_map(|(name, object)| self.add(name, object).err())
            .collect();

        AggregateError::check("cannot add objects", errors)
    }

    /// Registers `object` under `name`, replacing any previous entry.
    pub fn set(&mut self, name: impl Into<String>, object: T) -> &mut Self {
        self.objects.insert(name.into(), object);
        self
    }

    /// Registers every entry of `objects`, replacing previous entries.
    pub fn sets<I, K>(&mut self, objects: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, T)>,
        K: Into<String>,
    {
        self.objects
            .extend(objects.into_iter().map(|(name, object)| (name.into(), object)));
        self
    }

    /// Returns the object registered under `name`.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::NotRegistered`] if nothing is registered under `name`.
    pub fn get(&self, name: &str) -> Result<&T, RegistryError> {
        self.objects.get(name).ok_or_else(|| {
            tracing::trace!(name, "object was not registered");
            RegistryError::NotRegistered {
                name: name.to_owned(),
            }
        })
    }

    /// Removes the entry registered under `name`. Absent names are ignored.
    pub fn remove(&mut self, name: &str) -> &mut Self {
        self.objects.remove(name);
        self
    }

    /// Removes every listed entry. Absent names are ignored.
    pub fn removes<I>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for name in names {
            self.remove(name.as_ref());
        }
        self
    }

    /// Removes every entry.
    pub fn remove_all(&mut self) -> &mut Self {
        self.objects.clear();
        self
    }

    /// Returns true if an entry is registered under `name`.
    pub fn is_exist(&self, name: &str) -> bool {
        self.objects.contains_key(name)
    }

    /// Returns true if every listed name is registered.
    ///
    /// Stops at the first missing name.
    pub fn is_exists<I>(&self, names: I) -> bool
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        names.into_iter().all(|name| self.is_exist(name.as_ref()))
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn size(&self) -> usize {
        self.objects.len()
    }

    /// Iterates over registered names in unspecified order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.objects.keys().map(String::as_str)
    }
}

impl<T: Clone> Registry<T> {
    /// Returns copies of the objects registered under `names`.
    ///
    /// The map holds every object that was found, also when the call fails.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::Aggregate`] with a [`RegistryError::NotRegistered`]
    ///   per missing name.
    pub fn gets<I>(&self, names: I) -> (HashMap<String, T>, Result<(), RegistryError>)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut objects = HashMap::new();
        let mut errors = Vec::new();

        for name in names {
            let name = name.as_ref();
            match self.get(name) {
                Ok(object) => {
                    objects.insert(name.to_owned(), object.clone());
                }
                Err(err) => errors.push(err),
            }
        }

        (objects, AggregateError::check("cannot get objects", errors))
    }

    /// Returns a copy of every entry.
    pub fn get_all(&self) -> HashMap<String, T> {
        self.objects.clone()
    }
}

impl<K: Into<String>, T> FromIterator<(K, T)> for Registry<T> {
    /// Collects entries with [`set`](Registry::set) semantics: later duplicates win.
    fn from_iter<I: IntoIterator<Item = (K, T)>>(iter: I) -> Self {
        let mut registry = Self::new();
        registry.sets(iter);
        registry
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
