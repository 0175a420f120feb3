//! Named constructors that manufacture objects on demand.
//!
//! A [`Factory`] keeps a [`Registry`] of [`Constructor`]s. Like the registry it
//! has no internal locking; see [`define_factory!`](crate::define_factory) for
//! the guarded global form.
//!
//! # Examples
//!
//! ```
//! use named_registry::{constructor, Factory};
//!
//! let mut factory: Factory<String, String> = Factory::new();
//!
//! factory
//!     .add("greeting", constructor(|args: &[String]| {
//!         Ok(Some(format!("hello {}", args.join(" "))))
//!     }))
//!     .unwrap();
//!
//! let object = factory.create("greeting", &["world".to_string()]).unwrap();
//! assert_eq!(object, "hello world");
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::{AggregateError, BoxError, Object, Registry, RegistryError};

/// Builds an object from an argument list.
///
/// A constructor returns `Ok(Some(object))` on success or `Err(_)` on failure.
/// `Ok(None)` is a contract violation and makes
/// [`Factory::create`] fail with [`RegistryError::ObjectNotCreated`].
pub type Constructor<T, A = Object> =
    Arc<dyn Fn(&[A]) -> Result<Option<T>, BoxError> + Send + Sync + 'static>;

/// Wraps a closure or function into a [`Constructor`].
pub fn constructor<T, A, F>(f: F) -> Constructor<T, A>
where
    F: Fn(&[A]) -> Result<Option<T>, BoxError> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Name-keyed store of constructors.
///
/// Registration methods accept anything convertible into
/// `Option<Constructor<T, A>>`; `None` stands for a missing constructor and is
/// rejected with [`RegistryError::InvalidConstructor`].
pub struct Factory<T, A = Object> {
    registry: Registry<Constructor<T, A>>,
}

impl<T, A> Default for Factory<T, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, A> Clone for Factory<T, A> {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
        }
    }
}

impl<T, A> fmt::Debug for Factory<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.registry.names().collect();
        names.sort_unstable();
        f.debug_struct("Factory").field("constructors", &names).finish()
    }
}

impl<T, A> Factory<T, A> {
    /// Creates an empty factory.
    pub fn new() -> Self {
        Self {
            registry: Registry::new(),
        }
    }

    /// Creates an empty factory with room for `capacity` constructors.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            registry: Registry::with_capacity(capacity),
        }
    }

    /// Creates an object with the constructor registered under `name`.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::NotRegistered`] if `name` has no constructor.
    /// - [`RegistryError::CreationFailed`] wrapping the constructor's own error.
    /// - [`RegistryError::ObjectNotCreated`] if the constructor returned nothing.
    pub fn create(&self, name: &str, arguments: &[A]) -> Result<T, RegistryError> {
        let constructor = self.registry.get(name)?;

        match constructor(arguments) {
            Ok(Some(object)) => Ok(object),
            Ok(None) => {
                tracing::debug!(name, "constructor returned no object");
                Err(RegistryError::ObjectNotCreated {
                    name: name.to_owned(),
                })
            }
            Err(source) => {
                tracing::debug!(name, error = %source, "constructor failed");
                Err(RegistryError::CreationFailed {
                    name: name.to_owned(),
                    source,
                })
            }
        }
    }

    /// Creates one object per name, in the order of `names`.
    ///
    /// The returned list holds every object that was created, also when the
    /// call fails.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::Aggregate`] with one error per failed name.
    pub fn creates<I>(&self, names: I, arguments: &[A]) -> (Vec<T>, Result<(), RegistryError>)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let names = names.into_iter();
        let mut objects = Vec::with_capacity(names.size_hint().0);
        let mut errors = Vec::new();

        for name in names {
            match self.create(name.as_ref(), arguments) {
                Ok(object) => objects.push(object),
                Err(err) => errors.push(err),
            }
        }

        (objects, AggregateError::check("cannot create objects", errors))
    }

    /// Registers `constructor` under `name`.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::InvalidConstructor`] if `constructor` is `None`.
    /// - [`RegistryError::AlreadyRegistered`] if `name` is taken.
    pub fn add<C>(&mut self, name: impl Into<String>, constructor: C) -> Result<(), RegistryError>
    where
        C: Into<Option<Constructor<T, A>>>,
    {
        let (name, constructor) = validate(name.into(), constructor.into())?;
        self.registry.add(name, constructor)
    }

    /// Registers every entry of `constructors`. Valid entries are committed
    /// even if others fail.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::Aggregate`] with one error per rejected entry.
    pub fn adds<I, K, C>(&mut self, constructors: I) -> Result<(), RegistryError>
    where
        I: IntoIterator<Item = (K, C)>,
        K: Into<String>,
        C: Into<Option<Constructor<T, A>>>,
    {
        let errors = constructors
            .into_iter()
            .filter_map(|(name, constructor)| self.add(name, constructor).err())
            .collect();

        AggregateError::check("cannot add object constructors", errors)
    }

    /// Registers `constructor` under `name`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::InvalidConstructor`] if `constructor` is `None`; the
    ///   previous constructor is kept.
    pub fn set<C>(&mut self, name: impl Into<String>, constructor: C) -> Result<(), RegistryError>
    where
        C: Into<Option<Constructor<T, A>>>,
    {
        let (name, constructor) = validate(name.into(), constructor.into())?;
        self.registry.set(name, constructor);
        Ok(())
    }

    /// Registers every entry of `constructors`, replacing previous ones.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::Aggregate`] with one error per empty constructor.
    pub fn sets<I, K, C>(&mut self, constructors: I) -> Result<(), RegistryError>
    where
        I: IntoIterator<Item = (K, C)>,
        K: Into<String>,
        C: Into<Option<Constructor<T, A>>>,
    {
        let errors = constructors
            .into_iter()
            .filter_map(|(name, constructor)| self.set(name, constructor).err())
            .collect();

        AggregateError::check("cannot set object constructors", errors)
    }

    /// Returns the constructor registered under `name`.
    pub fn get(&self, name: &str) -> Result<&Constructor<T, A>, RegistryError> {
        self.registry.get(name)
    }

    /// Returns the constructors registered under `names`, plus an aggregate
    /// error for the missing ones.
    pub fn gets<I>(&self, names: I) -> (HashMap<String, Constructor<T, A>>, Result<(), RegistryError>)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.registry.gets(names)
    }

    pub fn get_all(&self) -> HashMap<String, Constructor<T, A>> {
        self.registry.get_all()
    }

    pub fn remove(&mut self, name: &str) -> &mut Self {
        self.registry.remove(name);
        self
    }

    pub fn removes<I>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.registry.removes(names);
        self
    }

    pub fn remove_all(&mut self) -> &mut Self {
        self.registry.remove_all();
        self
    }

    pub fn is_exist(&self, name: &str) -> bool {
        self.registry.is_exist(name)
    }

    pub fn is_exists<I>(&self, names: I) -> bool
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.registry.is_exists(names)
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    pub fn size(&self) -> usize {
        self.registry.size()
    }
}

fn validate<C>(name: String, constructor: Option<C>) -> Result<(String, C), RegistryError> {
    match constructor {
        Some(constructor) => Ok((name, constructor)),
        None => {
            tracing::debug!(name = %name, "rejected empty object constructor");
            Err(RegistryError::InvalidConstructor { name })
        }
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[derive(Debug, PartialEq)]
    struct Widget(u32);

    type WidgetFactory = Factory<Widget, u32>;

    fn sum() -> Constructor<Widget, u32> {
        constructor(|args: &[u32]| Ok(Some(Widget(args.iter().sum()))))
    }

    fn failing() -> Constructor<Widget, u32> {
        constructor(|_: &[u32]| Err("out of widgets".into()))
    }

    fn empty() -> Constructor<Widget, u32> {
        constructor(|_: &[u32]| Ok(None))
    }

    #[test]
    fn test_new_is_empty() {
        let factory = WidgetFactory::new();
        assert!(factory.is_empty());
        assert!(factory.get_all().is_empty());
    }

    #[test]
    fn test_create() {
        let mut factory = WidgetFactory::new();
        factory.add("sum", sum()).unwrap();

        assert_eq!(factory.create("sum", &[1, 2, 3]).unwrap(), Widget(6));
    }

    #[test]
    fn test_create_not_registered() {
        let factory = WidgetFactory::new();
        let err = factory.create("sum", &[]).unwrap_err();
        assert!(matches!(err, RegistryError::NotRegistered { ref name } if name == "sum"));
    }

    #[test]
    fn test_create_error_is_wrapped() {
        let mut factory = WidgetFactory::new();
        factory.add("failing", failing()).unwrap();

        let err = factory.create("failing", &[]).unwrap_err();
        assert!(matches!(err, RegistryError::CreationFailed { ref name, .. } if name == "failing"));
        assert_eq!(err.source().unwrap().to_string(), "out of widgets");
    }

    #[test]
    fn test_create_nothing_is_an_error() {
        let mut factory = WidgetFactory::new();
        factory.add("empty", empty()).unwrap();

        let err = factory.create("empty", &[]).unwrap_err();
        assert!(matches!(err, RegistryError::ObjectNotCreated { ref name } if name == "empty"));
    }

    #[test]
    fn test_creates() {
        let mut factory = WidgetFactory::new();
        factory
            .adds([("a", sum()), ("b", sum()), ("c", sum())])
            .unwrap();

        let (objects, result) = factory.creates(["c", "a"], &[2]);

        assert!(result.is_ok());
        assert_eq!(objects, vec![Widget(2), Widget(2)]);
    }

    #[test]
    fn test_creates_partial_success() {
        let mut factory = WidgetFactory::new();
        factory.adds([("good", sum()), ("bad", failing())]).unwrap();

        let (objects, result) = factory.creates(["bad", "good"], &[5]);

        assert_eq!(objects, vec![Widget(5)]);
        let Err(RegistryError::Aggregate(aggregate)) = result else {
            panic!("expected aggregate error");
        };
        assert_eq!(aggregate.len(), 1);
        assert_eq!(aggregate.context(), "cannot create objects");
        assert_eq!(aggregate.errors()[0].name(), Some("bad"));
    }

    #[test]
    fn test_add_none_is_rejected() {
        let mut factory = WidgetFactory::new();

        let err = factory.add("ctor", None::<Constructor<Widget, u32>>).unwrap_err();

        assert!(matches!(err, RegistryError::InvalidConstructor { ref name } if name == "ctor"));
        assert_eq!(factory.size(), 0);
    }

    #[test]
    fn test_add_existing_fails() {
        let mut factory = WidgetFactory::new();
        factory.add("ctor", sum()).unwrap();

        let err = factory.add("ctor", failing()).unwrap_err();
        assert!(matches!(err, RegistryError::AlreadyRegistered { .. }));
        assert!(factory.create("ctor", &[1]).is_ok());
    }

    #[test]
    fn test_adds_partial_success() {
        let mut factory = WidgetFactory::new();

        let err = factory
            .adds([("a", Some(sum())), ("b", None), ("c", Some(sum()))])
            .unwrap_err();

        let RegistryError::Aggregate(aggregate) = err else {
            panic!("expected aggregate error");
        };
        assert_eq!(aggregate.len(), 1);
        assert!(matches!(
            &aggregate.errors()[0],
            RegistryError::InvalidConstructor { name } if name == "b"
        ));
        assert_eq!(factory.size(), 2);
    }

    #[test]
    fn test_set_overwrites() {
        let mut factory = WidgetFactory::new();
        factory.set("ctor", failing()).unwrap();
        factory.set("ctor", sum()).unwrap();

        assert_eq!(factory.size(), 1);
        assert_eq!(factory.create("ctor", &[4]).unwrap(), Widget(4));
    }

    #[test]
    fn test_set_none_keeps_previous() {
        let mut factory = WidgetFactory::new();
        factory.set("ctor", sum()).unwrap();

        assert!(factory.set("ctor", None::<Constructor<Widget, u32>>).is_err());
        assert_eq!(factory.create("ctor", &[1]).unwrap(), Widget(1));
    }

    #[test]
    fn test_sets() {
        let mut factory = WidgetFactory::new();
        factory.sets([("a", sum()), ("b", empty())]).unwrap();
        assert!(factory.is_exists(["a", "b"]));

        let err = factory.sets([("a", None), ("c", Some(sum()))]).unwrap_err();
        assert!(matches!(err, RegistryError::Aggregate(ref aggregate) if aggregate.len() == 1));
        assert_eq!(factory.size(), 3);
    }

    #[test]
    fn test_get() {
        let mut factory = WidgetFactory::new();
        factory.add("sum", sum()).unwrap();

        let ctor = factory.get("sum").unwrap();
        assert_eq!(ctor(&[3, 4]).unwrap(), Some(Widget(7)));
        assert!(factory.get("missing").is_err());
    }

    #[test]
    fn test_gets() {
        let mut factory = WidgetFactory::new();
        factory.adds([("a", sum()), ("b", sum())]).unwrap();

        let (constructors, result) = factory.gets(["a", "missing"]);
        assert_eq!(constructors.len(), 1);
        assert!(constructors.contains_key("a"));
        assert!(result.is_err());
    }

    #[test]
    fn test_remove_and_remove_all() {
        let mut factory = WidgetFactory::new();
        factory.adds([("a", sum()), ("b", sum()), ("c", sum())]).unwrap();

        factory.remove("a").remove("missing");
        assert_eq!(factory.size(), 2);

        factory.removes(["b"]);
        assert!(factory.is_exist("c"));
        assert!(!factory.is_exist("b"));

        factory.remove_all();
        assert!(factory.is_empty());
    }

    #[test]
    fn test_debug_lists_names() {
        let mut factory = WidgetFactory::new();
        factory.adds([("b", sum()), ("a", sum())]).unwrap();
        assert_eq!(
            format!("{:?}", factory),
            r#"Factory { constructors: ["a", "b"] }"#
        );
    }
}
