//! Macros for declaring process-wide registries and factories.
//!
//! Each macro expands to a module holding a lazily created, guarded storage
//! static, a trace callback static, and free functions delegating to
//! [`RegistryApi`](crate::RegistryApi) or [`FactoryApi`](crate::FactoryApi).

/// Creates a global registry module with a single macro invocation.
///
/// The macro generates a module containing:
/// - Storage static (hidden), created on first use
/// - Trace callback static (hidden)
/// - An `Api` struct that implements `RegistryApi`
/// - Free functions for every registry operation
///
/// # Examples
///
/// ```rust
/// use named_registry::define_registry;
/// use std::sync::Arc;
///
/// define_registry!(plugins);
///
/// plugins::add("answer", Arc::new(42i32)).unwrap();
/// plugins::set("greeting", Arc::new("hello".to_string()));
///
/// let answer: Arc<i32> = plugins::get_as("answer").unwrap();
/// assert_eq!(*answer, 42);
/// assert_eq!(plugins::size(), 2);
/// ```
///
/// Registries declared with different names are isolated from each other:
///
/// ```rust
/// use named_registry::define_registry;
/// use std::sync::Arc;
///
/// define_registry!(database);
/// define_registry!(cache);
///
/// database::add("url", Arc::new("postgresql://localhost")).unwrap();
///
/// assert!(database::is_exist("url"));
/// assert!(!cache::is_exist("url"));
/// ```
#[macro_export]
macro_rules! define_registry {
    ($(#[$attr:meta])* $name:ident) => {
        $(#[$attr])*
        pub mod $name {
            #![allow(dead_code, unused_imports)]

            use std::collections::HashMap;
            use std::sync::{Arc, LazyLock};

            use $crate::{Guard, Object, Registry, RegistryApi, RegistryError, RegistryEvent, TraceApi, TraceSlot};

            // Storage for registered objects (module-private)
            static STORAGE: LazyLock<Guard<Registry<Object>>> =
                LazyLock::new(|| $crate::new_global_storage(module_path!()));

            // Trace callback storage (module-private)
            static TRACE: TraceSlot = LazyLock::new(Default::default);

            struct Api;

            impl TraceApi for Api {
                fn trace() -> &'static TraceSlot {
                    &TRACE
                }
            }

            impl RegistryApi for Api {
                fn storage() -> &'static Guard<Registry<Object>> {
                    &STORAGE
                }
            }

            const API: Api = Api;

            /// The guarded storage behind this registry. Every call returns the same instance.
            pub fn storage() -> &'static Guard<Registry<Object>> {
                <Api as RegistryApi>::storage()
            }

            /// Register an object; fails if the name is taken.
            pub fn add(name: impl Into<String>, object: Object) -> Result<(), RegistryError> {
                API.add(name, object)
            }

            /// Register objects, keeping the ones that succeed.
            pub fn adds<I, K>(objects: I) -> Result<(), RegistryError>
            where
                I: IntoIterator<Item = (K, Object)>,
                K: Into<String>,
            {
                API.adds(objects)
            }

            /// Register an object, replacing any previous one.
            pub fn set(name: impl Into<String>, object: Object) {
                API.set(name, object)
            }

            /// Register objects, replacing previous ones.
            pub fn sets<I, K>(objects: I)
            where
                I: IntoIterator<Item = (K, Object)>,
                K: Into<String>,
            {
                API.sets(objects)
            }

            /// Retrieve an object.
            pub fn get(name: &str) -> Result<Object, RegistryError> {
                API.get(name)
            }

            /// Retrieve an object as a concrete type.
            pub fn get_as<U: std::any::Any + Send + Sync>(name: &str) -> Result<Arc<U>, RegistryError> {
                API.get_as(name)
            }

            /// Retrieve several objects; found ones are returned even on error.
            pub fn gets<I>(names: I) -> (HashMap<String, Object>, Result<(), RegistryError>)
            where
                I: IntoIterator,
                I::Item: AsRef<str>,
            {
                API.gets(names)
            }

            /// Retrieve a copy of every entry.
            pub fn get_all() -> HashMap<String, Object> {
                API.get_all()
            }

            pub fn remove(name: &str) {
                API.remove(name)
            }

            pub fn removes<I>(names: I)
            where
                I: IntoIterator,
                I::Item: AsRef<str>,
            {
                API.removes(names)
            }

            pub fn remove_all() {
                API.remove_all()
            }

            pub fn is_exist(name: &str) -> bool {
                API.is_exist(name)
            }

            pub fn is_exists<I>(names: I) -> bool
            where
                I: IntoIterator,
                I::Item: AsRef<str>,
            {
                API.is_exists(names)
            }

            pub fn is_empty() -> bool {
                API.is_empty()
            }

            pub fn size() -> usize {
                API.size()
            }

            /// Set a tracing callback for operations on this registry.
            pub fn set_trace_callback(callback: impl Fn(&RegistryEvent<'_>) + Send + Sync + 'static) {
                API.set_trace_callback(callback)
            }

            /// Clear the tracing callback.
            pub fn clear_trace_callback() {
                API.clear_trace_callback()
            }
        }
    };
}

/// Creates a global factory module with a single macro invocation.
///
/// The generated module mirrors [`define_registry!`], storing
/// [`Constructor`](crate::Constructor)s and adding `create`, `create_as` and
/// `creates`.
///
/// # Examples
///
/// ```rust
/// use named_registry::{constructor, define_factory, Object};
/// use std::sync::Arc;
///
/// define_factory!(shapes);
///
/// shapes::add(
///     "square",
///     constructor(|args: &[Object]| {
///         let side = args
///             .first()
///             .and_then(|arg| arg.downcast_ref::<f64>())
///             .ok_or("missing side")?;
///         Ok(Some(Arc::new(side * side) as Object))
///     }),
/// )
/// .unwrap();
///
/// let area: Arc<f64> = shapes::create_as("square", &[Arc::new(3.0f64) as Object]).unwrap();
/// assert_eq!(*area, 9.0);
/// ```
#[macro_export]
macro_rules! define_factory {
    ($(#[$attr:meta])* $name:ident) => {
        $(#[$attr])*
        pub mod $name {
            #![allow(dead_code, unused_imports)]

            use std::collections::HashMap;
            use std::sync::{Arc, LazyLock};

            use $crate::{Constructor, Factory, FactoryApi, Guard, Object, RegistryError, RegistryEvent, TraceApi, TraceSlot};

            // Storage for registered constructors (module-private)
            static STORAGE: LazyLock<Guard<Factory<Object>>> =
                LazyLock::new(|| $crate::new_global_storage(module_path!()));

            // Trace callback storage (module-private)
            static TRACE: TraceSlot = LazyLock::new(Default::default);

            struct Api;

            impl TraceApi for Api {
                fn trace() -> &'static TraceSlot {
                    &TRACE
                }
            }

            impl FactoryApi for Api {
                fn storage() -> &'static Guard<Factory<Object>> {
                    &STORAGE
                }
            }

            const API: Api = Api;

            /// The guarded storage behind this factory. Every call returns the same instance.
            pub fn storage() -> &'static Guard<Factory<Object>> {
                <Api as FactoryApi>::storage()
            }

            /// Create an object with a registered constructor.
            pub fn create(name: &str, arguments: &[Object]) -> Result<Object, RegistryError> {
                API.create(name, arguments)
            }

            /// Create an object and downcast it to a concrete type.
            pub fn create_as<U: std::any::Any + Send + Sync>(
                name: &str,
                arguments: &[Object],
            ) -> Result<Arc<U>, RegistryError> {
                API.create_as(name, arguments)
            }

            /// Create several objects; created ones are returned even on error.
            pub fn creates<I>(names: I, arguments: &[Object]) -> (Vec<Object>, Result<(), RegistryError>)
            where
                I: IntoIterator,
                I::Item: AsRef<str>,
            {
                API.creates(names, arguments)
            }

            /// Register a constructor; fails if it is `None` or the name is taken.
            pub fn add<C>(name: impl Into<String>, constructor: C) -> Result<(), RegistryError>
            where
                C: Into<Option<Constructor<Object>>>,
            {
                API.add(name, constructor)
            }

            pub fn adds<I, K, C>(constructors: I) -> Result<(), RegistryError>
            where
                I: IntoIterator<Item = (K, C)>,
                K: Into<String>,
                C: Into<Option<Constructor<Object>>>,
            {
                API.adds(constructors)
            }

            /// Register a constructor, replacing any previous one.
            pub fn set<C>(name: impl Into<String>, constructor: C) -> Result<(), RegistryError>
            where
                C: Into<Option<Constructor<Object>>>,
            {
                API.set(name, constructor)
            }

            pub fn sets<I, K, C>(constructors: I) -> Result<(), RegistryError>
            where
                I: IntoIterator<Item = (K, C)>,
                K: Into<String>,
                C: Into<Option<Constructor<Object>>>,
            {
                API.sets(constructors)
            }

            pub fn get(name: &str) -> Result<Constructor<Object>, RegistryError> {
                API.get(name)
            }

            pub fn gets<I>(names: I) -> (HashMap<String, Constructor<Object>>, Result<(), RegistryError>)
            where
                I: IntoIterator,
                I::Item: AsRef<str>,
            {
                API.gets(names)
            }

            pub fn get_all() -> HashMap<String, Constructor<Object>> {
                API.get_all()
            }

            pub fn remove(name: &str) {
                API.remove(name)
            }

            pub fn removes<I>(names: I)
            where
                I: IntoIterator,
                I::Item: AsRef<str>,
            {
                API.removes(names)
            }

            pub fn remove_all() {
                API.remove_all()
            }

            pub fn is_exist(name: &str) -> bool {
                API.is_exist(name)
            }

            pub fn is_exists<I>(names: I) -> bool
            where
                I: IntoIterator,
                I::Item: AsRef<str>,
            {
                API.is_exists(names)
            }

            pub fn is_empty() -> bool {
                API.is_empty()
            }

            pub fn size() -> usize {
                API.size()
            }

            /// Set a tracing callback for operations on this factory.
            pub fn set_trace_callback(callback: impl Fn(&RegistryEvent<'_>) + Send + Sync + 'static) {
                API.set_trace_callback(callback)
            }

            /// Clear the tracing callback.
            pub fn clear_trace_callback() {
                API.clear_trace_callback()
            }
        }
    };
}
