/// Events emitted by the global registries and factories during operations.
///
/// These events are passed to the tracing callback set via `set_trace_callback`.
/// Events borrow the names involved, so a callback that wants to keep them
/// should format or copy what it needs.
///
/// # Examples
///
/// ```rust
/// use named_registry::RegistryEvent;
///
/// let event = RegistryEvent::Add { name: "plugin", added: true };
/// assert_eq!(event.to_string(), "add { name: plugin, added: true }");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryEvent<'a> {
    /// An entry was offered with `add`.
    Add {
        name: &'a str,
        /// False when the name was already registered (or the constructor was empty).
        added: bool,
    },

    /// A batch of entries was offered with `adds`.
    Adds { count: usize, failed: usize },

    /// An entry was overwritten or inserted with `set`.
    Set { name: &'a str },

    /// A batch of entries was written with `sets`.
    Sets { count: usize, failed: usize },

    /// An entry was requested.
    Get { name: &'a str, found: bool },

    /// A batch of entries was requested.
    Gets { count: usize, missing: usize },

    /// An existence check was performed.
    Contains { name: &'a str, found: bool },

    /// An entry was removed (or was already absent).
    Remove { name: &'a str },

    /// A batch of entries was removed.
    Removes { count: usize },

    /// A factory constructor was invoked.
    Create { name: &'a str, created: bool },

    /// A batch of factory constructors was invoked.
    Creates { count: usize, failed: usize },

    /// Every entry was removed.
    Clear,
}

impl std::fmt::Display for RegistryEvent<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryEvent::Add { name, added } => {
                write!(f, "add {{ name: {}, added: {} }}", name, added)
            }
            RegistryEvent::Adds { count, failed } => {
                write!(f, "adds {{ count: {}, failed: {} }}", count, failed)
            }
            RegistryEvent::Set { name } => write!(f, "set {{ name: {} }}", name),
            RegistryEvent::Sets { count, failed } => {
                write!(f, "sets {{ count: {}, failed: {} }}", count, failed)
            }
            RegistryEvent::Get { name, found } => {
                write!(f, "get {{ name: {}, found: {} }}", name, found)
            }
            RegistryEvent::Gets { count, missing } => {
                write!(f, "gets {{ count: {}, missing: {} }}", count, missing)
            }
            RegistryEvent::Contains { name, found } => {
                write!(f, "contains {{ name: {}, found: {} }}", name, found)
            }
            RegistryEvent::Remove { name } => write!(f, "remove {{ name: {} }}", name),
            RegistryEvent::Removes { count } => write!(f, "removes {{ count: {} }}", count),
            RegistryEvent::Create { name, created } => {
                write!(f, "create {{ name: {}, created: {} }}", name, created)
            }
            RegistryEvent::Creates { count, failed } => {
                write!(f, "creates {{ count: {}, failed: {} }}", count, failed)
            }
            RegistryEvent::Clear => write!(f, "Clearing the Registry"),
        }
    }
}
