use std::fmt;

use thiserror::Error;

/// Boxed error reported by a constructor.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("object was already registered: {name}")]
    AlreadyRegistered { name: String },

    #[error("object was not registered: {name}")]
    NotRegistered { name: String },

    #[error("object constructor cannot be empty: {name}")]
    InvalidConstructor { name: String },

    #[error("cannot create object {name}: {source}")]
    CreationFailed {
        name: String,
        #[source]
        source: BoxError,
    },

    #[error("object was not created: {name}")]
    ObjectNotCreated { name: String },

    #[error("type mismatch for object {name}, expected {type_name}")]
    TypeMismatch {
        name: String,
        type_name: &'static str,
    },

    #[error(transparent)]
    Aggregate(#[from] AggregateError),
}

impl RegistryError {
    /// Name of the entry the error refers to, if it refers to exactly one.
    pub fn name(&self) -> Option<&str> {
        match self {
            RegistryError::AlreadyRegistered { name }
            | RegistryError::NotRegistered { name }
            | RegistryError::InvalidConstructor { name }
            | RegistryError::CreationFailed { name, .. }
            | RegistryError::ObjectNotCreated { name }
            | RegistryError::TypeMismatch { name, .. } => Some(name),
            RegistryError::Aggregate(_) => None,
        }
    }
}

/// Every individual failure of a bulk operation.
///
/// Only produced when at least one entry failed. The errors are kept in the
/// order the bulk operation visited the entries.
#[derive(Debug, Error)]
pub struct AggregateError {
    context: &'static str,
    errors: Vec<RegistryError>,
}

impl AggregateError {
    /// Returns `Ok(())` when `errors` is empty, the aggregate otherwise.
    pub(crate) fn check(
        context: &'static str,
        errors: Vec<RegistryError>,
    ) -> Result<(), RegistryError> {
        if errors.is_empty() {
            return Ok(());
        }

        Err(AggregateError { context, errors }.into())
    }

    pub fn context(&self) -> &'static str {
        self.context
    }

    pub fn errors(&self) -> &[RegistryError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<RegistryError> {
        self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RegistryError> {
        self.errors.iter()
    }
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: [", self.context)?;
        for (index, error) in self.errors.iter().enumerate() {
            if index > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{error}")?;
        }
        write!(f, "]")
    }
}

impl<'a> IntoIterator for &'a AggregateError {
    type Item = &'a RegistryError;
    type IntoIter = std::slice::Iter<'a, RegistryError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl IntoIterator for AggregateError {
    type Item = RegistryError;
    type IntoIter = std::vec::IntoIter<RegistryError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_already_registered_display() {
        let err = RegistryError::AlreadyRegistered { name: "a".into() };
        assert_eq!(err.to_string(), "object was already registered: a");
    }

    #[test]
    fn test_not_registered_display() {
        let err = RegistryError::NotRegistered { name: "b".into() };
        assert_eq!(err.to_string(), "object was not registered: b");
    }

    #[test]
    fn test_creation_failed_keeps_source() {
        let err = RegistryError::CreationFailed {
            name: "ctor".into(),
            source: "disk full".into(),
        };
        assert_eq!(err.to_string(), "cannot create object ctor: disk full");
        assert_eq!(err.source().unwrap().to_string(), "disk full");
    }

    #[test]
    fn test_check_empty_is_ok() {
        assert!(AggregateError::check("cannot add objects", Vec::new()).is_ok());
    }

    #[test]
    fn test_aggregate_keeps_every_error() {
        let err = AggregateError::check(
            "cannot get objects",
            vec![
                RegistryError::NotRegistered { name: "x".into() },
                RegistryError::NotRegistered { name: "y".into() },
            ],
        )
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "cannot get objects: [object was not registered: x; object was not registered: y]"
        );
        assert_eq!(err.name(), None);

        let RegistryError::Aggregate(aggregate) = err else {
            panic!("expected aggregate error");
        };
        assert_eq!(aggregate.len(), 2);
        assert_eq!(aggregate.context(), "cannot get objects");
        let names: Vec<_> = aggregate.iter().filter_map(RegistryError::name).collect();
        assert_eq!(names, ["x", "y"]);
    }

    #[test]
    fn test_name_accessor() {
        let err = RegistryError::TypeMismatch {
            name: "n".into(),
            type_name: "u8",
        };
        assert_eq!(err.name(), Some("n"));
        assert_eq!(err.to_string(), "type mismatch for object n, expected u8");
    }
}
