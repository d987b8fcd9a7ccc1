//! Positional results of a resolution.
//!
//! Both [`Container::get`](crate::Container::get) and every factory see
//! their values as a [`Resolved`]: the requested names and their values,
//! in request order.

use std::any::{Any, type_name};
use std::fmt;
use std::sync::Arc;

use bindery_support::rendering::render_names;

use crate::error::{BinderyError, NotBoundError, Result, TypeMismatchError};

/// A type-erased, shareable value produced by a binding.
///
/// Shared bindings hand out clones of the same `Arc`, so identity can be
/// checked with [`Arc::ptr_eq`].
pub type Instance = Arc<dyn Any + Send + Sync>;

/// Values resolved for an ordered list of names.
///
/// # Examples
/// ```
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> bindery_container::Result<()> {
/// use bindery_container::Container;
///
/// let container = Container::new();
/// container.bind("host").to_value(String::from("localhost"));
/// container.bind("port").to_value(5432u16);
///
/// let resolved = container.get(["host", "port"]).await?;
/// assert_eq!(*resolved.get::<String>(0)?, "localhost");
/// assert_eq!(*resolved.by_name::<u16>("port")?, 5432);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Default)]
pub struct Resolved {
    names: Vec<String>,
    values: Vec<Instance>,
}

impl Resolved {
    /// The result of resolving no names at all.
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn new(names: Vec<String>, values: Vec<Instance>) -> Self {
        debug_assert_eq!(names.len(), values.len());
        Self { names, values }
    }

    /// Number of resolved values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if nothing was requested.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The requested names, in request order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// The untyped value at `index`.
    pub fn instance(&self, index: usize) -> Option<&Instance> {
        self.values.get(index)
    }

    /// The value at `index`, downcast to `T`.
    ///
    /// # Errors
    /// [`BinderyError::MissingValue`] past the end,
    /// [`BinderyError::TypeMismatch`] if the value is not a `T`.
    pub fn get<T: Any + Send + Sync>(&self, index: usize) -> Result<Arc<T>> {
        let value = self.values.get(index).ok_or(BinderyError::MissingValue {
            index,
            len: self.values.len(),
        })?;
        downcast(&self.names[index], value.clone())
    }

    /// The value resolved for `name`, downcast to `T`.
    ///
    /// Looks up the first position `name` was requested at.
    pub fn by_name<T: Any + Send + Sync>(&self, name: &str) -> Result<Arc<T>> {
        let index = self
            .names
            .iter()
            .position(|n| n == name)
            .ok_or_else(|| {
                BinderyError::NotBound(NotBoundError {
                    requested: name.to_owned(),
                    required_by: None,
                    suggestions: Vec::new(),
                })
            })?;
        self.get(index)
    }

    /// Iterates `(name, value)` pairs in request order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Instance)> {
        self.names.iter().map(String::as_str).zip(self.values.iter())
    }

    /// Consumes the set, returning the values in request order.
    pub fn into_instances(self) -> Vec<Instance> {
        self.values
    }
}

impl fmt::Debug for Resolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolved")
            .field("names", &render_names(&self.names))
            .finish()
    }
}

/// Downcasts a value resolved for `name` to `T`.
pub(crate) fn downcast<T: Any + Send + Sync>(name: &str, value: Instance) -> Result<Arc<T>> {
    value.downcast::<T>().map_err(|_| {
        BinderyError::TypeMismatch(TypeMismatchError {
            name: name.to_owned(),
            expected: type_name::<T>(),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Resolved {
        Resolved::new(
            vec!["name".into(), "port".into()],
            vec![
                Arc::new(String::from("db")) as Instance,
                Arc::new(5432u16) as Instance,
            ],
        )
    }

    #[test]
    fn typed_access_by_index() {
        let resolved = sample();
        assert_eq!(resolved.len(), 2);
        assert_eq!(*resolved.get::<String>(0).unwrap(), "db");
        assert_eq!(*resolved.get::<u16>(1).unwrap(), 5432);
    }

    #[test]
    fn typed_access_by_name() {
        let resolved = sample();
        assert_eq!(*resolved.by_name::<u16>("port").unwrap(), 5432);
        assert!(resolved.by_name::<u16>("nope").unwrap_err().is_not_bound());
    }

    #[test]
    fn wrong_type_is_reported() {
        match sample().get::<i64>(1) {
            Err(BinderyError::TypeMismatch(e)) => {
                assert_eq!(e.name, "port");
                assert!(e.expected.contains("i64"));
            }
            other => panic!("Expected TypeMismatch, got: {other:?}"),
        }
    }

    #[test]
    fn out_of_range_is_reported() {
        match sample().get::<String>(7) {
            Err(BinderyError::MissingValue { index, len }) => {
                assert_eq!(index, 7);
                assert_eq!(len, 2);
            }
            other => panic!("Expected MissingValue, got: {other:?}"),
        }
    }

    #[test]
    fn empty_set() {
        let resolved = Resolved::empty();
        assert!(resolved.is_empty());
        assert!(resolved.instance(0).is_none());
        assert_eq!(resolved.iter().count(), 0);
    }

    #[test]
    fn iterates_in_order() {
        let resolved = sample();
        let names: Vec<&str> = resolved.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["name", "port"]);
    }

    #[test]
    fn debug_lists_names() {
        let debug = format!("{:?}", sample());
        assert!(debug.contains("name, port"));
    }
}
