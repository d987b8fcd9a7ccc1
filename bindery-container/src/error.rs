//! Error types for bindery container operations.
//!
//! Errors are always returned, never thrown across an `.await`. A factory
//! error travels up through every dependent binding unchanged, so the
//! caller of [`Container::get`](crate::Container::get) sees exactly what
//! the failing factory reported.

use std::fmt;

use bindery_support::rendering::render_names;

/// Boxed error produced by user factories.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for all bindery operations.
#[derive(Debug, thiserror::Error)]
pub enum BinderyError {
    /// Requested name has no binding.
    #[error("{}", .0)]
    NotBound(NotBoundError),

    /// A factory reported failure through its result or completion handle.
    #[error("Factory failed: {source}")]
    FactoryFailed {
        #[source]
        source: BoxError,
    },

    /// A completion-handler factory dropped its handle without completing.
    #[error("Factory for {name:?} dropped its completion handle without completing")]
    Abandoned { name: String },

    /// Typed access asked for a type the value does not have.
    #[error("{}", .0)]
    TypeMismatch(TypeMismatchError),

    /// Typed access past the end of a resolved set.
    #[error("No resolved value at position {index} (resolved {len})")]
    MissingValue { index: usize, len: usize },

    /// A spawned resolution task panicked or was cancelled by the runtime.
    #[error("Resolution task among [{requested}] failed: {reason}")]
    TaskFailed { requested: String, reason: String },
}

impl BinderyError {
    /// Wraps any error (or message) as a factory failure.
    ///
    /// ```
    /// use bindery_container::BinderyError;
    ///
    /// let err = BinderyError::factory("computer on fire");
    /// assert_eq!(err.to_string(), "Factory failed: computer on fire");
    /// ```
    pub fn factory(source: impl Into<BoxError>) -> Self {
        Self::FactoryFailed {
            source: source.into(),
        }
    }

    /// Returns `true` for [`BinderyError::NotBound`].
    pub fn is_not_bound(&self) -> bool {
        matches!(self, Self::NotBound(_))
    }
}

/// Error when a name was requested that has no binding.
#[derive(Debug)]
pub struct NotBoundError {
    /// The name that was requested
    pub requested: String,
    /// The binding whose declared dependencies named it, if any
    pub required_by: Option<String>,
    /// Bound names that look similar
    pub suggestions: Vec<String>,
}

impl fmt::Display for NotBoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Binding not found: {:?}", self.requested)?;

        if let Some(ref parent) = self.required_by {
            write!(f, "\n  Required by: {parent:?}")?;
        }

        if !self.suggestions.is_empty() {
            write!(f, "\n  Did you mean: {}?", render_names(&self.suggestions))?;
        }

        write!(
            f,
            "\n  Hint: Did you forget to call .bind({:?})?",
            self.requested
        )
    }
}

/// Error when a resolved value was read as the wrong type.
#[derive(Debug)]
pub struct TypeMismatchError {
    /// Binding name the value came from
    pub name: String,
    /// Type the caller asked for
    pub expected: &'static str,
}

impl fmt::Display for TypeMismatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Type mismatch for {:?}: value is not a {}",
            self.name, self.expected
        )?;
        write!(
            f,
            "\n  Hint: Values are stored as Arc<T>; ask for T, not Arc<T>"
        )
    }
}

/// Convenient Result type for bindery operations.
pub type Result<T> = std::result::Result<T, BinderyError>;
