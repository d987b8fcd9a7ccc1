//! Binding sharing modes.
//!
//! Sharing determines whether a resolved value is reused:
//! - [`Sharing::Shared`]: built once, cached, the same instance forever after
//! - [`Sharing::Transient`]: the factory runs on every request
use std::fmt;

/// Whether a binding's value is cached after the first resolution.
///
/// # Examples
/// ```
/// use bindery_container::sharing::Sharing;
///
/// assert_eq!(Sharing::from(true), Sharing::Shared);
/// assert!(!Sharing::Transient.is_cached());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Sharing {
    /// One instance for the lifetime of the container.
    ///
    /// Built on first request, then served from the cache.
    ///
    /// # When to use
    /// - Connection pools
    /// - Configuration objects
    /// - Anything expensive to build
    #[default]
    Shared,

    /// New value on every request. Never cached.
    ///
    /// # When to use
    /// - Per-request state
    /// - Values with interior mutability that must not be shared
    Transient,
}

impl Sharing {
    /// Returns `true` if values of this mode are cached.
    #[inline]
    pub fn is_cached(&self) -> bool {
        matches!(self, Sharing::Shared)
    }
}

impl From<bool> for Sharing {
    fn from(shared: bool) -> Self {
        if shared {
            Sharing::Shared
        } else {
            Sharing::Transient
        }
    }
}

impl fmt::Display for Sharing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sharing::Shared => write!(f, "Shared"),
            Sharing::Transient => write!(f, "Transient"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_shared() {
        assert_eq!(Sharing::default(), Sharing::Shared);
    }

    #[test]
    fn from_flag() {
        assert_eq!(Sharing::from(true), Sharing::Shared);
        assert_eq!(Sharing::from(false), Sharing::Transient);
    }

    #[test]
    fn only_shared_is_cached() {
        assert!(Sharing::Shared.is_cached());
        assert!(!Sharing::Transient.is_cached());
    }

    #[test]
    fn sharing_display() {
        assert_eq!(format!("{}", Sharing::Shared), "Shared");
        assert_eq!(format!("{}", Sharing::Transient), "Transient");
    }
}
