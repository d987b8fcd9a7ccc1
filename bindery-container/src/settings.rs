//! Container settings.
//!
//! Passed to [`ContainerBuilder::settings`](crate::ContainerBuilder::settings).
//! Every field has a default, so partial documents deserialize fine.

use serde::{Deserialize, Serialize};

use crate::sharing::Sharing;

/// Tunables for a [`Container`](crate::Container).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Sharing mode used when a binding does not call `.shared(..)`.
    pub shared_by_default: bool,
    /// Upper bound on "did you mean?" hints in `NotBound` errors.
    pub max_suggestions: usize,
    /// Log rebinding an existing name at `warn` instead of `debug`.
    pub warn_on_rebind: bool,
}

impl Settings {
    pub(crate) fn default_sharing(&self) -> Sharing {
        Sharing::from(self.shared_by_default)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            shared_by_default: true,
            max_suggestions: 3,
            warn_on_rebind: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let settings = Settings::default();
        assert!(settings.shared_by_default);
        assert_eq!(settings.max_suggestions, 3);
        assert!(!settings.warn_on_rebind);
        assert_eq!(settings.default_sharing(), Sharing::Shared);
    }

    #[test]
    fn partial_document_uses_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{ "shared_by_default": false }"#).unwrap();

        assert!(!settings.shared_by_default);
        assert_eq!(settings.max_suggestions, 3);
        assert_eq!(settings.default_sharing(), Sharing::Transient);
    }

    #[test]
    fn serializes_every_field() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(json["max_suggestions"], 3);
        assert_eq!(json["warn_on_rebind"], false);
    }
}
