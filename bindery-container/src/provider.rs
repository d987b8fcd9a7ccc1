//! Provider trait: a module of related bindings.
//!
//! Providers group bindings that belong together so an application can
//! install them by concern instead of one long list of `bind` calls.
//!
//! # Examples
//! ```rust
//! use bindery_container::prelude::*;
//!
//! struct DatabaseProvider {
//!     url: &'static str,
//! }
//!
//! impl Provider for DatabaseProvider {
//!     fn register(&self, container: &Container) {
//!         container.bind("db.url").to_value(self.url.to_string());
//!         container
//!             .bind("db.pool")
//!             .depends_on("db.url")
//!             .to_factory(|_, deps| async move {
//!                 let url = deps.get::<String>(0)?;
//!                 Ok(format!("pool({url})"))
//!             });
//!     }
//! }
//!
//! let container = Container::new();
//! container.install(&DatabaseProvider { url: "postgres://localhost" });
//! assert!(container.is_bound("db.pool"));
//! ```

/// A module that registers related bindings into a container.
///
/// # Design Philosophy
/// Split bindings by domain:
///
/// ```rust,ignore
/// container
///     .install(&DatabaseProvider)
///     .install(&AuthProvider)
///     .install(&MailProvider);
/// ```
pub trait Provider: Send + Sync {
    /// Bind this module's names into `container`.
    fn register(&self, container: &crate::Container);

    /// Optional: human-readable name for logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Container;

    struct TestProvider;

    impl Provider for TestProvider {
        fn register(&self, container: &Container) {
            container.bind("greeting").to_value(String::from("hello"));
            container
                .bind("counter")
                .shared(false)
                .to_factory(|_, _| async { Ok(42i32) });
        }
    }

    #[tokio::test]
    async fn provider_registers_bindings() {
        let container = Container::new();
        container.install(&TestProvider);

        assert_eq!(container.len(), 2);
        assert_eq!(*container.get_as::<i32>("counter").await.unwrap(), 42);
    }

    #[test]
    fn provider_has_name() {
        assert!(TestProvider.name().contains("TestProvider"));
    }
}
