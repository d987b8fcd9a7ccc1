//! # Bindery: asynchronous dependency injection by name
//!
//! Bind named factories, declare which names they depend on, and resolve
//! any set of names concurrently. Shared bindings are built once.
//!
//! ```rust
//! use bindery::prelude::*;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<()> {
//! let container = Container::new();
//! container.bind("greeting").to_value("hello");
//! container
//!     .bind("message")
//!     .depends_on("greeting")
//!     .to_factory(|_, deps| async move {
//!         Ok(format!("{}, world", deps.get::<&str>(0)?))
//!     });
//!
//! assert_eq!(*container.get_as::<String>("message").await?, "hello, world");
//! # Ok(())
//! # }
//! ```

pub use bindery_container::*;
pub use bindery_support::*;

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use std::sync::Arc;

    struct Config {
        database_url: String,
    }

    struct Database {
        url: String,
    }

    struct AppProvider;

    impl Provider for AppProvider {
        fn register(&self, container: &Container) {
            container.bind("config").to_value(Config {
                database_url: "postgres://localhost/app".into(),
            });
            container
                .bind("db")
                .depends_on("config")
                .to_factory(|_, deps| async move {
                    let config = deps.get::<Config>(0)?;
                    Ok(Database {
                        url: config.database_url.clone(),
                    })
                });
        }
    }

    #[tokio::test]
    async fn provider_wires_an_application() {
        crate::logging::init_tracing("bindery=debug");

        let container = Container::new();
        container.install(&AppProvider);

        let first: Arc<Database> = container.get_as("db").await.unwrap();
        let second: Arc<Database> = container.get_as("db").await.unwrap();

        assert_eq!(first.url, "postgres://localhost/app");
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn missing_dependency_suggests_a_fix() {
        let container = Container::new();
        container.bind("mailer.smtp").to_value("smtp://localhost");
        container
            .bind("notifier")
            .depends_on("mailer.smpt")
            .to_factory(|_, _| async { Ok(()) });

        let err = container.get("notifier").await.unwrap_err();
        let message = err.to_string();
        assert!(message.contains("mailer.smpt"));
        assert!(message.contains("Did you mean: mailer.smtp?"));
    }
}
