//! # The Container
//!
//! Holds every binding of an application and resolves them on demand.
//!
//! # Architecture
//! ```text
//! bind(name) ──> BindingBuilder ──to_*()──> Registry
//!                                              │
//! get(names) ── fan-out, one task per name ────┤
//!                    │                         │
//!                    ▼                         ▼
//!               get_one(name) ── deps ──> get(deps) ──> Factory ──> cache
//! ```
//!
//! # Examples
//! ```rust
//! use bindery_container::prelude::*;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<()> {
//! let container = Container::new();
//!
//! container.bind("foo").to_factory(|_, _| async { Ok(String::from("foo")) });
//! container
//!     .bind("foo.bar")
//!     .depends_on(["foo"])
//!     .to_factory(|_, deps| async move {
//!         let foo = deps.get::<String>(0)?;
//!         Ok(format!("{foo}bar"))
//!     });
//!
//! let foobar = container.get_as::<String>("foo.bar").await?;
//! assert_eq!(*foobar, "foobar");
//! # Ok(())
//! # }
//! ```

use std::any::Any;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use bindery_support::rendering::{render_names, suggest_similar};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, trace, warn};

use crate::error::{BinderyError, NotBoundError, Result};
use crate::factory::{BoxFuture, CallbackFactory, ClosureFactory, Completion, Factory, ValueFactory};
use crate::key::IntoKeys;
use crate::provider::Provider;
use crate::registry::{Binding, Registry};
use crate::resolved::{Instance, Resolved, downcast};
use crate::settings::Settings;
use crate::sharing::Sharing;

// ============================================================
// ContainerBuilder
// ============================================================

/// Builds a [`Container`] with non-default [`Settings`].
///
/// # Examples
/// ```rust
/// use bindery_container::Container;
///
/// let container = Container::builder()
///     .shared_by_default(false)
///     .max_suggestions(5)
///     .build();
/// assert!(!container.settings().shared_by_default);
/// ```
#[derive(Debug, Default)]
pub struct ContainerBuilder {
    settings: Settings,
}

impl ContainerBuilder {
    fn new() -> Self {
        Self::default()
    }

    /// Replace all settings at once (e.g. loaded from a config file).
    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Sharing mode for bindings that do not call `.shared(..)`.
    pub fn shared_by_default(mut self, shared: bool) -> Self {
        self.settings.shared_by_default = shared;
        self
    }

    /// Upper bound on "did you mean?" hints.
    pub fn max_suggestions(mut self, max: usize) -> Self {
        self.settings.max_suggestions = max;
        self
    }

    /// Log rebinding an existing name at `warn` level.
    pub fn warn_on_rebind(mut self, warn: bool) -> Self {
        self.settings.warn_on_rebind = warn;
        self
    }

    /// Build the (empty) container.
    pub fn build(self) -> Container {
        info!(
            shared_by_default = self.settings.shared_by_default,
            "Container created"
        );
        Container {
            inner: Arc::new(ContainerInner {
                registry: Registry::new(),
                settings: self.settings,
            }),
        }
    }
}

// ═══════════════════════════════════════════
// Container
// ═══════════════════════════════════════════

/// Asynchronous, name-keyed dependency injection container.
///
/// Cloning is cheap and every clone sees the same bindings and cache.
/// Separate [`Container::new`] calls are fully independent.
#[derive(Clone)]
pub struct Container {
    inner: Arc<ContainerInner>,
}

struct ContainerInner {
    registry: Registry,
    settings: Settings,
}

impl Container {
    /// Create an empty container with default settings.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a new builder.
    pub fn builder() -> ContainerBuilder {
        ContainerBuilder::new()
    }

    /// The settings this container was built with.
    pub fn settings(&self) -> &Settings {
        &self.inner.settings
    }

    /// Start binding `name`. The binding is stored by one of the
    /// builder's `to*` methods and replaces any earlier binding of `name`.
    ///
    /// ```rust,ignore
    /// container.bind("config").to_value(Config::load());
    /// container.bind("db").depends_on(["config"]).to_factory(|_, deps| async move { .. });
    /// container.bind("request.id").shared(false).to_factory(|_, _| async { .. });
    /// ```
    pub fn bind(&self, name: impl Into<String>) -> BindingBuilder<'_> {
        BindingBuilder {
            container: self,
            name: name.into(),
            dependencies: Vec::new(),
            sharing: self.inner.settings.default_sharing(),
        }
    }

    /// Install a [`Provider`] module.
    pub fn install(&self, provider: &dyn Provider) -> &Self {
        debug!(provider = provider.name(), "Installing provider");
        provider.register(self);
        self
    }

    /// Returns `true` if `name` is bound.
    pub fn is_bound(&self, name: &str) -> bool {
        self.inner.registry.contains(name)
    }

    /// Number of bound names.
    pub fn len(&self) -> usize {
        self.inner.registry.len()
    }

    /// Returns `true` if nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.inner.registry.is_empty()
    }

    /// All bound names, sorted.
    pub fn names(&self) -> Vec<String> {
        self.inner.registry.names()
    }

    /// Resolve one name or an ordered list of names.
    ///
    /// All names start resolving before any is awaited. The first failure
    /// to complete is returned and the rest are discarded (they keep
    /// running). On success values are in request order, whatever order
    /// they completed in.
    ///
    /// Must be polled within a tokio runtime.
    ///
    /// ```rust,ignore
    /// let resolved = container.get(["db", "mailer"]).await?;
    /// let db = resolved.get::<Database>(0)?;
    /// ```
    pub async fn get(&self, names: impl IntoKeys) -> Result<Resolved> {
        self.resolve_all(names.into_keys(), None).await
    }

    /// Resolve a single name.
    pub async fn get_one(&self, name: &str) -> Result<Instance> {
        self.clone().resolve_one(name.to_owned(), None).await
    }

    /// Resolve a single name and downcast it to `T`.
    ///
    /// ```rust,ignore
    /// let config: Arc<Config> = container.get_as("config").await?;
    /// ```
    pub async fn get_as<T: Any + Send + Sync>(&self, name: &str) -> Result<Arc<T>> {
        let value = self.get_one(name).await?;
        downcast(name, value)
    }

    /// Resolve in the background and hand the outcome to `callback`,
    /// exactly once.
    ///
    /// Must be called from within a tokio runtime.
    pub fn get_with<F>(&self, names: impl IntoKeys, callback: F) -> JoinHandle<()>
    where
        F: FnOnce(Result<Resolved>) + Send + 'static,
    {
        let container = self.clone();
        let names = names.into_keys();
        tokio::spawn(async move {
            let outcome = container.resolve_all(names, None).await;
            callback(outcome);
        })
    }

    /// Fan-out: one task per name, first error wins.
    #[instrument(skip_all, name = "resolve", fields(names = %render_names(&names)))]
    async fn resolve_all(&self, names: Vec<String>, required_by: Option<String>) -> Result<Resolved> {
        if names.is_empty() {
            return Ok(Resolved::empty());
        }

        // Detached tasks: dropping this future never aborts a running factory.
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut handles = Vec::with_capacity(names.len());
        for (index, name) in names.iter().enumerate() {
            let resolution = self.clone().resolve_one(name.clone(), required_by.clone());
            let tx = tx.clone();
            handles.push(tokio::spawn(async move {
                let _ = tx.send((index, resolution.await));
            }));
        }
        drop(tx);

        let mut slots: Vec<Option<Instance>> = vec![None; names.len()];
        let mut remaining = names.len();

        while remaining > 0 {
            // Closed early: a task ended without reporting.
            let Some((index, outcome)) = rx.recv().await else {
                return Err(self.task_failed(&names, handles).await);
            };

            match outcome {
                Ok(value) => {
                    slots[index] = Some(value);
                    remaining -= 1;
                }
                Err(error) => {
                    warn!(
                        name = %names[index],
                        unfinished = remaining - 1,
                        error = %error,
                        "Resolution failed, discarding siblings"
                    );
                    // Siblings keep running; their results are ignored.
                    return Err(error);
                }
            }
        }

        debug_assert_eq!(remaining, 0);
        let values: Vec<Instance> = slots.into_iter().flatten().collect();
        Ok(Resolved::new(names, values))
    }

    /// Explains a fan-out whose channel closed before every task reported.
    async fn task_failed(&self, names: &[String], handles: Vec<JoinHandle<()>>) -> BinderyError {
        let mut reason = String::from("task ended without a result");
        for handle in handles {
            if let Err(join_error) = handle.await {
                reason = join_error.to_string();
                break;
            }
        }
        BinderyError::TaskFailed {
            requested: render_names(names),
            reason,
        }
    }

    /// Resolve a single binding: cache, then dependencies, then factory.
    fn resolve_one(self, name: String, required_by: Option<String>) -> BoxFuture<Result<Instance>> {
        Box::pin(async move {
            // Captured once: a concurrent rebind does not affect this resolution.
            let Some(binding) = self.inner.registry.get(&name) else {
                return Err(self.not_bound(name, required_by));
            };

            if let Some(value) = binding.cached() {
                trace!(name = %name, "Cache hit");
                return Ok(value.clone());
            }

            let dependencies = self
                .resolve_all(binding.dependencies.clone(), Some(name.clone()))
                .await?;

            trace!(name = %name, sharing = %binding.sharing, "Invoking factory");
            let value = binding.factory.create(self.clone(), dependencies).await?;

            Ok(binding.store(value))
        })
    }

    fn not_bound(&self, name: String, required_by: Option<String>) -> BinderyError {
        let bound = self.inner.registry.names();
        let available: Vec<&str> = bound.iter().map(String::as_str).collect();
        let suggestions =
            suggest_similar(&name, &available, self.inner.settings.max_suggestions);

        debug!(name = %name, required_by = ?required_by, "Binding not found");
        BinderyError::NotBound(NotBoundError {
            requested: name,
            required_by,
            suggestions,
        })
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("bound", &self.inner.registry.len())
            .finish()
    }
}

// ═══════════════════════════════════════════
// BindingBuilder
// ═══════════════════════════════════════════

/// Describes one binding; created by [`Container::bind`].
///
/// Nothing is stored until one of the `to*` methods is called.
#[must_use = "a binding is only stored by one of the `to*` methods"]
pub struct BindingBuilder<'c> {
    container: &'c Container,
    name: String,
    dependencies: Vec<String>,
    sharing: Sharing,
}

impl BindingBuilder<'_> {
    /// Names whose values are resolved first and passed to the factory,
    /// in this order. Not checked until resolution.
    pub fn depends_on(mut self, names: impl IntoKeys) -> Self {
        self.dependencies = names.into_keys();
        self
    }

    /// Cache the first value (`true`) or run the factory on every
    /// request (`false`).
    pub fn shared(mut self, shared: bool) -> Self {
        self.sharing = Sharing::from(shared);
        self
    }

    /// Same as [`shared`](Self::shared), with the mode spelled out.
    pub fn sharing(mut self, sharing: Sharing) -> Self {
        self.sharing = sharing;
        self
    }

    /// Bind a pre-built value. Every resolution returns this same value.
    pub fn to_value<T: Any + Send + Sync>(self, value: T) {
        self.finish(Arc::new(ValueFactory::new(value)));
    }

    /// Bind an async factory closure.
    ///
    /// The closure gets the container and the resolved dependencies.
    pub fn to_factory<F, Fut, T>(self, factory: F)
    where
        F: Fn(Container, Resolved) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
        T: Any + Send + Sync,
    {
        self.finish(Arc::new(ClosureFactory::new(factory)));
    }

    /// Bind a factory that reports through a [`Completion`] handle.
    ///
    /// ```rust,ignore
    /// container.bind("clock").to_callback(|_, done, _| {
    ///     tokio::spawn(async move {
    ///         done.succeed(fetch_time().await);
    ///     });
    /// });
    /// ```
    pub fn to_callback<F>(self, factory: F)
    where
        F: Fn(Container, Completion, Resolved) + Send + Sync + 'static,
    {
        let name = self.name.clone();
        self.finish(Arc::new(CallbackFactory::new(name, factory)));
    }

    /// Bind any [`Factory`] implementation.
    pub fn to<F: Factory>(self, factory: F) {
        self.finish(Arc::new(factory));
    }

    fn finish(self, factory: Arc<dyn Factory>) {
        let Self {
            container,
            name,
            dependencies,
            sharing,
        } = self;
        let inner = &container.inner;
        let binding = Binding::new(name, factory, sharing, dependencies);
        inner.registry.register(binding, inner.settings.warn_on_rebind);
    }
}

// ═══════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════

pub mod prelude {
    pub use super::{BindingBuilder, Container, ContainerBuilder};
    pub use crate::error::{BinderyError, Result};
    pub use crate::factory::Completion;
    pub use crate::provider::Provider;
    pub use crate::resolved::{Instance, Resolved};
    pub use crate::settings::Settings;
    pub use crate::sharing::Sharing;
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════
